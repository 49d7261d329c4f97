/// A chat message the bot should answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub text: String,
    pub channel: String,
    pub user: String,
}

impl InboundEvent {
    pub fn new(text: impl Into<String>, channel: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            channel: channel.into(),
            user: user.into(),
        }
    }
}
