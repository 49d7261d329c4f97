use crate::db::{DogStorage, NewDog};
use crate::error::ShelterError;
use crate::service::replies;
use crate::service::traits::{ImageProvider, MessageSink};
use crate::types::event::InboundEvent;
use futures::TryStreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the bot does in answer to one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Greet,
    ShowMe,
    Add,
    Adopt,
    HowMany,
    ShowAll,
    Help,
    Unknown,
}

/// Keyword table, checked in order against the lower-cased text.
/// The first keyword contained in the text decides the command.
pub const COMMANDS: &[(&str, Command)] = &[
    ("hey", Command::Greet),
    ("show me", Command::ShowMe),
    ("add", Command::Add),
    ("adopt", Command::Adopt),
    ("how many", Command::HowMany),
    ("show all", Command::ShowAll),
    ("help", Command::Help),
];

impl Command {
    pub fn classify(text: &str) -> Command {
        let text = text.to_lowercase();
        COMMANDS
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, command)| *command)
            .unwrap_or(Command::Unknown)
    }
}

/// Turns inbound messages into shelter actions and replies.
///
/// Holds no per-message state, so a single instance serves every concurrent dispatch.
#[derive(Clone)]
pub struct Dispatcher {
    storage: DogStorage,
    images: Arc<dyn ImageProvider>,
    sink: Arc<dyn MessageSink>,
}

impl Dispatcher {
    pub fn new(
        storage: DogStorage,
        images: Arc<dyn ImageProvider>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            storage,
            images,
            sink,
        }
    }

    /// Answer one event, sending every reply to the channel it came from.
    ///
    /// Only failures of the outbound send are returned; action failures have
    /// already been turned into a reply.
    pub async fn dispatch(&self, event: &InboundEvent) -> Result<(), ShelterError> {
        let replies = self.replies(&event.text).await;
        debug!(
            channel = %event.channel,
            user = %event.user,
            count = replies.len(),
            "sending replies"
        );
        for text in &replies {
            self.sink.send(&event.channel, text).await?;
        }
        Ok(())
    }

    /// Replies for `text`, in send order.
    pub async fn replies(&self, text: &str) -> Vec<String> {
        let command = Command::classify(text);
        info!(?command, "dispatching");
        match self.run(command).await {
            Ok(replies) => replies,
            Err(e) => {
                warn!(?command, error = %e, "command failed");
                vec![Self::failure_reply(&e).to_string()]
            }
        }
    }

    async fn run(&self, command: Command) -> Result<Vec<String>, ShelterError> {
        match command {
            Command::Greet => Ok(vec![replies::GREETING.to_string()]),
            Command::ShowMe => Ok(vec![self.images.random_image().await?]),
            Command::Add => self.add_dog().await.map(|r| vec![r]),
            Command::Adopt => self.adopt_dog().await.map(|r| vec![r]),
            Command::HowMany => {
                let count = self.storage.count().await?;
                Ok(vec![replies::dog_count(count)])
            }
            Command::ShowAll => {
                self.storage
                    .find_all()
                    .map_ok(|dog| dog.picture)
                    .try_collect::<Vec<String>>()
                    .await
            }
            Command::Help => Ok(vec![replies::HELP.to_string()]),
            Command::Unknown => Ok(vec![replies::UNKNOWN_COMMAND.to_string()]),
        }
    }

    async fn add_dog(&self) -> Result<String, ShelterError> {
        let picture = self.images.random_image().await?;
        let dog = self.storage.insert(NewDog::with_picture(picture)).await?;
        info!(id = dog.id, "dog added to the shelter");
        Ok(replies::dog_added(&dog.picture))
    }

    async fn adopt_dog(&self) -> Result<String, ShelterError> {
        match self.storage.adopt_oldest().await {
            Ok(dog) => {
                info!(id = dog.id, "dog adopted");
                Ok(replies::dog_adopted(&dog.picture))
            }
            Err(ShelterError::NotFound(_)) => Ok(replies::NO_DOGS.to_string()),
            Err(e) => Err(e),
        }
    }

    fn failure_reply(err: &ShelterError) -> &'static str {
        match err {
            e if e.is_upstream() => replies::UPSTREAM_DOWN,
            ShelterError::Validation(_) => replies::BAD_PICTURE,
            _ => replies::TRY_AGAIN,
        }
    }
}
