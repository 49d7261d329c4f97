//! Slack wire types: Events API callbacks in, Web API `chat.postMessage` out.

use super::event::InboundEvent;
use serde::{Deserialize, Serialize};

/// Outer envelope Slack POSTs to the events endpoint.
///
/// Every callback type carries the verification `token`, including ones we ignore.
#[derive(Debug, Deserialize)]
pub struct SlackEnvelope {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub payload: SlackPayload,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackPayload {
    UrlVerification { challenge: String },
    EventCallback { event: SlackEvent },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct SlackEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
}

impl SlackEvent {
    /// Plain user messages only; edits, joins and anything posted by a bot
    /// (our own replies included) are dropped.
    pub fn into_inbound(self) -> Option<InboundEvent> {
        if self.kind != "message" || self.bot_id.is_some() || self.subtype.is_some() {
            return None;
        }
        let text = self.text?;
        let channel = self.channel?;
        Some(InboundEvent {
            text,
            channel,
            user: self.user.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PostMessageRequest<'a> {
    pub channel: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}
