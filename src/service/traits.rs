use crate::error::ShelterError;
use async_trait::async_trait;

/// Source of dog pictures.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// URL of one random dog image.
    async fn random_image(&self) -> Result<String, ShelterError>;
}

/// Outbound half of the chat gateway.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Post `text` to `channel`.
    async fn send(&self, channel: &str, text: &str) -> Result<(), ShelterError>;
}
