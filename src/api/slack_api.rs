use crate::error::ShelterError;
use crate::service::traits::MessageSink;
use crate::types::slack::{PostMessageRequest, PostMessageResponse};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Slack allows roughly one message per second per channel; short bursts are tolerated.
const SEND_BURST: NonZeroU32 = NonZeroU32::MIN.saturating_add(4);

/// Posts replies through the Slack Web API.
#[derive(Clone)]
pub struct SlackApi {
    client: reqwest::Client,
    post_message_url: Url,
    token: Arc<str>,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl SlackApi {
    pub fn new(
        client: reqwest::Client,
        api_base: &Url,
        token: impl Into<Arc<str>>,
    ) -> Result<Self, ShelterError> {
        let mut base = api_base.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let post_message_url = base
            .join("chat.postMessage")
            .map_err(|e| ShelterError::Gateway(format!("invalid Slack API url: {e}")))?;
        let limiter = Arc::new(RateLimiter::direct(
            Quota::per_second(NonZeroU32::MIN).allow_burst(SEND_BURST),
        ));
        Ok(Self {
            client,
            post_message_url,
            token: token.into(),
            limiter,
        })
    }

    pub fn post_message_url(&self) -> &Url {
        &self.post_message_url
    }
}

#[async_trait]
impl MessageSink for SlackApi {
    async fn send(&self, channel: &str, text: &str) -> Result<(), ShelterError> {
        self.limiter.until_ready().await;
        let resp: PostMessageResponse = self
            .client
            .post(self.post_message_url.clone())
            .bearer_auth(self.token.as_ref())
            .json(&PostMessageRequest { channel, text })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if !resp.ok {
            return Err(ShelterError::Gateway(
                resp.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        debug!(%channel, "reply posted");
        Ok(())
    }
}
