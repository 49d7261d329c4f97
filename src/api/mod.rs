pub mod dog_api;
pub mod slack_api;

use crate::error::ShelterError;
use std::time::Duration;
use url::Url;

/// Shared reqwest client for outbound calls.
pub fn build_http_client(proxy: Option<&Url>) -> Result<reqwest::Client, ShelterError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("shelter-bot/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(15));
    if let Some(proxy_url) = proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }
    Ok(builder.build()?)
}
