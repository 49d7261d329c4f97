use crate::error::ShelterError;
use crate::service::traits::ImageProvider;
use crate::types::dog_api::DogApiResponse;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// dog.ceo random image endpoint.
#[derive(Clone)]
pub struct DogApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl DogApi {
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl ImageProvider for DogApi {
    async fn random_image(&self) -> Result<String, ShelterError> {
        let body = self
            .client
            .get(self.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let url = serde_json::from_slice::<DogApiResponse>(&body)?.into_image_url()?;
        debug!(%url, "fetched dog picture");
        Ok(url)
    }
}
