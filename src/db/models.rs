use crate::error::ShelterError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;

pub type DogId = i64;

/// A dog living in the shelter, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Dog {
    #[serde(rename = "_id")]
    pub id: DogId,
    pub name: Option<String>,
    pub picture: String,
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    pub name: Option<String>,
    pub picture: String,
}

impl NewDog {
    pub fn with_picture(picture: impl Into<String>) -> Self {
        Self {
            name: None,
            picture: picture.into(),
        }
    }

    /// Reject records the store must never hold.
    pub fn validate(&self) -> Result<(), ShelterError> {
        if self.picture.trim().is_empty() {
            return Err(ShelterError::Validation("picture is required".to_string()));
        }
        let url = Url::parse(&self.picture)
            .map_err(|e| ShelterError::Validation(format!("picture is not a URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ShelterError::Validation(format!(
                "picture must be an http(s) URL, got scheme `{}`",
                url.scheme()
            )));
        }
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(ShelterError::Validation(
                "name must not be blank when present".to_string(),
            ));
        }
        Ok(())
    }
}
