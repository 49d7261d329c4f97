use crate::error::ShelterError;
use serde::Deserialize;
use url::Url;

pub const STATUS_SUCCESS: &str = "success";

/// Payload of the random-image endpoint: `{"status": "success", "message": "<url>"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DogApiResponse {
    pub status: String,
    pub message: String,
}

impl DogApiResponse {
    /// The image URL, provided the endpoint reported success and sent a usable URL.
    pub fn into_image_url(self) -> Result<String, ShelterError> {
        if self.status != STATUS_SUCCESS {
            return Err(ShelterError::Upstream(format!(
                "dog API returned status `{}`: {}",
                self.status, self.message
            )));
        }
        let url = Url::parse(self.message.trim())
            .map_err(|e| ShelterError::Upstream(format!("dog API returned a bad URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ShelterError::Upstream(format!(
                "dog API returned a non-http URL: {url}"
            )));
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<String, ShelterError> {
        serde_json::from_str::<DogApiResponse>(body)?.into_image_url()
    }

    #[test]
    fn success_payload_yields_url() {
        let url = parse(
            r#"{"message":"https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg","status":"success"}"#,
        )
        .unwrap();
        assert_eq!(
            url,
            "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg"
        );
    }

    #[test]
    fn error_status_is_upstream_error() {
        let err = parse(r#"{"status":"error","message":"Breed not found"}"#).unwrap_err();
        assert!(matches!(err, ShelterError::Upstream(_)));
    }

    #[test]
    fn empty_or_bogus_message_is_upstream_error() {
        for body in [
            r#"{"status":"success","message":""}"#,
            r#"{"status":"success","message":"woof"}"#,
            r#"{"status":"success","message":"file:///etc/passwd"}"#,
        ] {
            assert!(matches!(parse(body), Err(ShelterError::Upstream(_))), "{body}");
        }
    }

    #[test]
    fn missing_fields_are_json_errors() {
        assert!(matches!(parse(r#"{"status":"success"}"#), Err(ShelterError::Json(_))));
    }
}
