use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ShelterError {
    #[error("Store connection error: {0}")]
    Connection(#[source] SqlxError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Slack API error: {0}")]
    Gateway(String),

    #[error("Unauthorized")]
    Unauthorized,
}

impl ShelterError {
    /// Failures coming from the image endpoint, whatever layer reported them.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ShelterError::Upstream(_) | ShelterError::Http(_) | ShelterError::Json(_)
        )
    }
}

impl From<SqlxError> for ShelterError {
    fn from(e: SqlxError) -> Self {
        match e {
            SqlxError::RowNotFound => ShelterError::NotFound("no matching dog".to_string()),
            other => ShelterError::Connection(other),
        }
    }
}

impl IntoResponse for ShelterError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            ShelterError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "invalid or missing key".to_string(),
            ),
            ShelterError::NotFound(what) => (StatusCode::NOT_FOUND, "NOT_FOUND", what.clone()),
            ShelterError::Validation(reason) => {
                (StatusCode::BAD_REQUEST, "INVALID", reason.clone())
            }
            ShelterError::Connection(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                "The shelter database is unavailable.".to_string(),
            ),
            ShelterError::Upstream(_)
            | ShelterError::Http(_)
            | ShelterError::Json(_)
            | ShelterError::Gateway(_) => (
                StatusCode::BAD_GATEWAY,
                "BAD_GATEWAY",
                "Upstream service is unavailable.".to_string(),
            ),
        };
        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
