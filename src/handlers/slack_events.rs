use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::middleware::auth::secret_matches;
use crate::types::slack::{SlackEnvelope, SlackPayload};
use crate::{ShelterError, router::ShelterState};

/// Set by Slack on redelivery of an event we already acknowledged too slowly.
const RETRY_HEADER: &str = "x-slack-retry-num";

/// POST /slack/events -> acknowledges Slack callbacks and queues user messages.
pub async fn slack_events_handler(
    State(state): State<ShelterState>,
    headers: HeaderMap,
    Json(envelope): Json<SlackEnvelope>,
) -> Result<Response, ShelterError> {
    if let Some(expected) = state.verification_token.as_deref()
        && !secret_matches(envelope.token.as_deref().unwrap_or_default(), expected)
    {
        warn!("rejected Slack callback with bad verification token");
        return Err(ShelterError::Unauthorized);
    }

    match envelope.payload {
        SlackPayload::UrlVerification { challenge } => {
            Ok(Json(json!({ "challenge": challenge })).into_response())
        }
        SlackPayload::EventCallback { event } => {
            if headers.contains_key(RETRY_HEADER) {
                debug!("ignoring Slack redelivery");
                return Ok(StatusCode::OK.into_response());
            }
            let Some(inbound) = event.into_inbound() else {
                return Ok(StatusCode::OK.into_response());
            };
            match state.events.try_send(inbound) {
                Ok(()) => Ok(StatusCode::OK.into_response()),
                Err(TrySendError::Full(dropped)) => {
                    warn!(
                        channel = %dropped.channel,
                        user = %dropped.user,
                        "event queue full; dropping message"
                    );
                    Ok(StatusCode::OK.into_response())
                }
                Err(TrySendError::Closed(dropped)) => {
                    warn!(
                        channel = %dropped.channel,
                        user = %dropped.user,
                        "event queue closed; rejecting message"
                    );
                    Ok(StatusCode::SERVICE_UNAVAILABLE.into_response())
                }
            }
        }
        SlackPayload::Other => {
            debug!("ignoring unhandled Slack callback type");
            Ok(StatusCode::OK.into_response())
        }
    }
}
