use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::db::DogStorage;
use crate::handlers::admin::{delete_all_dogs, list_dogs};
use crate::handlers::slack_events::slack_events_handler;
use crate::types::event::InboundEvent;

/// Shared state behind every HTTP handler.
#[derive(Clone)]
pub struct ShelterState {
    pub events: mpsc::Sender<InboundEvent>,
    pub storage: DogStorage,
    pub verification_token: Option<Arc<str>>,
    pub admin_key: Option<Arc<str>>,
}

impl ShelterState {
    pub fn new(
        events: mpsc::Sender<InboundEvent>,
        storage: DogStorage,
        verification_token: Option<String>,
        admin_key: Option<String>,
    ) -> Self {
        Self {
            events,
            storage,
            verification_token: verification_token.map(Arc::from),
            admin_key: admin_key.map(Arc::from),
        }
    }
}

/// Slack callback route, plus the admin routes when an admin key is configured.
pub fn shelter_router(state: ShelterState) -> Router {
    let mut router = Router::new().route("/slack/events", post(slack_events_handler));
    if state.admin_key.is_some() {
        router = router.route("/admin/dogs", get(list_dogs).delete(delete_all_dogs));
    }
    router.with_state(state)
}
