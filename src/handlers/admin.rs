use axum::{Json, extract::State};
use futures::TryStreamExt;
use serde_json::{Value, json};
use tracing::info;

use crate::db::Dog;
use crate::middleware::auth::RequireAdminKey;
use crate::{ShelterError, router::ShelterState};

/// GET /admin/dogs -> every dog in the shelter, oldest first.
pub async fn list_dogs(
    _auth: RequireAdminKey,
    State(state): State<ShelterState>,
) -> Result<Json<Vec<Dog>>, ShelterError> {
    let dogs: Vec<Dog> = state.storage.find_all().try_collect().await?;
    Ok(Json(dogs))
}

/// DELETE /admin/dogs -> empties the shelter.
pub async fn delete_all_dogs(
    _auth: RequireAdminKey,
    State(state): State<ShelterState>,
) -> Result<Json<Value>, ShelterError> {
    let removed = state.storage.delete_all().await?;
    info!(removed, "shelter cleared by admin");
    Ok(Json(json!({ "removed": removed })))
}
