//! User-metadata relay handler. Forwards the update to the identity service
//! and relays its response unmodified inside the `{message, data}` envelope.

use crate::{
    errors::AppError,
    models::{Envelope, user::UserMetadataUpdate},
    services::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};

/// `PATCH /users/clerk/{userId}`.
///
/// Any identity-service failure comes back as HTTP 500 with the
/// `{message, error}` envelope; causes are not differentiated here.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UserMetadataUpdate>,
) -> Result<Json<Envelope<serde_json::Value>>, AppError> {
    let user = state
        .clerk
        .update_user_metadata(&user_id, &body.public_metadata)
        .await?;

    Ok(Json(Envelope::new("User updated successfully", user)))
}
