//! Per-user course-progress handlers. Auth-gated.

use crate::{
    errors::AppError,
    middleware::AuthContext,
    models::{
        Envelope,
        progress::{ProgressUpdate, UserCourseProgress},
    },
    services::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use tracing::debug;

/// `GET /users/course-progress/{userId}/{courseId}`.
pub async fn get_progress(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(String, String)>,
) -> Result<Json<Envelope<UserCourseProgress>>, AppError> {
    let progress = state.courses.get_progress(&user_id, &course_id).await?;
    Ok(Json(Envelope::new(
        "Course progress retrieved successfully",
        progress,
    )))
}

/// `PUT /users/course-progress/{userId}/{courseId}` — create or update.
pub async fn update_progress(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((user_id, course_id)): Path<(String, String)>,
    Json(update): Json<ProgressUpdate>,
) -> Result<Json<Envelope<UserCourseProgress>>, AppError> {
    debug!(caller = %ctx.user_id, %user_id, %course_id, "updating progress");
    let progress = state
        .courses
        .upsert_progress(&user_id, &course_id, update)
        .await?;
    Ok(Json(Envelope::new(
        "Course progress updated successfully",
        progress,
    )))
}
