//! Public course browsing handlers. No auth gate; these back the landing
//! and search views.

use crate::{errors::AppError, models::course::Course, services::AppState};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

/// Query params accepted by `GET /courses`.
#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
    /// Category filter; `all` (or absent) lists everything.
    pub category: Option<String>,
}

/// `GET /courses` — list published courses as a bare JSON array.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(q): Query<ListCoursesQuery>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.courses.list_courses(q.category.as_deref()).await?;
    Ok(Json(courses))
}

/// `GET /courses/{courseId}` — course detail, 404 when unknown.
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = state.courses.get_course(&course_id).await?;
    Ok(Json(course))
}
