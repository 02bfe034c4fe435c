//! Per-user course progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// Progress of one user through one course.
///
/// `sections` is an opaque JSON document owned by the client; the server
/// stores and returns it without interpreting its shape.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserCourseProgress {
    pub user_id: String,

    pub course_id: String,

    /// Fraction of the course completed, in `0.0..=1.0`.
    pub overall_progress: f64,

    pub sections: Json<serde_json::Value>,

    pub last_accessed: DateTime<Utc>,
}

/// Request body for updating progress. Absent fields keep their stored value.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub overall_progress: Option<f64>,
    pub sections: Option<serde_json::Value>,
}
