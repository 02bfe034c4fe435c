//! Course records as stored by the course repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course listed on the marketplace.
///
/// Courses are authored elsewhere; the API surface in this crate only ever
/// reads them (listing, detail) or bumps the enrollment counter when a
/// transaction lands.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Stable unique identifier.
    pub course_id: String,

    /// Identity-service id of the teacher who owns the course.
    pub teacher_id: String,

    pub teacher_name: String,

    pub title: String,

    pub description: Option<String>,

    /// Browsing category (e.g. "Web Development").
    pub category: String,

    /// Cover image URL.
    pub image: Option<String>,

    /// Price in cents; `None` means free.
    pub price_cents: Option<i64>,

    pub level: CourseLevel,

    pub status: CourseStatus,

    /// Number of enrollments recorded against this course.
    pub enrollments: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum CourseStatus {
    Draft,
    Published,
}
