use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::{clerk_service::ClerkError, course_service::CourseServiceError};

/// Request-level error union. Every handler failure falls into one of these
/// classes and is answered with the `{message, error}` envelope.
///
/// Upstream identity-service failures are deliberately lossy: a not-found
/// user and a network outage both surface as HTTP 500, matching the relay
/// contract the clients already depend on.
#[derive(Debug, Error)]
pub enum AppError {
    /// The identity service (or another upstream) failed; cause is opaque.
    #[error("{0}")]
    Upstream(String),

    /// Missing or malformed session credential.
    #[error("missing or invalid session credential")]
    Auth,

    /// The request shape was wrong before any business logic ran.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::Upstream(_) | AppError::Internal(_) => "Internal server error",
            AppError::Auth => "Unauthorized",
            AppError::Validation(_) => "Invalid request",
            AppError::NotFound(_) => "Not found",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        let body = Json(json!({
            "message": self.message(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<CourseServiceError> for AppError {
    fn from(err: CourseServiceError) -> Self {
        match err {
            CourseServiceError::CourseNotFound(_) | CourseServiceError::ProgressNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            CourseServiceError::InvalidProgress(_) => AppError::Validation(err.to_string()),
            CourseServiceError::Sqlx(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<ClerkError> for AppError {
    fn from(err: ClerkError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_class() {
        assert_eq!(
            AppError::Upstream("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::Auth.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("missing".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn upstream_failures_collapse_to_internal_server_error() {
        // A not-found user at the identity service is still a 500 here.
        let err = AppError::from(ClerkError::Status {
            status: 404,
            body: "not found".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }
}
