//! Router composition for the course marketplace.
//!
//! ## Structure
//! - **Public endpoints**
//!   - `GET  /` — liveness text
//!   - `GET  /courses` — list published courses (supports `?category=`)
//!   - `GET  /courses/{courseId}` — course detail
//!
//! - **Auth-gated endpoints** (valid session credential required)
//!   - `PATCH /users/clerk/{userId}` — relay metadata update to Clerk
//!   - `GET|POST /transactions` — list / record purchases
//!   - `GET|PUT  /users/course-progress/{userId}/{courseId}`
//!
//! Layer order (outermost first): panic boundary, CORS, access log,
//! security headers. The auth gate applies only to the protected routes and
//! rejects before any handler runs.

use crate::{
    handlers::{
        course_handlers::{get_course, list_courses},
        health_handlers::welcome,
        progress_handlers::{get_progress, update_progress},
        transaction_handlers::{create_transaction, list_transactions},
        user_clerk_handlers::update_user,
    },
    middleware::{require_auth, security_headers},
    services::AppState,
};
use axum::{
    Router,
    http::{Response, StatusCode, header},
    middleware,
    routing::{get, patch},
};
use bytes::Bytes;
use http_body_util::Full;
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Build the application router with shared state attached.
pub fn routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(welcome))
        .route("/courses", get(list_courses))
        .route("/courses/{course_id}", get(get_course));

    let protected = Router::new()
        .route("/users/clerk/{user_id}", patch(update_user))
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/users/course-progress/{user_id}/{course_id}",
            get(get_progress).put(update_progress),
        )
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Terminal boundary for handler panics: log the payload and answer a
/// generic plain-text 500. Each request fails independently; the process
/// keeps serving.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Full<Bytes>> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("handler panicked: {detail}");

    let mut response = Response::new(Full::from("Something broke!"));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
