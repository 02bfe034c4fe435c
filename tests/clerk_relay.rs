//! The user-metadata relay against a live identity-service stub.

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::Path,
    http::{Request, StatusCode, header},
    routing::patch,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use course_market::{
    routes::routes,
    services::{AppState, clerk_service::ClerkClient, course_service::CourseService},
};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

/// Bind a stub identity service on an ephemeral port, return its base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn app_with_clerk(base_url: &str) -> Router {
    let db = Arc::new(
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap(),
    );
    let courses = CourseService::new(db);
    courses.migrate().await.unwrap();

    routes(AppState {
        courses,
        clerk: ClerkClient::new("sk_test", base_url),
    })
}

fn bearer(user_id: &str) -> String {
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": user_id }).to_string());
    format!("Bearer header.{payload}.sig")
}

fn update_request(user_id: &str) -> Request<Body> {
    Request::patch(format!("/users/clerk/{user_id}"))
        .header(header::AUTHORIZATION, bearer(user_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "publicMetadata": {
                    "userType": "teacher",
                    "settings": { "theme": "dark" }
                }
            })
            .to_string(),
        ))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn relays_identity_service_response_unmodified() {
    // The stub echoes the metadata it was sent inside a user representation.
    let stub = Router::new().route(
        "/users/{user_id}/metadata",
        patch(
            |Path(user_id): Path<String>, Json(body): Json<Value>| async move {
                Json(json!({
                    "id": user_id,
                    "object": "user",
                    "public_metadata": body["public_metadata"],
                }))
            },
        ),
    );
    let base_url = spawn_stub(stub).await;
    let app = app_with_clerk(&base_url).await;

    let response = app.oneshot(update_request("user_7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(
        body["data"],
        json!({
            "id": "user_7",
            "object": "user",
            "public_metadata": {
                "userType": "teacher",
                "settings": { "theme": "dark" }
            }
        })
    );
}

#[tokio::test]
async fn any_identity_service_failure_maps_to_500() {
    // Even a client-class upstream failure (422) surfaces as a 500 envelope.
    let stub = Router::new().route(
        "/users/{user_id}/metadata",
        patch(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": [{ "message": "unknown user" }] })),
            )
        }),
    );
    let base_url = spawn_stub(stub).await;
    let app = app_with_clerk(&base_url).await;

    let response = app.oneshot(update_request("user_missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
    assert!(
        body["error"].as_str().unwrap().contains("422"),
        "error field should carry the upstream detail: {body}"
    );
}

#[tokio::test]
async fn unreachable_identity_service_maps_to_500() {
    // Nothing listens here; the connect error takes the same path.
    let app = app_with_clerk("http://127.0.0.1:9").await;

    let response = app.oneshot(update_request("user_7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
    assert!(!body["error"].as_str().unwrap().is_empty());
}
