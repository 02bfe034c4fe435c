//! On-demand invocation adapter.
//!
//! Wraps the same router used by the TCP listener so the service can run as
//! a per-event function. An event is either the administrative seed command
//! or an HTTP request envelope; the two are never conflated — seeding skips
//! all HTTP middleware and auth gating.

use crate::seed;
use crate::services::course_service::CourseService;
use anyhow::{Context, Result};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Uri},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower::ServiceExt;
use tracing::info;

/// An invocation event. `{"action": "seed"}` selects the seed branch; any
/// other shape must be an HTTP request envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Event {
    Seed(SeedCommand),
    Http(HttpInvocation),
}

#[derive(Debug, Deserialize)]
pub struct SeedCommand {
    #[allow(dead_code)]
    pub action: SeedAction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedAction {
    Seed,
}

/// HTTP request envelope, in the shape the invocation runtime delivers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpInvocation {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Dispatch one event: seed directly, or replay the HTTP envelope through
/// the router and shape the response back into an invocation response.
pub async fn handle_event(
    event: Event,
    router: Router,
    courses: &CourseService,
) -> Result<InvocationResponse> {
    match event {
        Event::Seed(_) => {
            seed::seed(courses).await?;
            info!("seed invocation complete");
            Ok(InvocationResponse {
                status_code: 200,
                headers: HashMap::new(),
                body: serde_json::json!({ "message": "Database seeded successfully" })
                    .to_string(),
            })
        }
        Event::Http(envelope) => relay_http(envelope, router).await,
    }
}

async fn relay_http(envelope: HttpInvocation, router: Router) -> Result<InvocationResponse> {
    let method = Method::try_from(envelope.http_method.as_str())
        .with_context(|| format!("invalid HTTP method `{}`", envelope.http_method))?;

    let uri: Uri = match query_string(envelope.query_string_parameters.as_ref()) {
        Some(qs) => format!("{}?{}", envelope.path, qs),
        None => envelope.path.clone(),
    }
    .parse()
    .with_context(|| format!("invalid request path `{}`", envelope.path))?;

    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in &envelope.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let request = builder
        .body(Body::from(envelope.body.unwrap_or_default()))
        .context("building request from invocation envelope")?;

    let response = router.oneshot(request).await?;

    let status_code = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .context("reading response body")?;

    Ok(InvocationResponse {
        status_code,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn query_string(params: Option<&HashMap<String, String>>) -> Option<String> {
    let params = params.filter(|p| !p.is_empty())?;
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    Some(serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_event_parses_as_seed_command() {
        let event: Event = serde_json::from_str(r#"{ "action": "seed" }"#).unwrap();
        assert!(matches!(event, Event::Seed(_)));
    }

    #[test]
    fn http_envelope_parses_as_http_event() {
        let event: Event = serde_json::from_str(
            r#"{ "httpMethod": "GET", "path": "/courses",
                 "queryStringParameters": { "category": "Design" } }"#,
        )
        .unwrap();
        match event {
            Event::Http(env) => {
                assert_eq!(env.http_method, "GET");
                assert_eq!(env.path, "/courses");
            }
            Event::Seed(_) => panic!("parsed as seed"),
        }
    }

    #[test]
    fn query_parameters_are_percent_encoded() {
        let params = HashMap::from([("category".to_string(), "C & More = Fun".to_string())]);
        let qs = query_string(Some(&params)).unwrap();
        assert_eq!(qs, "category=C+%26+More+%3D+Fun");

        // The resulting URI must stay parseable.
        let uri: Uri = format!("/courses?{qs}").parse().unwrap();
        assert_eq!(uri.path(), "/courses");
    }

    #[test]
    fn empty_query_parameters_are_omitted() {
        assert_eq!(query_string(None), None);
        assert_eq!(query_string(Some(&HashMap::new())), None);
    }

    #[test]
    fn unknown_action_is_not_a_seed_command() {
        // Anything that is not the seed command must be an HTTP envelope,
        // and this shape is neither.
        let event: Result<Event, _> = serde_json::from_str(r#"{ "action": "drop" }"#);
        assert!(event.is_err());
    }
}
