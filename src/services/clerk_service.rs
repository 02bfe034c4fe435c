//! ClerkClient — the identity gateway. A stateless relay around the Clerk
//! REST API: it shapes the request, forwards it, and surfaces the response
//! or error. No retries, no local copy of user data.

use crate::models::user::PublicMetadata;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClerkError {
    #[error("identity service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity service returned status {status}: {body}")]
    Status { status: u16, body: String },
}

pub type ClerkResult<T> = Result<T, ClerkError>;

/// Shared client for the external identity service. Cheap to clone; the
/// inner `reqwest::Client` pools connections and is safe for concurrent use.
#[derive(Clone)]
pub struct ClerkClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl ClerkClient {
    /// `base_url` is the API root without a trailing slash, e.g.
    /// `https://api.clerk.com/v1`. Injectable so tests can point at a stub.
    pub fn new(secret_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Replace the stored public metadata for `user_id`.
    ///
    /// This is a full overwrite of the `userType`/`settings` fields, not a
    /// merge. Returns the identity service's updated user representation
    /// unmodified, so callers can relay it byte-for-byte.
    pub async fn update_user_metadata(
        &self,
        user_id: &str,
        metadata: &PublicMetadata,
    ) -> ClerkResult<Value> {
        let url = format!("{}/users/{}/metadata", self.base_url, user_id);
        debug!(%user_id, "updating user metadata");

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.secret_key)
            .json(&json!({ "public_metadata": metadata }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClerkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
