//! Core data models for the course marketplace.
//!
//! These entities map cleanly to database tables via `sqlx::FromRow` and
//! serialize naturally as JSON via `serde`. User metadata is the exception:
//! it is never stored locally, only relayed to the identity service.

pub mod course;
pub mod progress;
pub mod transaction;
pub mod user;

use serde::{Deserialize, Serialize};

/// The `{message, data}` response wrapper used by authenticated endpoints.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
