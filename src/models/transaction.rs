//! Purchase transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A completed purchase of a course by a user.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,

    /// Identity-service id of the buyer.
    pub user_id: String,

    pub course_id: String,

    /// Payment provider label (e.g. "stripe"); internals are out of scope.
    pub payment_provider: String,

    pub amount_cents: i64,

    pub created_at: DateTime<Utc>,
}

/// Request body for recording a new transaction.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: String,
    pub course_id: String,
    pub payment_provider: String,
    pub amount_cents: i64,
}
