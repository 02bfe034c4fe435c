//! Transaction handlers. Auth-gated; payment capture itself happens at the
//! provider, these endpoints only record the outcome.

use crate::{
    errors::AppError,
    middleware::AuthContext,
    models::{
        Envelope,
        transaction::{NewTransaction, Transaction},
    },
    services::AppState,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    pub user_id: Option<String>,
}

/// `GET /transactions` — list transactions, optionally for one user.
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(q): Query<ListTransactionsQuery>,
) -> Result<Json<Envelope<Vec<Transaction>>>, AppError> {
    let transactions = state.courses.list_transactions(q.user_id.as_deref()).await?;
    Ok(Json(Envelope::new(
        "Transactions retrieved successfully",
        transactions,
    )))
}

/// `POST /transactions` — record a purchase.
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<NewTransaction>,
) -> Result<Json<Envelope<Transaction>>, AppError> {
    debug!(caller = %ctx.user_id, course = %body.course_id, "creating transaction");
    let transaction = state.courses.create_transaction(body).await?;
    Ok(Json(Envelope::new(
        "Purchased course successfully",
        transaction,
    )))
}
