//! Liveness handler.

/// `GET /`
///
/// Fixed welcome string, no I/O. Always answers 200 regardless of database
/// or identity-service state.
pub async fn welcome() -> &'static str {
    "Welcome to the server!"
}
