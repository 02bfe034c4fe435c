//! User metadata relayed to the identity service.

use serde::{Deserialize, Serialize};

/// Body of `PATCH /users/clerk/{userId}`.
///
/// This is a full replace of the identity service's stored public metadata,
/// never a merge; the service itself is the system of record.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserMetadataUpdate {
    pub public_metadata: PublicMetadata,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PublicMetadata {
    pub user_type: UserType,

    /// Opaque per-user settings bag, relayed untouched.
    #[serde(default)]
    pub settings: serde_json::Value,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Teacher,
}
