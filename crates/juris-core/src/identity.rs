use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by the authentication gate in `juris-auth`, consumed by
/// `juris-actions` to resolve the caller's account. Contains only data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuthIdentity {
    /// External identity-provider user ID. One-to-one with an account.
    pub user_id: String,
    /// Session the identity was resolved from.
    pub session_id: String,
}
