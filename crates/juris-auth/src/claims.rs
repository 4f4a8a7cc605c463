use chrono::{DateTime, Utc};
use juris_core::identity::AuthIdentity;
use serde::{Deserialize, Serialize};

/// A session as seen by the authentication gate.
///
/// Produced by a [`SessionLookup`](crate::gate::SessionLookup) implementation,
/// consumed by [`AuthGate`](crate::gate::AuthGate) to decide whether the
/// caller is authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Session ID (`ses-…`).
    pub session_id: String,
    /// External identity-provider user ID the session belongs to.
    pub user_id: String,
    /// Session expiration time.
    pub expires_at: DateTime<Utc>,
    /// Set when the session was explicitly revoked (logout).
    pub revoked_at: Option<DateTime<Utc>>,
}

impl SessionClaims {
    /// Convert to a lightweight `AuthIdentity` for cross-crate passing.
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
        }
    }

    #[must_use]
    pub const fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Check if the session is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}
