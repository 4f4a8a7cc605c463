//! Authentication gate.
//!
//! Resolves the caller's identity from the session token carried in the
//! request. Missing, malformed, unknown, and revoked tokens all read as
//! "not authenticated"; a token past its expiry reads as "session expired".
//! Neither is logged as an error.

use async_trait::async_trait;
use chrono::Utc;
use juris_core::identity::AuthIdentity;

use crate::claims::SessionClaims;
use crate::error::AuthError;
use crate::token;

/// Warn when a session expires within this many seconds.
const EXPIRY_BUFFER_SECS: i64 = 3600;

/// Read-only access to the session layer.
#[async_trait]
pub trait SessionLookup: Send + Sync {
    /// Find the session a token points to, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Lookup` when the session store itself fails.
    async fn find_session(&self, token: &str) -> Result<Option<SessionClaims>, AuthError>;
}

/// Gate in front of every action.
pub struct AuthGate<'a, L: SessionLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: SessionLookup + ?Sized> AuthGate<'a, L> {
    #[must_use]
    pub const fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// Resolve the identity behind `token`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` or `AuthError::SessionExpired`
    /// when there is no valid session, and `AuthError::Lookup` when the
    /// session store fails.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<AuthIdentity, AuthError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Err(AuthError::NotAuthenticated);
        };
        if !token::is_well_formed(token) {
            tracing::debug!("rejecting malformed session token");
            return Err(AuthError::NotAuthenticated);
        }

        let Some(claims) = self.lookup.find_session(token).await? else {
            return Err(AuthError::NotAuthenticated);
        };
        if claims.is_revoked() {
            return Err(AuthError::NotAuthenticated);
        }
        if claims.is_expired_at(Utc::now()) {
            return Err(AuthError::SessionExpired);
        }
        if claims.is_near_expiry(EXPIRY_BUFFER_SECS) {
            tracing::warn!(
                expires_at = %claims.expires_at,
                "session expires within {EXPIRY_BUFFER_SECS}s, re-authenticate with `juris auth login`",
            );
        }

        tracing::debug!(session_id = %claims.session_id, "authenticated");
        Ok(claims.to_identity())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, TimeDelta};

    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct FakeSessions {
        sessions: HashMap<String, SessionClaims>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeSessions {
        fn with(token: &str, expires_at: DateTime<Utc>, revoked: bool) -> Self {
            let mut sessions = HashMap::new();
            sessions.insert(
                token.to_string(),
                SessionClaims {
                    session_id: "ses-00000001".into(),
                    user_id: "user_1".into(),
                    expires_at,
                    revoked_at: revoked.then(Utc::now),
                },
            );
            Self {
                sessions,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl SessionLookup for FakeSessions {
        async fn find_session(&self, token: &str) -> Result<Option<SessionClaims>, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AuthError::Lookup("store offline".into()));
            }
            Ok(self.sessions.get(token).cloned())
        }
    }

    #[tokio::test]
    async fn valid_session_yields_identity() {
        let token = token::generate().unwrap();
        let store = FakeSessions::with(&token, Utc::now() + TimeDelta::days(1), false);
        let identity = AuthGate::new(&store)
            .authenticate(Some(&token))
            .await
            .unwrap();
        assert_eq!(identity.user_id, "user_1");
        assert_eq!(identity.session_id, "ses-00000001");
    }

    #[tokio::test]
    async fn missing_token_skips_lookup() {
        let store = FakeSessions::default();
        let gate = AuthGate::new(&store);
        assert!(matches!(
            gate.authenticate(None).await,
            Err(AuthError::NotAuthenticated)
        ));
        assert!(matches!(
            gate.authenticate(Some("  ")).await,
            Err(AuthError::NotAuthenticated)
        ));
        assert!(matches!(
            gate.authenticate(Some("short")).await,
            Err(AuthError::NotAuthenticated)
        ));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_token_is_not_authenticated() {
        let store = FakeSessions::default();
        let token = token::generate().unwrap();
        let err = AuthGate::new(&store)
            .authenticate(Some(&token))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
        assert!(err.is_unauthenticated());
    }

    #[tokio::test]
    async fn expired_session() {
        let token = token::generate().unwrap();
        let store = FakeSessions::with(&token, Utc::now() - TimeDelta::minutes(1), false);
        let err = AuthGate::new(&store)
            .authenticate(Some(&token))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
    }

    #[tokio::test]
    async fn revoked_session() {
        let token = token::generate().unwrap();
        let store = FakeSessions::with(&token, Utc::now() + TimeDelta::days(1), true);
        let err = AuthGate::new(&store)
            .authenticate(Some(&token))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
    }

    #[tokio::test]
    async fn store_failure_is_not_an_auth_outcome() {
        let store = FakeSessions {
            fail: true,
            ..FakeSessions::default()
        };
        let token = token::generate().unwrap();
        let err = AuthGate::new(&store)
            .authenticate(Some(&token))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Lookup(_)));
        assert!(!err.is_unauthenticated());
    }
}
