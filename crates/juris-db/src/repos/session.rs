//! Session storage and the [`SessionLookup`] implementation the auth gate
//! reads through.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use juris_auth::{AuthError, SessionClaims, SessionLookup};
use juris_core::ids::PREFIX_SESSION;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_datetime, parse_datetime};
use crate::service::{JurisService, now_string};

fn row_to_claims(row: &libsql::Row) -> Result<SessionClaims, DatabaseError> {
    Ok(SessionClaims {
        session_id: row.get(0)?,
        user_id: row.get(1)?,
        expires_at: parse_datetime(&row.get::<String>(2)?)?,
        revoked_at: get_opt_datetime(row, 3)?,
    })
}

impl JurisService {
    /// Issue a new session for `auth_user_id`, valid for `ttl`. Returns the
    /// bearer token and the stored claims.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if token generation or the insert fails.
    pub async fn create_session(
        &self,
        auth_user_id: &str,
        ttl: TimeDelta,
    ) -> Result<(String, SessionClaims), DatabaseError> {
        let token = juris_auth::token::generate()
            .map_err(|e| DatabaseError::InvalidState(e.to_string()))?;
        let id = self.db().generate_id(PREFIX_SESSION).await?;
        let now = Utc::now();
        let expires_at = now + ttl;

        self.db()
            .conn()
            .execute(
                "INSERT INTO sessions (id, token, auth_user_id, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    token.as_str(),
                    auth_user_id,
                    now.to_rfc3339(),
                    expires_at.to_rfc3339()
                ],
            )
            .await?;

        tracing::info!(session_id = %id, auth_user_id, "session created");
        let claims = SessionClaims {
            session_id: id,
            user_id: auth_user_id.to_string(),
            expires_at,
            revoked_at: None,
        };
        Ok((token, claims))
    }

    /// Revoke the session behind `token`. Returns whether a live session
    /// was revoked.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn revoke_session(&self, token: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE sessions SET revoked_at = ?1 WHERE token = ?2 AND revoked_at IS NULL",
                libsql::params![now_string(), token],
            )
            .await?;
        Ok(changed > 0)
    }

    /// Claims of the session behind `token`, revoked or not.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn session_by_token(
        &self,
        token: &str,
    ) -> Result<Option<SessionClaims>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, auth_user_id, expires_at, revoked_at FROM sessions WHERE token = ?1",
                [token],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_claims(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SessionLookup for JurisService {
    async fn find_session(&self, token: &str) -> Result<Option<SessionClaims>, AuthError> {
        self.session_by_token(token).await.map_err(|e| {
            tracing::error!(error = %e, "session lookup failed");
            AuthError::Lookup(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use juris_auth::AuthGate;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn issued_session_authenticates() {
        let svc = test_service().await;
        let (token, claims) = svc
            .create_session("user_1", TimeDelta::hours(24))
            .await
            .unwrap();
        assert!(claims.session_id.starts_with("ses-"));

        let identity = AuthGate::new(&svc).authenticate(Some(&token)).await.unwrap();
        assert_eq!(identity.user_id, "user_1");
        assert_eq!(identity.session_id, claims.session_id);
    }

    #[tokio::test]
    async fn revoked_session_is_rejected() {
        let svc = test_service().await;
        let (token, _) = svc
            .create_session("user_1", TimeDelta::hours(24))
            .await
            .unwrap();
        assert!(svc.revoke_session(&token).await.unwrap());
        assert!(!svc.revoke_session(&token).await.unwrap());

        let err = AuthGate::new(&svc).authenticate(Some(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::NotAuthenticated));
    }

    #[tokio::test]
    async fn expired_session_reports_expiry() {
        let svc = test_service().await;
        let (token, _) = svc
            .create_session("user_1", TimeDelta::hours(-1))
            .await
            .unwrap();
        let err = AuthGate::new(&svc).authenticate(Some(&token)).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
    }
}
