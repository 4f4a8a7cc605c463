//! Per-request ambient state.
//!
//! A [`RequestContext`] is built once per inbound request and dropped with
//! it. It carries the caller's session token and a [`RequestCache`] that
//! memoizes the lookups every action repeats (identity, account, space
//! role). Nothing in it outlives the request.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use juris_core::entities::Account;
use juris_core::enums::MemberRole;
use juris_core::errors::ActionError;
use juris_core::identity::AuthIdentity;
use tokio::sync::OnceCell;

/// Memoized lookups for one request.
///
/// Each slot is a `OnceCell`, so concurrent callers asking for the same
/// value within the request share a single lookup. Failed lookups are not
/// cached.
#[derive(Debug, Default)]
pub struct RequestCache {
    identity: OnceCell<AuthIdentity>,
    account: OnceCell<Account>,
    roles: Mutex<HashMap<String, Arc<OnceCell<Option<MemberRole>>>>>,
}

impl RequestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the caller's identity once.
    ///
    /// # Errors
    ///
    /// Returns whatever `init` returns; the error is not cached.
    pub async fn identity<F, Fut>(&self, init: F) -> Result<&AuthIdentity, ActionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AuthIdentity, ActionError>>,
    {
        self.identity.get_or_try_init(init).await
    }

    /// Resolve the caller's account once.
    ///
    /// # Errors
    ///
    /// Returns whatever `init` returns; the error is not cached.
    pub async fn account<F, Fut>(&self, init: F) -> Result<&Account, ActionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Account, ActionError>>,
    {
        self.account.get_or_try_init(init).await
    }

    /// Resolve the caller's role in `space_id` once.
    ///
    /// # Errors
    ///
    /// Returns whatever `init` returns; the error is not cached.
    pub async fn space_role<F, Fut>(
        &self,
        space_id: &str,
        init: F,
    ) -> Result<Option<MemberRole>, ActionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<MemberRole>, ActionError>>,
    {
        let slot = {
            let mut roles = self.roles.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(roles.entry(space_id.to_string()).or_default())
        };
        slot.get_or_try_init(init).await.copied()
    }

    /// Drop the memoized role for a space (after the space is deleted).
    pub fn forget_space(&self, space_id: &str) {
        self.roles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(space_id);
    }
}

/// Ambient state of one request.
#[derive(Debug, Default)]
pub struct RequestContext {
    session_token: Option<String>,
    cache: RequestCache,
}

impl RequestContext {
    /// Context for a request carrying `session_token` (or none).
    #[must_use]
    pub fn new(session_token: Option<String>) -> Self {
        Self {
            session_token,
            cache: RequestCache::new(),
        }
    }

    /// Context for an unauthenticated request.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    #[must_use]
    pub const fn cache(&self) -> &RequestCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use pretty_assertions::assert_eq;

    fn identity() -> AuthIdentity {
        AuthIdentity {
            user_id: "user_1".into(),
            session_id: "ses-00000001".into(),
        }
    }

    #[tokio::test]
    async fn identity_is_looked_up_once() {
        let cache = RequestCache::new();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        for _ in 0..3 {
            let got = cache
                .identity(move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(identity())
                })
                .await
                .unwrap();
            assert_eq!(got.user_id, "user_1");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_role_lookups_share_one_call() {
        let cache = RequestCache::new();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let lookup = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(Some(MemberRole::Admin))
        };

        let (a, b) = tokio::join!(
            cache.space_role("spc-1", lookup),
            cache.space_role("spc-1", lookup)
        );
        assert_eq!(a.unwrap(), Some(MemberRole::Admin));
        assert_eq!(b.unwrap(), Some(MemberRole::Admin));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.space_role("spc-2", lookup).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = RequestCache::new();
        let first = cache
            .identity(|| async { Err(ActionError::Authentication("no session".into())) })
            .await;
        assert!(first.is_err());
        let second = cache.identity(|| async { Ok(identity()) }).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn forgotten_space_is_looked_up_again() {
        let cache = RequestCache::new();
        cache
            .space_role("spc-1", || async { Ok(Some(MemberRole::Owner)) })
            .await
            .unwrap();
        cache.forget_space("spc-1");
        let role = cache
            .space_role("spc-1", || async { Ok(None) })
            .await
            .unwrap();
        assert_eq!(role, None);
    }
}
