use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated, run `juris auth login`")]
    NotAuthenticated,

    #[error("session expired, run `juris auth login` again")]
    SessionExpired,

    #[error("session lookup failed: {0}")]
    Lookup(String),

    #[error("token generation failed: {0}")]
    TokenGeneration(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Whether this is an expected "no valid identity" outcome rather than
    /// an infrastructure failure.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::SessionExpired)
    }
}
