//! Opaque session tokens.
//!
//! A token is 32 random bytes encoded as unpadded base64url (43 characters).
//! Tokens carry no claims; the session row they point to is the source of
//! truth.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::AuthError;

const TOKEN_BYTES: usize = 32;

/// Generate a new random session token.
///
/// # Errors
///
/// Returns `AuthError::TokenGeneration` if the OS random source fails.
pub fn generate() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::TokenGeneration(format!("failed to read random bytes: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Cheap shape check run before any session lookup.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    URL_SAFE_NO_PAD
        .decode(token)
        .is_ok_and(|bytes| bytes.len() == TOKEN_BYTES)
}
