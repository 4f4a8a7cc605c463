//! # juris-auth
//!
//! Session-based authentication for Juris.
//!
//! Provides the [`AuthGate`] every action passes through, the
//! [`SessionLookup`] seam implemented by the session store in `juris-db`,
//! opaque session token generation (`getrandom` + base64url), and OS keychain
//! token storage for the CLI (`keyring`, with env and file fallbacks).

pub mod claims;
pub mod error;
pub mod gate;
pub mod token;
pub mod token_store;

pub use claims::SessionClaims;
pub use error::AuthError;
pub use gate::{AuthGate, SessionLookup};
pub use token_store::{TokenSource, TokenStore};
