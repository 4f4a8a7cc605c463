//! Action error taxonomy.
//!
//! Every action resolves to an `ActionResult`; the failures it can carry are
//! the variants below. Expected failures (validation, authentication,
//! authorization, not-found) are values, never panics. `Internal` is the
//! only variant produced from unexpected failures, and its message never
//! carries raw database or driver text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::EntityType;
use crate::field_errors::FieldErrors;

/// Message used for every unexpected failure surfaced to callers.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Message used when an action's output does not match its registered schema.
pub const OUTPUT_VALIDATION_MESSAGE: &str = "Output validation failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Malformed or out-of-range input.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// No valid session.
    #[error("Not authenticated: {0}")]
    Authentication(String),

    /// Valid session, but the tenant is not accessible to the caller.
    #[error("Not authorized: {0}")]
    Authorization(String),

    /// Entity absent, soft-deleted, or owned by another tenant.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityType, id: String },

    /// Unexpected failure. The message is safe to show to callers.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ActionError {
    #[must_use]
    pub fn not_found(entity: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// A single-field validation error.
    #[must_use]
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    /// Generic internal error with the caller-safe message.
    #[must_use]
    pub fn internal() -> Self {
        Self::Internal(INTERNAL_ERROR_MESSAGE.to_string())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Discriminant of `ActionError`, as serialized in `ErrorBody.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(
            ActionError::invalid("name", "is required").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ActionError::not_found(EntityType::Client, "cli-1").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(ActionError::internal().kind(), ErrorKind::Internal);
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = ActionError::not_found(EntityType::Process, "prc-1");
        assert_eq!(err.to_string(), "process not found: prc-1");
    }
}
