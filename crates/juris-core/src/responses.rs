//! Response shapes returned by actions.
//!
//! `ActionResult<T>` is the uniform envelope every action resolves to:
//! `{ data, success, message?, error? }`. Callers branch on `success` and
//! display `message`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{ActionError, ErrorKind};
use crate::field_errors::FieldErrors;

/// Reference to a created, updated, or deleted entity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntityRef {
    pub id: String,
}

impl EntityRef {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// One page of a tenant-scoped listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matching rows, ignoring `limit`/`offset`.
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn empty(limit: u32, offset: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit,
            offset,
        }
    }

    /// Whether rows exist beyond this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.offset) + (self.items.len() as u64) < self.total
    }
}

/// Error payload of a failed action.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl From<&ActionError> for ErrorBody {
    fn from(error: &ActionError) -> Self {
        let fields = match error {
            ActionError::Validation(fields) => Some(fields.clone()),
            _ => None,
        };
        Self {
            kind: error.kind(),
            message: error.to_string(),
            fields,
        }
    }
}

/// Uniform envelope returned by every action.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActionResult<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ActionResult<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set `message` on a successful result only; failures keep the error
    /// message.
    #[must_use]
    pub fn on_success(self, message: impl Into<String>) -> Self {
        if self.success {
            self.with_message(message)
        } else {
            self
        }
    }

    #[must_use]
    pub fn fail(error: &ActionError) -> Self {
        let body = ErrorBody::from(error);
        Self {
            data: None,
            success: false,
            message: Some(body.message.clone()),
            error: Some(body),
        }
    }

    /// Kind of the carried error, if any.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    /// Convert into a `Result`, for callers that prefer `?`.
    ///
    /// # Errors
    ///
    /// Returns the error body of a failed result, or an internal body if a
    /// successful result unexpectedly carries no data.
    pub fn into_result(self) -> Result<T, ErrorBody> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            _ => Err(ErrorBody::from(&ActionError::internal())),
        }
    }
}

impl<T> From<Result<T, ActionError>> for ActionResult<T> {
    fn from(result: Result<T, ActionError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::fail(&error),
        }
    }
}
