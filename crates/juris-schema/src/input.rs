//! The contract every action input implements.

use juris_core::field_errors::FieldErrors;
use serde_json::Value;

/// Parse raw, untyped input into a strongly typed, normalized value.
///
/// Implementations never panic and never perform I/O. Every field is checked
/// and all problems are reported together.
pub trait InputSchema: Sized {
    /// # Errors
    ///
    /// Returns the field-level errors found in `raw`.
    fn parse(raw: &Value) -> Result<Self, FieldErrors>;
}

/// Inputs that carry no fields accept any object (and `null`).
impl InputSchema for () {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        match raw {
            Value::Null | Value::Object(_) => Ok(()),
            _ => Err(FieldErrors::single(
                juris_core::field_errors::ROOT_FIELD,
                "expected an object",
            )),
        }
    }
}
