//! Coercing field reader over raw JSON input.
//!
//! Raw input arrives as an untyped `serde_json::Value`, usually built from
//! form fields or CLI arguments where everything is a string. `Fields` reads
//! one field at a time, coerces compatible primitives (`"10"` → `10`,
//! `"2026-11-02"` → date, `"HIGH"` → `high`), and records a message per
//! failing field. Readers return `None` on failure so parsing can continue;
//! call [`Fields::finish`] before assembling the typed value.
//!
//! `null` is treated the same as an absent field, except by the `nullable_*`
//! readers used for partial updates, where `null` means "clear this field".

use chrono::{DateTime, NaiveDate};
use juris_core::field_errors::{FieldErrors, ROOT_FIELD};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Maximum length of short text fields (names, titles, emails).
pub const MAX_SHORT_TEXT: usize = 255;

/// Maximum length of long text fields (descriptions, notes).
pub const MAX_LONG_TEXT: usize = 5000;

/// Field reader that accumulates errors.
pub struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
    errors: FieldErrors,
}

impl<'a> Fields<'a> {
    /// Start reading `raw`. A non-object input records a single `_root`
    /// error and every reader then reports its field as missing or absent.
    #[must_use]
    pub fn new(raw: &'a Value) -> Self {
        match raw {
            Value::Object(map) => Self {
                map: Some(map),
                errors: FieldErrors::new(),
            },
            _ => Self {
                map: None,
                errors: FieldErrors::single(ROOT_FIELD, "expected an object"),
            },
        }
    }

    /// Record an error for a field (cross-field checks).
    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Whether the named field has an error recorded.
    #[must_use]
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains(field)
    }

    /// Finish reading.
    ///
    /// # Errors
    ///
    /// Returns every error recorded while reading.
    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    // -- raw access -----------------------------------------------------------

    /// Raw value of a field; `null` reads as absent.
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map
            .and_then(|m| m.get(name))
            .filter(|v| !v.is_null())
    }

    /// Field present (possibly `null`).
    fn is_present(&self, name: &str) -> bool {
        self.map.is_some_and(|m| m.contains_key(name))
    }

    /// Text of a scalar field: strings are trimmed, numbers and booleans are
    /// rendered. Blank strings read as absent.
    fn text(&mut self, name: &str) -> Option<String> {
        let value = self.get(name)?;
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                self.error(name, "must be a string");
                return None;
            }
        };
        if text.is_empty() { None } else { Some(text) }
    }

    fn check_len(&mut self, name: &str, text: String, max: usize) -> Option<String> {
        if text.chars().count() > max {
            self.error(name, format!("must be at most {max} characters"));
            return None;
        }
        Some(text)
    }

    fn required<T>(&mut self, name: &str, value: Option<T>) -> Option<T> {
        if value.is_none() && !self.has_error(name) {
            self.error(name, "is required");
        }
        value
    }

    // -- strings --------------------------------------------------------------

    pub fn required_string(&mut self, name: &str) -> Option<String> {
        let value = self.optional_string(name);
        self.required(name, value)
    }

    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        let text = self.text(name)?;
        self.check_len(name, text, MAX_SHORT_TEXT)
    }

    /// Long free text (descriptions, notes).
    pub fn optional_text(&mut self, name: &str) -> Option<String> {
        let text = self.text(name)?;
        self.check_len(name, text, MAX_LONG_TEXT)
    }

    /// Patch semantics: absent → `None` (leave unchanged), `null` or blank →
    /// `Some(None)` (clear), text → `Some(Some(text))`.
    pub fn nullable_string(&mut self, name: &str) -> Option<Option<String>> {
        self.nullable(name, |f, n| f.optional_string(n))
    }

    /// Patch semantics over long text. See [`Self::nullable_string`].
    pub fn nullable_text(&mut self, name: &str) -> Option<Option<String>> {
        self.nullable(name, |f, n| f.optional_text(n))
    }

    fn nullable<T>(
        &mut self,
        name: &str,
        read: impl FnOnce(&mut Self, &str) -> Option<T>,
    ) -> Option<Option<T>> {
        if !self.is_present(name) {
            return None;
        }
        let value = read(self, name);
        if self.has_error(name) {
            return None;
        }
        Some(value)
    }

    // -- emails ---------------------------------------------------------------

    pub fn optional_email(&mut self, name: &str) -> Option<String> {
        let text = self.optional_string(name)?;
        if is_email(&text) {
            Some(text.to_lowercase())
        } else {
            self.error(name, "must be a valid email address");
            None
        }
    }

    /// Patch semantics over an email. See [`Self::nullable_string`].
    pub fn nullable_email(&mut self, name: &str) -> Option<Option<String>> {
        self.nullable(name, |f, n| f.optional_email(n))
    }

    // -- numbers --------------------------------------------------------------

    /// Non-negative integer; numeric strings are coerced.
    pub fn optional_u32(&mut self, name: &str) -> Option<u32> {
        let value = self.get(name)?;
        let parsed = match value {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) if s.trim().is_empty() => return None,
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.error(name, "must be a non-negative integer");
        }
        parsed
    }

    // -- dates ----------------------------------------------------------------

    pub fn required_date(&mut self, name: &str) -> Option<NaiveDate> {
        let value = self.optional_date(name);
        self.required(name, value)
    }

    /// Calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp (date part,
    /// in the timestamp's own offset).
    pub fn optional_date(&mut self, name: &str) -> Option<NaiveDate> {
        let text = self.text(name)?;
        let parsed = NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(&text).ok().map(|dt| dt.date_naive()));
        if parsed.is_none() {
            self.error(name, "must be a date (YYYY-MM-DD)");
        }
        parsed
    }

    // -- enums ----------------------------------------------------------------

    pub fn required_enum<T: DeserializeOwned>(&mut self, name: &str) -> Option<T> {
        let value = self.optional_enum(name);
        self.required(name, value)
    }

    /// Snake-case enum, matched case-insensitively; `-` and spaces are
    /// accepted in place of `_`.
    pub fn optional_enum<T: DeserializeOwned>(&mut self, name: &str) -> Option<T> {
        let text = self.text(name)?;
        match parse_enum_loose::<T>(&text) {
            Some(value) => Some(value),
            None => {
                self.error(name, format!("'{text}' is not an accepted value"));
                None
            }
        }
    }

    // -- identifiers ----------------------------------------------------------

    pub fn required_id(&mut self, name: &str, prefix: &str) -> Option<String> {
        let value = self.optional_id(name, prefix);
        self.required(name, value)
    }

    /// Entity ID carrying the expected prefix (`cli-…`, `prc-…`).
    pub fn optional_id(&mut self, name: &str, prefix: &str) -> Option<String> {
        let text = self.optional_string(name)?;
        if juris_core::ids::has_prefix(&text, prefix) {
            Some(text)
        } else {
            self.error(name, format!("must be an id starting with '{prefix}-'"));
            None
        }
    }

    /// Patch semantics over an ID. See [`Self::nullable_string`].
    pub fn nullable_id(&mut self, name: &str, prefix: &str) -> Option<Option<String>> {
        self.nullable(name, |f, n| f.optional_id(n, prefix))
    }

    // -- custom ---------------------------------------------------------------

    pub fn required_with<T>(
        &mut self,
        name: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let value = self.optional_with(name, parse);
        self.required(name, value)
    }

    /// Read a text field and convert it with `parse`, recording its error.
    pub fn optional_with<T>(
        &mut self,
        name: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let text = self.text(name)?;
        match parse(&text) {
            Ok(value) => Some(value),
            Err(message) => {
                self.error(name, message);
                None
            }
        }
    }
}

/// Unwrap a reader result after [`Fields::finish`] succeeded.
///
/// A missing value here means a required reader was skipped; it is reported
/// as a field error rather than a panic.
///
/// # Errors
///
/// Returns a single "is required" error for `field` when `value` is `None`.
pub fn present<T>(value: Option<T>, field: &str) -> Result<T, FieldErrors> {
    value.ok_or_else(|| FieldErrors::single(field, "is required"))
}

/// Parse a snake-case enum loosely (case-insensitive, `-`/space as `_`).
#[must_use]
pub fn parse_enum_loose<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let normalized = raw.trim().to_lowercase().replace(['-', ' '], "_");
    serde_json::from_value(Value::String(normalized)).ok()
}

/// Keep only ASCII digits.
#[must_use]
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn is_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
