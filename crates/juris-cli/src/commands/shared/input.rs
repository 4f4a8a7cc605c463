//! Raw action input assembled from command-line arguments.
//!
//! Commands never validate: they only shape strings into the JSON object
//! the action's input schema reads, so the CLI reports exactly the field
//! errors any other caller would get.

use serde_json::{Map, Value};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PageArgs;

#[derive(Debug, Default)]
pub struct InputBuilder(Map<String, Value>);

impl InputBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Set `key` only when a value was given.
    #[must_use]
    pub fn opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Send `null` for each named field, which patch inputs read as "clear".
    #[must_use]
    pub fn clear(mut self, fields: &[String]) -> Self {
        for field in fields {
            self.0.insert(field.replace('-', "_"), Value::Null);
        }
        self
    }

    /// Search, offset and the global `--limit`.
    #[must_use]
    pub fn page(self, page: &PageArgs, flags: &GlobalFlags) -> Self {
        self.opt("search", page.search.clone())
            .opt("offset", page.offset)
            .opt("limit", flags.limit)
    }

    #[must_use]
    pub fn build(self) -> Value {
        Value::Object(self.0)
    }
}
