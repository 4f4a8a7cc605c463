//! Central schema registry for action outputs.
//!
//! The `SchemaRegistry` builds JSON Schemas from juris-core types at
//! construction time using [`schemars::schema_for!`] and validates action
//! results against them via `jsonschema` before they leave an action.

use std::collections::HashMap;

use juris_core::entities::{Account, Client, Deadline, Process, Space, SpaceMember};
use juris_core::responses::{EntityRef, Page};
use schemars::schema_for;

use crate::error::SchemaError;

/// Registered schema names.
pub mod names {
    pub const ACCOUNT: &str = "account";
    pub const SPACE: &str = "space";
    pub const SPACE_PAGE: &str = "space_page";
    pub const SPACE_MEMBERS: &str = "space_members";
    pub const CLIENT: &str = "client";
    pub const CLIENT_PAGE: &str = "client_page";
    pub const PROCESS: &str = "process";
    pub const PROCESS_PAGE: &str = "process_page";
    pub const DEADLINE: &str = "deadline";
    pub const DEADLINE_PAGE: &str = "deadline_page";
    pub const ENTITY_REF: &str = "entity_ref";
}

/// Store of every output schema, keyed by name.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a registry containing every entity, page, and reference schema.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema. This is not expected in practice because `schemars` always
    /// produces valid JSON-serialisable output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, names::ACCOUNT, Account);
        register!(schemas, names::SPACE, Space);
        register!(schemas, names::SPACE_PAGE, Page<Space>);
        register!(schemas, names::SPACE_MEMBERS, Vec<SpaceMember>);
        register!(schemas, names::CLIENT, Client);
        register!(schemas, names::CLIENT_PAGE, Page<Client>);
        register!(schemas, names::PROCESS, Process);
        register!(schemas, names::PROCESS_PAGE, Page<Process>);
        register!(schemas, names::DEADLINE, Deadline);
        register!(schemas, names::DEADLINE_PAGE, Page<Deadline>);
        register!(schemas, names::ENTITY_REF, EntityRef);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Serialize `value` and validate it against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if `value` cannot be serialized,
    /// otherwise whatever [`Self::validate`] returns.
    pub fn validate_output<T: serde::Serialize>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), SchemaError> {
        let instance =
            serde_json::to_value(value).map_err(|e| SchemaError::Generation(e.to_string()))?;
        self.validate(name, &instance)
    }

}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
