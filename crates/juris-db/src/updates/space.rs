//! Space update builder.

use juris_core::enums::SpaceType;
use serde::Serialize;

use super::{Assignments, set, set_nullable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpaceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_type: Option<SpaceType>,
}

impl SpaceUpdate {
    #[must_use]
    pub fn assignments(&self) -> Assignments {
        let mut out = Assignments::new();
        set(&mut out, "name", self.name.clone());
        set_nullable(&mut out, "description", self.description.clone());
        set(&mut out, "space_type", self.space_type.map(SpaceType::as_str));
        out
    }
}

pub struct SpaceUpdateBuilder(SpaceUpdate);

impl SpaceUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SpaceUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn space_type(mut self, space_type: SpaceType) -> Self {
        self.0.space_type = Some(space_type);
        self
    }

    #[must_use]
    pub fn build(self) -> SpaceUpdate {
        self.0
    }
}

impl Default for SpaceUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
