use juris_core::enums::SpaceType;
use juris_core::field_errors::FieldErrors;
use juris_core::ids::PREFIX_SPACE;
use juris_db::repos::space::{NewSpace, SpaceFilter};
use juris_db::updates::space::SpaceUpdate;
use juris_schema::{Fields, InputSchema, present};
use serde_json::Value;

use super::Paging;
use crate::orchestrator::SpaceScoped;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSpaceInput {
    pub new: NewSpace,
}

impl InputSchema for CreateSpaceInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let name = f.required_string("name");
        let description = f.optional_text("description");
        let space_type = f.optional_enum("space_type").unwrap_or(SpaceType::Individual);
        f.finish()?;
        Ok(Self {
            new: NewSpace {
                name: present(name, "name")?,
                description,
                space_type,
            },
        })
    }
}

/// A space addressed by its own ID: `{ id }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceIdInput {
    pub id: String,
}

impl InputSchema for SpaceIdInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let id = f.required_id("id", PREFIX_SPACE);
        f.finish()?;
        Ok(Self {
            id: present(id, "id")?,
        })
    }
}

impl SpaceScoped for SpaceIdInput {
    fn space_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSpacesInput {
    pub paging: Paging,
    pub filter: SpaceFilter,
}

impl InputSchema for ListSpacesInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let paging = Paging::read(&mut f);
        let space_type = f.optional_enum("space_type");
        f.finish()?;
        Ok(Self {
            paging,
            filter: SpaceFilter { space_type },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSpaceInput {
    pub id: String,
    pub patch: SpaceUpdate,
}

impl InputSchema for UpdateSpaceInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let id = f.required_id("id", PREFIX_SPACE);
        let name = f.optional_string("name");
        let description = f.nullable_text("description");
        let space_type = f.optional_enum("space_type");
        f.finish()?;
        Ok(Self {
            id: present(id, "id")?,
            patch: SpaceUpdate {
                name,
                description,
                space_type,
            },
        })
    }
}

impl SpaceScoped for UpdateSpaceInput {
    fn space_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn create_defaults_to_individual() {
        let input = CreateSpaceInput::parse(&json!({ "name": "Silva" })).unwrap();
        assert_eq!(input.new.space_type, SpaceType::Individual);
    }

    #[test]
    fn create_accepts_loose_enum() {
        let input = CreateSpaceInput::parse(&json!({ "name": "Silva", "space_type": "FIRM" }))
            .unwrap();
        assert_eq!(input.new.space_type, SpaceType::Firm);
    }

    #[test]
    fn create_reports_all_errors_together() {
        let errors =
            CreateSpaceInput::parse(&json!({ "name": "  ", "space_type": "guild" })).unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("space_type"));
    }

    #[test]
    fn update_can_clear_description() {
        let input = UpdateSpaceInput::parse(&json!({ "id": "spc-00000001", "description": null }))
            .unwrap();
        assert_eq!(input.patch.description, Some(None));
        assert_eq!(input.patch.name, None);
    }
}
