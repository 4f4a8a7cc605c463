//! Action inputs.
//!
//! Each input implements [`InputSchema`] with a [`Fields`] reader: every
//! field is read, every problem is recorded, and the typed value is built
//! only once the reader finishes without errors.

pub mod account;
pub mod client;
pub mod deadline;
pub mod process;
pub mod space;

use juris_core::field_errors::FieldErrors;
use juris_core::ids::PREFIX_SPACE;
use juris_db::ListQuery;
use juris_schema::{Fields, InputSchema, present};
use serde_json::Value;

use crate::orchestrator::SpaceScoped;

/// Search and paging parameters shared by every list input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paging {
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Paging {
    pub(crate) fn read(f: &mut Fields<'_>) -> Self {
        Self {
            search: f.optional_string("search"),
            limit: f.optional_u32("limit"),
            offset: f.optional_u32("offset").unwrap_or(0),
        }
    }

    #[must_use]
    pub fn query<F>(&self, filter: F) -> ListQuery<F> {
        ListQuery {
            search: self.search.clone(),
            limit: self.limit,
            offset: self.offset,
            filter,
        }
    }
}

/// An entity addressed by ID inside a space: `{ space_id, id }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedId {
    pub space_id: String,
    pub id: String,
}

impl InputSchema for ScopedId {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let id = f.required_string("id");
        f.finish()?;
        Ok(Self {
            space_id: present(space_id, "space_id")?,
            id: present(id, "id")?,
        })
    }
}

impl SpaceScoped for ScopedId {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}
