use juris_core::enums::{DeadlinePriority, DeadlineStatus};
use juris_core::field_errors::FieldErrors;
use juris_core::ids::{PREFIX_PROCESS, PREFIX_SPACE};
use juris_db::repos::deadline::{DeadlineFilter, NewDeadline};
use juris_db::updates::deadline::DeadlineUpdate;
use juris_schema::{Fields, InputSchema, present};
use serde_json::Value;

use super::Paging;
use crate::orchestrator::SpaceScoped;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDeadlineInput {
    pub space_id: String,
    pub new: NewDeadline,
}

impl InputSchema for CreateDeadlineInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let process_id = f.required_id("process_id", PREFIX_PROCESS);
        let title = f.required_string("title");
        let description = f.optional_text("description");
        let due_date = f.required_date("due_date");
        let priority = f.optional_enum("priority").unwrap_or(DeadlinePriority::Medium);
        let status = f.optional_enum("status").unwrap_or(DeadlineStatus::Open);
        f.finish()?;

        Ok(Self {
            space_id: present(space_id, "space_id")?,
            new: NewDeadline {
                process_id: present(process_id, "process_id")?,
                title: present(title, "title")?,
                description,
                due_date: present(due_date, "due_date")?,
                priority,
                status,
            },
        })
    }
}

impl SpaceScoped for CreateDeadlineInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDeadlinesInput {
    pub space_id: String,
    pub paging: Paging,
    pub filter: DeadlineFilter,
}

impl InputSchema for ListDeadlinesInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let paging = Paging::read(&mut f);
        let status = f.optional_enum("status");
        let priority = f.optional_enum("priority");
        let process_id = f.optional_id("process_id", PREFIX_PROCESS);
        let due_before = f.optional_date("due_before");
        let due_after = f.optional_date("due_after");
        if let (Some(after), Some(before)) = (due_after, due_before)
            && after > before
        {
            f.error("due_after", "must not be later than due_before");
        }
        f.finish()?;

        Ok(Self {
            space_id: present(space_id, "space_id")?,
            paging,
            filter: DeadlineFilter {
                status,
                priority,
                process_id,
                due_before,
                due_after,
            },
        })
    }
}

impl SpaceScoped for ListDeadlinesInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDeadlineInput {
    pub space_id: String,
    pub id: String,
    pub patch: DeadlineUpdate,
}

impl InputSchema for UpdateDeadlineInput {
    fn parse(raw: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(raw);
        let space_id = f.required_id("space_id", PREFIX_SPACE);
        let id = f.required_string("id");
        let title = f.optional_string("title");
        let description = f.nullable_text("description");
        let due_date = f.optional_date("due_date");
        let priority = f.optional_enum("priority");
        let status = f.optional_enum("status");
        f.finish()?;

        Ok(Self {
            space_id: present(space_id, "space_id")?,
            id: present(id, "id")?,
            patch: DeadlineUpdate {
                title,
                description,
                due_date,
                priority,
                status,
            },
        })
    }
}

impl SpaceScoped for UpdateDeadlineInput {
    fn space_id(&self) -> &str {
        &self.space_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn create_coerces_date_and_enums() {
        let input = CreateDeadlineInput::parse(&json!({
            "space_id": "spc-00000001",
            "process_id": "prc-00000001",
            "title": "Reply",
            "due_date": "2026-11-02T18:00:00-03:00",
            "priority": "HIGH",
        }))
        .unwrap();
        assert_eq!(input.new.due_date, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
        assert_eq!(input.new.priority, DeadlinePriority::High);
        assert_eq!(input.new.status, DeadlineStatus::Open);
    }

    #[test]
    fn create_rejects_bad_date() {
        let errors = CreateDeadlineInput::parse(&json!({
            "space_id": "spc-00000001",
            "process_id": "prc-00000001",
            "title": "Reply",
            "due_date": "next friday",
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("due_date"));
    }

    #[test]
    fn list_reads_uppercase_filters() {
        let input = ListDeadlinesInput::parse(&json!({
            "space_id": "spc-00000001",
            "status": "OPEN",
            "priority": "HIGH",
        }))
        .unwrap();
        assert_eq!(input.filter.status, Some(DeadlineStatus::Open));
        assert_eq!(input.filter.priority, Some(DeadlinePriority::High));
    }

    #[test]
    fn list_rejects_inverted_range() {
        let errors = ListDeadlinesInput::parse(&json!({
            "space_id": "spc-00000001",
            "due_after": "2026-12-01",
            "due_before": "2026-11-01",
        }))
        .unwrap_err();
        assert!(errors.contains("due_after"));
    }
}
