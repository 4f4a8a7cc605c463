use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DeadlinePriority, DeadlineStatus};

/// A due-date obligation attached to one process.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Deadline {
    pub id: String,
    pub space_id: String,
    pub process_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: DeadlinePriority,
    pub status: DeadlineStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Deadline {
    /// An open deadline whose due date is before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == DeadlineStatus::Open && self.due_date < today
    }
}
