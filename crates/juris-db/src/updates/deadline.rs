//! Deadline update builder.

use chrono::NaiveDate;
use juris_core::enums::{DeadlinePriority, DeadlineStatus};
use serde::Serialize;

use super::{Assignments, set, set_nullable};
use crate::helpers::format_date;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeadlineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<DeadlinePriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeadlineStatus>,
}

impl DeadlineUpdate {
    #[must_use]
    pub fn assignments(&self) -> Assignments {
        let mut out = Assignments::new();
        set(&mut out, "title", self.title.clone());
        set_nullable(&mut out, "description", self.description.clone());
        set(&mut out, "due_date", self.due_date.map(format_date));
        set(&mut out, "priority", self.priority.map(DeadlinePriority::as_str));
        set(&mut out, "status", self.status.map(DeadlineStatus::as_str));
        out
    }
}

pub struct DeadlineUpdateBuilder(DeadlineUpdate);

impl DeadlineUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(DeadlineUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.0.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: DeadlinePriority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: DeadlineStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> DeadlineUpdate {
        self.0
    }
}

impl Default for DeadlineUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
