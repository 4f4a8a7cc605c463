//! Process update builder.

use juris_core::enums::ProcessStatus;
use serde::Serialize;

use super::{Assignments, set, set_nullable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Option<String>>,
    /// Digits only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProcessStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_division: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Option<String>>,
}

impl ProcessUpdate {
    #[must_use]
    pub fn assignments(&self) -> Assignments {
        let mut out = Assignments::new();
        set_nullable(&mut out, "client_id", self.client_id.clone());
        set(&mut out, "case_number", self.case_number.clone());
        set(&mut out, "title", self.title.clone());
        set(&mut out, "status", self.status.map(ProcessStatus::as_str));
        set_nullable(&mut out, "court", self.court.clone());
        set_nullable(&mut out, "court_division", self.court_division.clone());
        set_nullable(&mut out, "subject", self.subject.clone());
        out
    }
}

pub struct ProcessUpdateBuilder(ProcessUpdate);

impl ProcessUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProcessUpdate::default())
    }

    #[must_use]
    pub fn client_id(mut self, client_id: Option<String>) -> Self {
        self.0.client_id = Some(client_id);
        self
    }

    #[must_use]
    pub fn case_number(mut self, digits: impl Into<String>) -> Self {
        self.0.case_number = Some(digits.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: ProcessStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn court(mut self, court: Option<String>) -> Self {
        self.0.court = Some(court);
        self
    }

    #[must_use]
    pub fn court_division(mut self, court_division: Option<String>) -> Self {
        self.0.court_division = Some(court_division);
        self
    }

    #[must_use]
    pub fn subject(mut self, subject: Option<String>) -> Self {
        self.0.subject = Some(subject);
        self
    }

    #[must_use]
    pub fn build(self) -> ProcessUpdate {
        self.0
    }
}

impl Default for ProcessUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
