use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::case_number::CaseNumber;
use crate::enums::ProcessStatus;

/// A legal case tracked by a space.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Process {
    pub id: String,
    pub space_id: String,
    pub client_id: Option<String>,
    /// 20 digits, unformatted.
    pub case_number: String,
    pub title: String,
    pub status: ProcessStatus,
    pub court: Option<String>,
    pub court_division: Option<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Process {
    /// Case number in display form (`NNNNNNN-DD.AAAA.J.TR.OOOO`).
    ///
    /// Falls back to the stored digits if they are not a valid case number.
    #[must_use]
    pub fn formatted_case_number(&self) -> String {
        CaseNumber::parse(&self.case_number)
            .map_or_else(|_| self.case_number.clone(), |n| n.formatted())
    }
}
