use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ClientStatus, ClientType};

/// A customer of the firm, owned by exactly one space.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub space_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub client_type: ClientType,
    pub status: ClientStatus,
    /// Digits only. Unique among the live clients of a space.
    pub document_number: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
