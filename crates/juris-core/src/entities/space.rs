use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{MemberRole, SpaceType};

/// A tenant workspace owning clients, processes, and deadlines.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Space {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub space_type: SpaceType,
    /// Account that created the space.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Membership of an account in a space.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpaceMember {
    pub id: String,
    pub space_id: String,
    pub account_id: String,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
}
