//! Service layer owning the database handle.
//!
//! `JurisService` wraps `JurisDb` and the listing limits from configuration.
//! Tenant-owned entities are reached through repository handles
//! ([`Self::clients`], [`Self::processes`], [`Self::deadlines`],
//! [`Self::spaces`]); accounts, memberships and sessions are implemented as
//! `impl JurisService` blocks in `repos/`.

use chrono::Utc;
use juris_config::{DatabaseConfig, GeneralConfig};

use crate::JurisDb;
use crate::error::DatabaseError;
use crate::repos::client::ClientRepo;
use crate::repos::deadline::DeadlineRepo;
use crate::repos::process::ProcessRepo;
use crate::repos::space::SpaceRepo;

pub struct JurisService {
    db: JurisDb,
    general: GeneralConfig,
}

impl JurisService {
    /// Open the configured database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open(
        database: &DatabaseConfig,
        general: GeneralConfig,
    ) -> Result<Self, DatabaseError> {
        let db = JurisDb::open(database).await?;
        Ok(Self::from_db(db, general))
    }

    /// Create from an existing `JurisDb` (for testing).
    #[must_use]
    pub const fn from_db(db: JurisDb, general: GeneralConfig) -> Self {
        Self { db, general }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &JurisDb {
        &self.db
    }

    #[must_use]
    pub const fn general(&self) -> &GeneralConfig {
        &self.general
    }

    /// Page size actually used for a listing request.
    #[must_use]
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        self.general.clamp_limit(requested)
    }

    #[must_use]
    pub const fn clients(&self) -> ClientRepo<'_> {
        ClientRepo::new(self)
    }

    #[must_use]
    pub const fn processes(&self) -> ProcessRepo<'_> {
        ProcessRepo::new(self)
    }

    #[must_use]
    pub const fn deadlines(&self) -> DeadlineRepo<'_> {
        DeadlineRepo::new(self)
    }

    #[must_use]
    pub const fn spaces(&self) -> SpaceRepo<'_> {
        SpaceRepo::new(self)
    }
}

/// Current time in the stored timestamp format.
pub(crate) fn now_string() -> String {
    Utc::now().to_rfc3339()
}
