//! # juris-db
//!
//! libSQL storage for Juris.
//!
//! Every tenant-owned read and write goes through a [`ScopedRepository`]
//! whose queries are built by [`ScopedQuery`]: the tenant filter and the
//! soft-delete predicate are added there once, never by hand. Repository
//! handles are obtained from [`JurisService`].
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29), local file,
//! in-memory, or remote.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod scoped;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use juris_config::DatabaseConfig;
use libsql::Builder;

pub use scoped::{Inserted, ListQuery, ScopedQuery, ScopedRepository};
pub use service::JurisService;

/// Central database handle.
///
/// Wraps a libSQL database and connection. Provides ID generation and
/// transactions; repositories live on [`JurisService`].
pub struct JurisDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl JurisDb {
    /// Open the database described by `config`: remote when a URL and token
    /// are configured, otherwise the local file (or `:memory:`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            return Self::open_remote(&config.url, &config.auth_token).await;
        }
        if !config.is_in_memory()
            && let Some(parent) = Path::new(&config.path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::InvalidState(format!("mkdir {}: {e}", parent.display()))
            })?;
        }
        Self::open_local(&config.path).await
    }

    /// Open a local-only database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::init(db).await
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::init(db).await
    }

    async fn init(db: libsql::Database) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let juris_db = Self { db, conn };
        juris_db.run_migrations().await?;
        tracing::debug!("database ready");
        Ok(juris_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Begin a transaction on the shared connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started.
    pub async fn transaction(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.conn.transaction().await?)
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"cli-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
