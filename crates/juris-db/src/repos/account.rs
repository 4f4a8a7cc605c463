//! Account queries.
//!
//! An account is keyed externally by `auth_user_id`; it is the tenant of
//! its own profile and may only read and patch itself.

use juris_core::entities::Account;
use juris_core::ids::PREFIX_ACCOUNT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_datetime, get_opt_string, parse_datetime};
use crate::scoped::ScopedQuery;
use crate::service::{JurisService, now_string};
use crate::updates::account::AccountUpdate;

const SELECT_COLS: &str =
    "id, auth_user_id, name, email, phone, created_at, updated_at, deleted_at";

fn row_to_account(row: &libsql::Row) -> Result<Account, DatabaseError> {
    Ok(Account {
        id: row.get(0)?,
        auth_user_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
        deleted_at: get_opt_datetime(row, 7)?,
    })
}

impl JurisService {
    /// Return the account for `auth_user_id`, creating it on first sight.
    /// Existing accounts keep their stored name and email.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert or lookup fails, or if the
    /// account exists but was deleted.
    pub async fn ensure_account(
        &self,
        auth_user_id: &str,
        name: &str,
        email: &str,
    ) -> Result<Account, DatabaseError> {
        let id = self.db().generate_id(PREFIX_ACCOUNT).await?;
        let now = now_string();
        let inserted = self
            .db()
            .conn()
            .execute(
                "INSERT INTO accounts (id, auth_user_id, name, email, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(auth_user_id) DO NOTHING",
                libsql::params![id.as_str(), auth_user_id, name, email, now.as_str(), now.as_str()],
            )
            .await?;
        if inserted > 0 {
            tracing::info!(account_id = %id, auth_user_id, "account created");
        }

        self.find_account_by_auth_user(auth_user_id)
            .await?
            .ok_or_else(|| {
                DatabaseError::InvalidState(format!("account for {auth_user_id} is deleted"))
            })
    }

    /// Live account for an identity-provider user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_account_by_auth_user(
        &self,
        auth_user_id: &str,
    ) -> Result<Option<Account>, DatabaseError> {
        ScopedQuery::owned_by("accounts", "auth_user_id", auth_user_id)
            .fetch_one(self.db().conn(), SELECT_COLS, row_to_account)
            .await
    }

    /// Live account by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_account(&self, account_id: &str) -> Result<Option<Account>, DatabaseError> {
        ScopedQuery::owned_by("accounts", "id", account_id)
            .fetch_one(self.db().conn(), SELECT_COLS, row_to_account)
            .await
    }

    /// Patch the account of `auth_user_id`. Returns whether a live account
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn update_account(
        &self,
        auth_user_id: &str,
        patch: AccountUpdate,
    ) -> Result<bool, DatabaseError> {
        let scope = ScopedQuery::owned_by("accounts", "auth_user_id", auth_user_id);
        let assignments = patch.assignments();
        if assignments.is_empty() {
            return Ok(scope.count(self.db().conn()).await? > 0);
        }
        scope
            .update(self.db().conn(), assignments, &now_string())
            .await
    }
}
