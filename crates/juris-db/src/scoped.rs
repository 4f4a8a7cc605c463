//! Tenant-scoped query building and the repository contract.
//!
//! [`ScopedQuery`] is the only way repositories address tenant-owned rows.
//! Every constructor takes the tenant and adds `deleted_at IS NULL`, so a
//! query can be narrowed further but never widened past its tenant or into
//! soft-deleted rows.

use async_trait::async_trait;
use juris_core::responses::{EntityRef, Page};
use libsql::Value;

use crate::error::DatabaseError;

/// Reference returned by `insert` and `update`.
pub type Inserted = EntityRef;

/// Predicate applied to every scoped query.
const LIVE: &str = "deleted_at IS NULL";

/// Lowercased copy of an entity's searchable columns, kept by the repos.
const SEARCH_COLUMN: &str = "search_text";

/// Row mapper used by the fetch helpers.
pub type RowMapper<T> = fn(&libsql::Row) -> Result<T, DatabaseError>;

/// Parameters of a tenant-scoped listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery<F> {
    /// Case-insensitive substring matched against name-like columns.
    pub search: Option<String>,
    /// Requested page size; clamped by the repository.
    pub limit: Option<u32>,
    pub offset: u32,
    /// Equality filters specific to the entity.
    pub filter: F,
}

impl<F> ListQuery<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self {
            search: None,
            limit: None,
            offset: 0,
            filter,
        }
    }

    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }
}

/// CRUD contract shared by every tenant-owned entity.
///
/// `tenant` is the owning space ID for clients, processes and deadlines, and
/// the member account ID for spaces. A row owned by another tenant behaves
/// exactly like an absent row.
#[async_trait]
pub trait ScopedRepository: Send + Sync {
    type Entity: Send;
    type New: Send;
    type Patch: Send;
    type Filter: Send + Sync;

    async fn find_by_id(
        &self,
        id: &str,
        tenant: &str,
    ) -> Result<Option<Self::Entity>, DatabaseError>;

    async fn list(
        &self,
        tenant: &str,
        query: &ListQuery<Self::Filter>,
    ) -> Result<Page<Self::Entity>, DatabaseError>;

    async fn insert(&self, tenant: &str, new: Self::New) -> Result<Inserted, DatabaseError>;

    /// Apply a partial update. `None` when no live row matched.
    async fn update(
        &self,
        id: &str,
        tenant: &str,
        patch: Self::Patch,
    ) -> Result<Option<Inserted>, DatabaseError>;

    /// Soft-delete. `false` when no live row matched (already deleted,
    /// absent, or another tenant's).
    async fn delete(&self, id: &str, tenant: &str) -> Result<bool, DatabaseError>;
}

/// `WHERE`-clause builder bound to one table and one tenant.
#[derive(Debug, Clone)]
pub struct ScopedQuery {
    table: &'static str,
    conditions: Vec<String>,
    params: Vec<Value>,
}

impl ScopedQuery {
    /// Live rows of `table` whose `tenant_column` equals `tenant`.
    #[must_use]
    pub fn owned_by(table: &'static str, tenant_column: &str, tenant: &str) -> Self {
        Self {
            table,
            conditions: vec![LIVE.to_string()],
            params: Vec::new(),
        }
        .eq(tenant_column, tenant)
    }

    /// Live rows of `table` owned by a space.
    #[must_use]
    pub fn in_space(table: &'static str, space_id: &str) -> Self {
        Self::owned_by(table, "space_id", space_id)
    }

    /// Live spaces the account is a member of.
    #[must_use]
    pub fn spaces_of(account_id: &str) -> Self {
        let mut query = Self {
            table: "spaces",
            conditions: vec![LIVE.to_string()],
            params: Vec::new(),
        };
        let n = query.next_index();
        query.conditions.push(format!(
            "EXISTS (SELECT 1 FROM space_members m WHERE m.space_id = spaces.id AND m.account_id = ?{n})"
        ));
        query.params.push(account_id.into());
        query
    }

    const fn next_index(&self) -> usize {
        self.params.len() + 1
    }

    /// `column = value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        let n = self.next_index();
        self.conditions.push(format!("{column} = ?{n}"));
        self.params.push(value.into());
        self
    }

    /// `column = value` when a value is given.
    #[must_use]
    pub fn eq_opt<V: Into<Value>>(self, column: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    /// Narrow to a single row.
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.eq("id", id)
    }

    /// `column <op> value` for range filters (`<=`, `>=`, `<`, `>`).
    #[must_use]
    pub fn compare_opt<V: Into<Value>>(mut self, column: &str, op: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            let n = self.next_index();
            self.conditions.push(format!("{column} {op} ?{n}"));
            self.params.push(v.into());
        }
        self
    }

    /// Case-insensitive substring match against the folded `search_text`
    /// column. Blank terms are ignored.
    #[must_use]
    pub fn search(mut self, term: Option<&str>) -> Self {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return self;
        };
        let n = self.next_index();
        self.conditions
            .push(format!("{SEARCH_COLUMN} LIKE ?{n} ESCAPE '\\'"));
        self.params
            .push(crate::helpers::like_pattern(&term.to_lowercase()).into());
        self
    }

    #[must_use]
    pub fn where_sql(&self) -> String {
        self.conditions.join(" AND ")
    }

    #[must_use]
    pub fn select_sql(&self, columns: &str) -> String {
        format!(
            "SELECT {columns} FROM {} WHERE {}",
            self.table,
            self.where_sql()
        )
    }

    #[must_use]
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {} WHERE {}", self.table, self.where_sql())
    }

    #[must_use]
    pub fn params(&self) -> Vec<Value> {
        self.params.clone()
    }

    /// Fetch at most one row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row mapping fails.
    pub async fn fetch_one<T>(
        &self,
        conn: &libsql::Connection,
        columns: &str,
        map: RowMapper<T>,
    ) -> Result<Option<T>, DatabaseError> {
        let sql = format!("{} LIMIT 1", self.select_sql(columns));
        let mut rows = conn
            .query(&sql, libsql::params_from_iter(self.params()))
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(map(&row)?)),
            None => Ok(None),
        }
    }

    /// Number of matching rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count(&self, conn: &libsql::Connection) -> Result<u64, DatabaseError> {
        let mut rows = conn
            .query(&self.count_sql(), libsql::params_from_iter(self.params()))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let total = row.get::<i64>(0)?;
        u64::try_from(total)
            .map_err(|_| DatabaseError::InvalidState(format!("negative count {total}")))
    }

    /// Fetch one page ordered by `order_by`, together with the total number
    /// of matches ignoring `limit`/`offset`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either query or row mapping fails.
    pub async fn fetch_page<T>(
        &self,
        conn: &libsql::Connection,
        columns: &str,
        order_by: &str,
        limit: u32,
        offset: u32,
        map: RowMapper<T>,
    ) -> Result<Page<T>, DatabaseError> {
        let total = self.count(conn).await?;
        let sql = format!(
            "{} ORDER BY {order_by} LIMIT {limit} OFFSET {offset}",
            self.select_sql(columns)
        );
        let mut rows = conn
            .query(&sql, libsql::params_from_iter(self.params()))
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(map(&row)?);
        }
        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }

    /// `UPDATE … SET <assignments>, updated_at = now WHERE <scope>`.
    /// Returns whether a live row matched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn update(
        self,
        conn: &libsql::Connection,
        assignments: Vec<(&'static str, Value)>,
        now: &str,
    ) -> Result<bool, DatabaseError> {
        let scope = self.where_sql();
        let mut params = self.params;
        let mut sets = Vec::with_capacity(assignments.len() + 1);
        for (column, value) in assignments {
            params.push(value);
            sets.push(format!("{column} = ?{}", params.len()));
        }
        params.push(now.into());
        sets.push(format!("updated_at = ?{}", params.len()));

        let sql = format!("UPDATE {} SET {} WHERE {scope}", self.table, sets.join(", "));
        let changed = conn.execute(&sql, libsql::params_from_iter(params)).await?;
        Ok(changed > 0)
    }

    /// Store the folded search text of the matching rows. Leaves
    /// `updated_at` alone.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn set_search_text(
        self,
        conn: &libsql::Connection,
        text: &str,
    ) -> Result<bool, DatabaseError> {
        let scope = self.where_sql();
        let mut params = self.params;
        params.push(text.into());
        let sql = format!(
            "UPDATE {} SET {SEARCH_COLUMN} = ?{} WHERE {scope}",
            self.table,
            params.len()
        );
        let changed = conn.execute(&sql, libsql::params_from_iter(params)).await?;
        Ok(changed > 0)
    }

    /// Mark matching rows deleted. Returns whether a live row matched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn soft_delete(
        self,
        conn: &libsql::Connection,
        now: &str,
    ) -> Result<bool, DatabaseError> {
        let scope = self.where_sql();
        let mut params = self.params;
        params.push(now.into());
        let n = params.len();
        let sql = format!(
            "UPDATE {} SET deleted_at = ?{n}, updated_at = ?{n} WHERE {scope}",
            self.table
        );
        let changed = conn.execute(&sql, libsql::params_from_iter(params)).await?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_scope_excludes_deleted_rows() {
        let q = ScopedQuery::in_space("clients", "spc-1");
        assert_eq!(q.where_sql(), "deleted_at IS NULL AND space_id = ?1");
        let q = ScopedQuery::spaces_of("acc-1");
        assert!(q.where_sql().starts_with("deleted_at IS NULL AND EXISTS"));
    }

    #[test]
    fn placeholders_are_numbered_in_push_order() {
        let q = ScopedQuery::in_space("deadlines", "spc-1")
            .eq_opt("status", Some("open"))
            .eq_opt::<&str>("priority", None)
            .compare_opt("due_date", "<=", Some("2026-12-31"))
            .id("ddl-1");
        assert_eq!(
            q.where_sql(),
            "deleted_at IS NULL AND space_id = ?1 AND status = ?2 AND due_date <= ?3 AND id = ?4"
        );
        assert_eq!(q.params().len(), 4);
    }

    #[test]
    fn search_lowercases_the_term() {
        let q = ScopedQuery::in_space("clients", "spc-1").search(Some(" Álvaro "));
        assert_eq!(
            q.where_sql(),
            "deleted_at IS NULL AND space_id = ?1 AND search_text LIKE ?2 ESCAPE '\\'"
        );
        assert!(matches!(&q.params()[1], Value::Text(s) if s == "%álvaro%"));
    }

    #[test]
    fn blank_search_is_ignored() {
        let q = ScopedQuery::in_space("clients", "spc-1").search(Some("   "));
        assert_eq!(q.params().len(), 1);
    }

    #[test]
    fn list_query_builder() {
        let q = ListQuery::new(()).search("acme").limit(5).offset(10);
        assert_eq!(q.search.as_deref(), Some("acme"));
        assert_eq!(q.limit, Some(5));
        assert_eq!(q.offset, 10);
    }
}
