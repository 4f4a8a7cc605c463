//! Space membership queries.
//!
//! Membership is the authorization edge between an account and a space.
//! A membership in a soft-deleted space grants nothing.

use juris_core::entities::SpaceMember;
use juris_core::enums::MemberRole;
use juris_core::ids::PREFIX_MEMBER;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::{JurisService, now_string};

fn row_to_member(row: &libsql::Row) -> Result<SpaceMember, DatabaseError> {
    Ok(SpaceMember {
        id: row.get(0)?,
        space_id: row.get(1)?,
        account_id: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl JurisService {
    /// Role of `account_id` in a live space, or `None` if the account is
    /// not a member or the space is deleted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn member_role(
        &self,
        space_id: &str,
        account_id: &str,
    ) -> Result<Option<MemberRole>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT m.role FROM space_members m
                 JOIN spaces s ON s.id = m.space_id
                 WHERE m.space_id = ?1 AND m.account_id = ?2 AND s.deleted_at IS NULL",
                libsql::params![space_id, account_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(parse_enum(&row.get::<String>(0)?)?)),
            None => Ok(None),
        }
    }

    /// Members of a live space, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row parsing fails.
    pub async fn members(&self, space_id: &str) -> Result<Vec<SpaceMember>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT m.id, m.space_id, m.account_id, m.role, m.created_at
                 FROM space_members m
                 JOIN spaces s ON s.id = m.space_id
                 WHERE m.space_id = ?1 AND s.deleted_at IS NULL
                 ORDER BY m.created_at, m.id",
                [space_id],
            )
            .await?;

        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row_to_member(&row)?);
        }
        Ok(members)
    }

    /// Add an account to a space. Fails on a duplicate membership.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails (unknown space or
    /// account, or an existing membership).
    pub async fn add_member(
        &self,
        space_id: &str,
        account_id: &str,
        role: MemberRole,
    ) -> Result<String, DatabaseError> {
        let id = self.db().generate_id(PREFIX_MEMBER).await?;
        let now = now_string();
        self.db()
            .conn()
            .execute(
                "INSERT INTO space_members (id, space_id, account_id, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), space_id, account_id, role.as_str(), now.as_str()],
            )
            .await?;
        tracing::debug!(space_id, account_id, role = %role, "member added");
        Ok(id)
    }
}
