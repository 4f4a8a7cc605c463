//! Deadline repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use juris_core::entities::Deadline;
use juris_core::enums::{DeadlinePriority, DeadlineStatus};
use juris_core::ids::PREFIX_DEADLINE;
use juris_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{
    format_date, get_opt_datetime, get_opt_string, parse_date, parse_datetime, parse_enum,
    search_text,
};
use crate::scoped::{Inserted, ListQuery, ScopedQuery, ScopedRepository};
use crate::service::{JurisService, now_string};
use crate::updates::deadline::DeadlineUpdate;

const TABLE: &str = "deadlines";
const SELECT_COLS: &str = "id, space_id, process_id, title, description, due_date, priority, status, created_at, updated_at, deleted_at";
const ORDER_BY: &str = "created_at DESC, id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeadline {
    pub process_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: DeadlinePriority,
    pub status: DeadlineStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlineFilter {
    pub status: Option<DeadlineStatus>,
    pub priority: Option<DeadlinePriority>,
    pub process_id: Option<String>,
    /// Inclusive upper bound on `due_date`.
    pub due_before: Option<NaiveDate>,
    /// Inclusive lower bound on `due_date`.
    pub due_after: Option<NaiveDate>,
}

fn row_to_deadline(row: &libsql::Row) -> Result<Deadline, DatabaseError> {
    Ok(Deadline {
        id: row.get(0)?,
        space_id: row.get(1)?,
        process_id: row.get(2)?,
        title: row.get(3)?,
        description: get_opt_string(row, 4)?,
        due_date: parse_date(&row.get::<String>(5)?)?,
        priority: parse_enum(&row.get::<String>(6)?)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
        deleted_at: get_opt_datetime(row, 10)?,
    })
}

pub struct DeadlineRepo<'a> {
    svc: &'a JurisService,
}

impl<'a> DeadlineRepo<'a> {
    pub(crate) const fn new(svc: &'a JurisService) -> Self {
        Self { svc }
    }

    async fn refresh_search_text(&self, id: &str, tenant: &str) -> Result<(), DatabaseError> {
        if let Some(d) = self.find_by_id(id, tenant).await? {
            let text = search_text(&[Some(d.title.as_str()), d.description.as_deref()]);
            ScopedQuery::in_space(TABLE, tenant)
                .id(id)
                .set_search_text(self.svc.db().conn(), &text)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<'a> ScopedRepository for DeadlineRepo<'a> {
    type Entity = Deadline;
    type New = NewDeadline;
    type Patch = DeadlineUpdate;
    type Filter = DeadlineFilter;

    async fn find_by_id(&self, id: &str, tenant: &str) -> Result<Option<Deadline>, DatabaseError> {
        ScopedQuery::in_space(TABLE, tenant)
            .id(id)
            .fetch_one(self.svc.db().conn(), SELECT_COLS, row_to_deadline)
            .await
    }

    async fn list(
        &self,
        tenant: &str,
        query: &ListQuery<DeadlineFilter>,
    ) -> Result<Page<Deadline>, DatabaseError> {
        let filter = &query.filter;
        let limit = self.svc.effective_limit(query.limit);
        ScopedQuery::in_space(TABLE, tenant)
            .eq_opt("status", filter.status.map(DeadlineStatus::as_str))
            .eq_opt("priority", filter.priority.map(DeadlinePriority::as_str))
            .eq_opt("process_id", filter.process_id.as_deref())
            .compare_opt("due_date", "<=", filter.due_before.map(format_date))
            .compare_opt("due_date", ">=", filter.due_after.map(format_date))
            .search(query.search.as_deref())
            .fetch_page(
                self.svc.db().conn(),
                SELECT_COLS,
                ORDER_BY,
                limit,
                query.offset,
                row_to_deadline,
            )
            .await
    }

    async fn insert(&self, tenant: &str, new: NewDeadline) -> Result<Inserted, DatabaseError> {
        let now = now_string();
        let id = self.svc.db().generate_id(PREFIX_DEADLINE).await?;
        let search = search_text(&[Some(new.title.as_str()), new.description.as_deref()]);

        self.svc
            .db()
            .conn()
            .execute(
                "INSERT INTO deadlines (id, space_id, process_id, title, description, due_date, priority, status, search_text, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                libsql::params![
                    id.as_str(),
                    tenant,
                    new.process_id.as_str(),
                    new.title.as_str(),
                    new.description.as_deref(),
                    format_date(new.due_date),
                    new.priority.as_str(),
                    new.status.as_str(),
                    search.as_str(),
                    now.as_str(),
                    now.as_str()
                ],
            )
            .await?;

        tracing::debug!(deadline_id = %id, space_id = %tenant, "deadline created");
        Ok(Inserted::new(id))
    }

    async fn update(
        &self,
        id: &str,
        tenant: &str,
        patch: DeadlineUpdate,
    ) -> Result<Option<Inserted>, DatabaseError> {
        let scope = ScopedQuery::in_space(TABLE, tenant).id(id);
        let assignments = patch.assignments();
        if assignments.is_empty() {
            let exists = scope.count(self.svc.db().conn()).await? > 0;
            return Ok(exists.then(|| Inserted::new(id)));
        }
        let matched = scope
            .update(self.svc.db().conn(), assignments, &now_string())
            .await?;
        if matched {
            self.refresh_search_text(id, tenant).await?;
        }
        Ok(matched.then(|| Inserted::new(id)))
    }

    async fn delete(&self, id: &str, tenant: &str) -> Result<bool, DatabaseError> {
        ScopedQuery::in_space(TABLE, tenant)
            .id(id)
            .soft_delete(self.svc.db().conn(), &now_string())
            .await
    }
}
