//! Process repository.
//!
//! `case_number` is stored digits only. Deleting a process also soft-deletes
//! its live deadlines in the same transaction.

use async_trait::async_trait;
use juris_core::entities::Process;
use juris_core::enums::ProcessStatus;
use juris_core::ids::PREFIX_PROCESS;
use juris_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_datetime, get_opt_string, parse_datetime, parse_enum, search_text};
use crate::scoped::{Inserted, ListQuery, ScopedQuery, ScopedRepository};
use crate::service::{JurisService, now_string};
use crate::updates::process::ProcessUpdate;

const TABLE: &str = "processes";
const SELECT_COLS: &str = "id, space_id, client_id, case_number, title, status, court, court_division, subject, created_at, updated_at, deleted_at";
const ORDER_BY: &str = "created_at DESC, id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProcess {
    pub client_id: Option<String>,
    /// Digits only.
    pub case_number: String,
    pub title: String,
    pub status: ProcessStatus,
    pub court: Option<String>,
    pub court_division: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessFilter {
    pub status: Option<ProcessStatus>,
    pub client_id: Option<String>,
}

fn row_to_process(row: &libsql::Row) -> Result<Process, DatabaseError> {
    Ok(Process {
        id: row.get(0)?,
        space_id: row.get(1)?,
        client_id: get_opt_string(row, 2)?,
        case_number: row.get(3)?,
        title: row.get(4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        court: get_opt_string(row, 6)?,
        court_division: get_opt_string(row, 7)?,
        subject: get_opt_string(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
        deleted_at: get_opt_datetime(row, 11)?,
    })
}

fn process_search_text(
    title: &str,
    case_number: &str,
    court: Option<&str>,
    subject: Option<&str>,
) -> String {
    search_text(&[Some(title), Some(case_number), court, subject])
}

pub struct ProcessRepo<'a> {
    svc: &'a JurisService,
}

impl<'a> ProcessRepo<'a> {
    pub(crate) const fn new(svc: &'a JurisService) -> Self {
        Self { svc }
    }

    async fn refresh_search_text(&self, id: &str, tenant: &str) -> Result<(), DatabaseError> {
        if let Some(p) = self.find_by_id(id, tenant).await? {
            let text = process_search_text(
                &p.title,
                &p.case_number,
                p.court.as_deref(),
                p.subject.as_deref(),
            );
            ScopedQuery::in_space(TABLE, tenant)
                .id(id)
                .set_search_text(self.svc.db().conn(), &text)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<'a> ScopedRepository for ProcessRepo<'a> {
    type Entity = Process;
    type New = NewProcess;
    type Patch = ProcessUpdate;
    type Filter = ProcessFilter;

    async fn find_by_id(&self, id: &str, tenant: &str) -> Result<Option<Process>, DatabaseError> {
        ScopedQuery::in_space(TABLE, tenant)
            .id(id)
            .fetch_one(self.svc.db().conn(), SELECT_COLS, row_to_process)
            .await
    }

    async fn list(
        &self,
        tenant: &str,
        query: &ListQuery<ProcessFilter>,
    ) -> Result<Page<Process>, DatabaseError> {
        let limit = self.svc.effective_limit(query.limit);
        ScopedQuery::in_space(TABLE, tenant)
            .eq_opt("status", query.filter.status.map(ProcessStatus::as_str))
            .eq_opt("client_id", query.filter.client_id.as_deref())
            .search(query.search.as_deref())
            .fetch_page(
                self.svc.db().conn(),
                SELECT_COLS,
                ORDER_BY,
                limit,
                query.offset,
                row_to_process,
            )
            .await
    }

    async fn insert(&self, tenant: &str, new: NewProcess) -> Result<Inserted, DatabaseError> {
        let now = now_string();
        let id = self.svc.db().generate_id(PREFIX_PROCESS).await?;
        let search = process_search_text(
            &new.title,
            &new.case_number,
            new.court.as_deref(),
            new.subject.as_deref(),
        );

        self.svc
            .db()
            .conn()
            .execute(
                "INSERT INTO processes (id, space_id, client_id, case_number, title, status, court, court_division, subject, search_text, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                libsql::params![
                    id.as_str(),
                    tenant,
                    new.client_id.as_deref(),
                    new.case_number.as_str(),
                    new.title.as_str(),
                    new.status.as_str(),
                    new.court.as_deref(),
                    new.court_division.as_deref(),
                    new.subject.as_deref(),
                    search.as_str(),
                    now.as_str(),
                    now.as_str()
                ],
            )
            .await?;

        tracing::debug!(process_id = %id, space_id = %tenant, "process created");
        Ok(Inserted::new(id))
    }

    async fn update(
        &self,
        id: &str,
        tenant: &str,
        patch: ProcessUpdate,
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
        let now = now_string();
        let tx = self.svc.db().transaction().await?;
        let deleted = ScopedQuery::in_space(TABLE, tenant)
            .id(id)
            .soft_delete(&tx, &now)
            .await?;
        if deleted {
            ScopedQuery::in_space("deadlines", tenant)
                .eq("process_id", id)
                .soft_delete(&tx, &now)
                .await?;
        }
        tx.commit().await?;

        if deleted {
            tracing::debug!(process_id = %id, "process deleted with its deadlines");
        }
        Ok(deleted)
    }
}
