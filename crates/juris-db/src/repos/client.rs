//! Client repository.

use async_trait::async_trait;
use juris_core::entities::Client;
use juris_core::enums::{ClientStatus, ClientType};
use juris_core::ids::PREFIX_CLIENT;
use juris_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_datetime, get_opt_string, parse_datetime, parse_enum, search_text};
use crate::scoped::{Inserted, ListQuery, ScopedQuery, ScopedRepository};
use crate::service::{JurisService, now_string};
use crate::updates::client::ClientUpdate;

const TABLE: &str = "clients";
const SELECT_COLS: &str = "id, space_id, name, email, phone, client_type, status, document_number, notes, created_at, updated_at, deleted_at";
const ORDER_BY: &str = "created_at DESC, id";

/// Fields of a client to insert. `document_number` is digits only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub client_type: ClientType,
    pub status: ClientStatus,
    pub document_number: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub status: Option<ClientStatus>,
    pub client_type: Option<ClientType>,
}

fn row_to_client(row: &libsql::Row) -> Result<Client, DatabaseError> {
    Ok(Client {
        id: row.get(0)?,
        space_id: row.get(1)?,
        name: row.get(2)?,
        email: get_opt_string(row, 3)?,
        phone: get_opt_string(row, 4)?,
        client_type: parse_enum(&row.get::<String>(5)?)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        document_number: row.get(7)?,
        notes: get_opt_string(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
        deleted_at: get_opt_datetime(row, 11)?,
    })
}

fn client_search_text(name: &str, email: Option<&str>, document_number: &str) -> String {
    search_text(&[Some(name), email, Some(document_number)])
}

pub struct ClientRepo<'a> {
    svc: &'a JurisService,
}

impl<'a> ClientRepo<'a> {
    pub(crate) const fn new(svc: &'a JurisService) -> Self {
        Self { svc }
    }

    /// Whether a live client in the space already uses `document_number`,
    /// ignoring `except_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn document_in_use(
        &self,
        space_id: &str,
        document_number: &str,
        except_id: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        let count = ScopedQuery::in_space(TABLE, space_id)
            .eq("document_number", document_number)
            .compare_opt("id", "<>", except_id)
            .count(self.svc.db().conn())
            .await?;
        Ok(count > 0)
    }

    async fn refresh_search_text(&self, id: &str, tenant: &str) -> Result<(), DatabaseError> {
        if let Some(client) = self.find_by_id(id, tenant).await? {
            let text = client_search_text(
                &client.name,
                client.email.as_deref(),
                &client.document_number,
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
impl<'a> ScopedRepository for ClientRepo<'a> {
    type Entity = Client;
    type New = NewClient;
    type Patch = ClientUpdate;
    type Filter = ClientFilter;

    async fn find_by_id(&self, id: &str, tenant: &str) -> Result<Option<Client>, DatabaseError> {
        ScopedQuery::in_space(TABLE, tenant)
            .id(id)
            .fetch_one(self.svc.db().conn(), SELECT_COLS, row_to_client)
            .await
    }

    async fn list(
        &self,
        tenant: &str,
        query: &ListQuery<ClientFilter>,
    ) -> Result<Page<Client>, DatabaseError> {
        let limit = self.svc.effective_limit(query.limit);
        ScopedQuery::in_space(TABLE, tenant)
            .eq_opt("status", query.filter.status.map(ClientStatus::as_str))
            .eq_opt("client_type", query.filter.client_type.map(ClientType::as_str))
            .search(query.search.as_deref())
            .fetch_page(
                self.svc.db().conn(),
                SELECT_COLS,
                ORDER_BY,
                limit,
                query.offset,
                row_to_client,
            )
            .await
    }

    async fn insert(&self, tenant: &str, new: NewClient) -> Result<Inserted, DatabaseError> {
        let now = now_string();
        let id = self.svc.db().generate_id(PREFIX_CLIENT).await?;
        let search = client_search_text(&new.name, new.email.as_deref(), &new.document_number);

        self.svc
            .db()
            .conn()
            .execute(
                "INSERT INTO clients (id, space_id, name, email, phone, client_type, status, document_number, notes, search_text, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                libsql::params![
                    id.as_str(),
                    tenant,
                    new.name.as_str(),
                    new.email.as_deref(),
                    new.phone.as_deref(),
                    new.client_type.as_str(),
                    new.status.as_str(),
                    new.document_number.as_str(),
                    new.notes.as_deref(),
                    search.as_str(),
                    now.as_str(),
                    now.as_str()
                ],
            )
            .await?;

        tracing::debug!(client_id = %id, space_id = %tenant, "client created");
        Ok(Inserted::new(id))
    }

    async fn update(
        &self,
        id: &str,
        tenant: &str,
        patch: ClientUpdate,
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
            tracing::debug!(client_id = %id, "client updated");
        }
        Ok(matched.then(|| Inserted::new(id)))
    }

    async fn delete(&self, id: &str, tenant: &str) -> Result<bool, DatabaseError> {
        let deleted = ScopedQuery::in_space(TABLE, tenant)
            .id(id)
            .soft_delete(self.svc.db().conn(), &now_string())
            .await?;
        if deleted {
            tracing::debug!(client_id = %id, "client deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_space, test_service};
    use crate::updates::client::ClientUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn acme() -> NewClient {
        NewClient {
            name: "Acme".into(),
            email: Some("a@b.com".into()),
            phone: None,
            client_type: ClientType::Company,
            status: ClientStatus::Active,
            document_number: "12345678000190".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let svc = test_service().await;
        let space = seed_space(&svc, "user_1").await;

        let inserted = svc.clients().insert(&space, acme()).await.unwrap();
        let found = svc
            .clients()
            .find_by_id(&inserted.id, &space)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, inserted.id);
        assert_eq!(found.space_id, space);
        assert_eq!(found.name, "Acme");
        assert_eq!(found.email.as_deref(), Some("a@b.com"));
        assert_eq!(found.client_type, ClientType::Company);
        assert_eq!(found.document_number, "12345678000190");
        assert!(found.deleted_at.is_none());
    }

    #[tokio::test]
    async fn update_patches_only_given_fields() {
        let svc = test_service().await;
        let space = seed_space(&svc, "user_1").await;
        let id = svc.clients().insert(&space, acme()).await.unwrap().id;

        let patch = ClientUpdateBuilder::new()
            .status(ClientStatus::Inactive)
            .email(None)
            .build();
        let updated = svc.clients().update(&id, &space, patch).await.unwrap();
        assert_eq!(updated.map(|r| r.id), Some(id.clone()));

        let found = svc.clients().find_by_id(&id, &space).await.unwrap().unwrap();
        assert_eq!(found.status, ClientStatus::Inactive);
        assert_eq!(found.email, None);
        assert_eq!(found.name, "Acme");
    }

    #[tokio::test]
    async fn update_of_missing_row_is_none() {
        let svc = test_service().await;
        let space = seed_space(&svc, "user_1").await;
        let patch = ClientUpdateBuilder::new().name("X").build();
        assert!(
            svc.clients()
                .update("cli-00000000", &space, patch)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            svc.clients()
                .update("cli-00000000", &space, ClientUpdate::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn document_uniqueness_ignores_deleted_and_self() {
        let svc = test_service().await;
        let space = seed_space(&svc, "user_1").await;
        let id = svc.clients().insert(&space, acme()).await.unwrap().id;

        let repo = svc.clients();
        assert!(repo.document_in_use(&space, "12345678000190", None).await.unwrap());
        assert!(!repo.document_in_use(&space, "12345678000190", Some(&id)).await.unwrap());

        repo.delete(&id, &space).await.unwrap();
        assert!(!repo.document_in_use(&space, "12345678000190", None).await.unwrap());
    }

    #[tokio::test]
    async fn list_searches_and_filters() {
        let svc = test_service().await;
        let space = seed_space(&svc, "user_1").await;
        let repo = svc.clients();
        repo.insert(&space, acme()).await.unwrap();
        repo.insert(
            &space,
            NewClient {
                name: "Maria Silva".into(),
                email: None,
                client_type: ClientType::Individual,
                status: ClientStatus::Lead,
                document_number: "12345678901".into(),
                ..acme()
            },
        )
        .await
        .unwrap();

        let page = repo
            .list(&space, &ListQuery::new(ClientFilter::default()).search("ACM"))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Acme");

        let page = repo
            .list(
                &space,
                &ListQuery::new(ClientFilter {
                    status: Some(ClientStatus::Lead),
                    client_type: None,
                }),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Maria Silva");

        let page = repo
            .list(&space, &ListQuery::new(ClientFilter::default()).limit(1))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 2);
        assert!(page.has_more());
    }

    #[tokio::test]
    async fn search_folds_accented_capitals() {
        let svc = test_service().await;
        let space = seed_space(&svc, "user_1").await;
        let repo = svc.clients();
        let id = repo
            .insert(
                &space,
                NewClient {
                    name: "Álvaro Souza".into(),
                    email: None,
                    client_type: ClientType::Individual,
                    document_number: "12345678901".into(),
                    ..acme()
                },
            )
            .await
            .unwrap()
            .id;

        for term in ["Álvaro", "álvaro", "ÁLVARO", "souza"] {
            let page = repo
                .list(&space, &ListQuery::new(ClientFilter::default()).search(term))
                .await
                .unwrap();
            assert_eq!(page.total, 1, "term {term}");
        }

        let patch = ClientUpdateBuilder::new().name("Érica Souza").build();
        repo.update(&id, &space, patch).await.unwrap();
        for (term, total) in [("érica", 1), ("álvaro", 0)] {
            let page = repo
                .list(&space, &ListQuery::new(ClientFilter::default()).search(term))
                .await
                .unwrap();
            assert_eq!(page.total, total, "term {term}");
        }
    }
}
