//! Space repository.
//!
//! The tenant of a space is the account asking for it: a space is visible
//! only to accounts with a membership row. Creating a space also creates the
//! creator's `owner` membership, in one transaction.

use async_trait::async_trait;
use juris_core::entities::Space;
use juris_core::enums::{MemberRole, SpaceType};
use juris_core::ids::{PREFIX_MEMBER, PREFIX_SPACE};
use juris_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_datetime, get_opt_string, parse_datetime, parse_enum, search_text};
use crate::scoped::{Inserted, ListQuery, ScopedQuery, ScopedRepository};
use crate::service::{JurisService, now_string};
use crate::updates::space::SpaceUpdate;

const SELECT_COLS: &str =
    "id, name, description, space_type, created_by, created_at, updated_at, deleted_at";
const ORDER_BY: &str = "created_at DESC, id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpace {
    pub name: String,
    pub description: Option<String>,
    pub space_type: SpaceType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceFilter {
    pub space_type: Option<SpaceType>,
}

fn row_to_space(row: &libsql::Row) -> Result<Space, DatabaseError> {
    Ok(Space {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
        space_type: parse_enum(&row.get::<String>(3)?)?,
        created_by: row.get(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
        deleted_at: get_opt_datetime(row, 7)?,
    })
}

pub struct SpaceRepo<'a> {
    svc: &'a JurisService,
}

impl<'a> SpaceRepo<'a> {
    pub(crate) const fn new(svc: &'a JurisService) -> Self {
        Self { svc }
    }

    /// Whether a live space with this ID exists at all, regardless of
    /// membership. Used to tell "not a member" from "no such space".
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn exists(&self, space_id: &str) -> Result<bool, DatabaseError> {
        let count = ScopedQuery::owned_by("spaces", "id", space_id)
            .count(self.svc.db().conn())
            .await?;
        Ok(count > 0)
    }

    async fn refresh_search_text(&self, id: &str, tenant: &str) -> Result<(), DatabaseError> {
        if let Some(space) = self.find_by_id(id, tenant).await? {
            let text = search_text(&[Some(space.name.as_str()), space.description.as_deref()]);
            ScopedQuery::spaces_of(tenant)
                .id(id)
                .set_search_text(self.svc.db().conn(), &text)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<'a> ScopedRepository for SpaceRepo<'a> {
    type Entity = Space;
    type New = NewSpace;
    type Patch = SpaceUpdate;
    type Filter = SpaceFilter;

    async fn find_by_id(&self, id: &str, tenant: &str) -> Result<Option<Space>, DatabaseError> {
        ScopedQuery::spaces_of(tenant)
            .id(id)
            .fetch_one(self.svc.db().conn(), SELECT_COLS, row_to_space)
            .await
    }

    async fn list(
        &self,
        tenant: &str,
        query: &ListQuery<SpaceFilter>,
    ) -> Result<Page<Space>, DatabaseError> {
        let limit = self.svc.effective_limit(query.limit);
        ScopedQuery::spaces_of(tenant)
            .eq_opt("space_type", query.filter.space_type.map(SpaceType::as_str))
            .search(query.search.as_deref())
            .fetch_page(
                self.svc.db().conn(),
                SELECT_COLS,
                ORDER_BY,
                limit,
                query.offset,
                row_to_space,
            )
            .await
    }

    /// Insert the space and make `tenant` (the creating account) its owner.
    async fn insert(&self, tenant: &str, new: NewSpace) -> Result<Inserted, DatabaseError> {
        let now = now_string();
        let id = self.svc.db().generate_id(PREFIX_SPACE).await?;
        let member_id = self.svc.db().generate_id(PREFIX_MEMBER).await?;
        let search = search_text(&[Some(new.name.as_str()), new.description.as_deref()]);

        let tx = self.svc.db().transaction().await?;
        tx.execute(
            "INSERT INTO spaces (id, name, description, space_type, created_by, search_text, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                id.as_str(),
                new.name.as_str(),
                new.description.as_deref(),
                new.space_type.as_str(),
                tenant,
                search.as_str(),
                now.as_str(),
                now.as_str()
            ],
        )
        .await?;
        tx.execute(
            "INSERT INTO space_members (id, space_id, account_id, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                member_id.as_str(),
                id.as_str(),
                tenant,
                MemberRole::Owner.as_str(),
                now.as_str()
            ],
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(space_id = %id, account_id = %tenant, "space created");
        Ok(Inserted::new(id))
    }

    async fn update(
        &self,
        id: &str,
        tenant: &str,
        patch: SpaceUpdate,
    ) -> Result<Option<Inserted>, DatabaseError> {
        let scope = ScopedQuery::spaces_of(tenant).id(id);
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
        let deleted = ScopedQuery::spaces_of(tenant)
            .id(id)
            .soft_delete(self.svc.db().conn(), &now_string())
            .await?;
        if deleted {
            tracing::debug!(space_id = %id, "space deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_account, test_service};
    use pretty_assertions::assert_eq;

    fn firm(name: &str) -> NewSpace {
        NewSpace {
            name: name.into(),
            description: None,
            space_type: SpaceType::Firm,
        }
    }

    #[tokio::test]
    async fn creator_becomes_owner() {
        let svc = test_service().await;
        let account = seed_account(&svc, "user_1").await;
        let space = svc.spaces().insert(&account, firm("Silva")).await.unwrap().id;

        assert_eq!(
            svc.member_role(&space, &account).await.unwrap(),
            Some(MemberRole::Owner)
        );
        let found = svc.spaces().find_by_id(&space, &account).await.unwrap().unwrap();
        assert_eq!(found.created_by, account);
        assert_eq!(found.space_type, SpaceType::Firm);
    }

    #[tokio::test]
    async fn non_members_cannot_see_space() {
        let svc = test_service().await;
        let owner = seed_account(&svc, "user_1").await;
        let stranger = seed_account(&svc, "user_2").await;
        let space = svc.spaces().insert(&owner, firm("Silva")).await.unwrap().id;

        assert!(svc.spaces().find_by_id(&space, &stranger).await.unwrap().is_none());
        assert!(svc.spaces().exists(&space).await.unwrap());
        let page = svc
            .spaces()
            .list(&stranger, &ListQuery::new(SpaceFilter::default()))
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(!svc.spaces().delete(&space, &stranger).await.unwrap());
    }

    #[tokio::test]
    async fn space_for_unknown_account_is_not_persisted() {
        let svc = test_service().await;
        let result = svc.spaces().insert("acc-missing", firm("Ghost")).await;
        assert!(result.is_err());

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM spaces", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn deleted_space_disappears_for_members() {
        let svc = test_service().await;
        let owner = seed_account(&svc, "user_1").await;
        let space = svc.spaces().insert(&owner, firm("Silva")).await.unwrap().id;

        assert!(svc.spaces().delete(&space, &owner).await.unwrap());
        assert!(!svc.spaces().delete(&space, &owner).await.unwrap());
        assert!(svc.spaces().find_by_id(&space, &owner).await.unwrap().is_none());
        assert!(!svc.spaces().exists(&space).await.unwrap());
        assert_eq!(svc.member_role(&space, &owner).await.unwrap(), None);
    }
}
