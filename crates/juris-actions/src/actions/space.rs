//! Space actions.
//!
//! Spaces are addressed through membership: any member may read a space,
//! owners and admins may update it, and only the owner may delete it.

use juris_core::entities::{Space, SpaceMember};
use juris_core::enums::EntityType;
use juris_core::errors::ActionError;
use juris_core::responses::{ActionResult, EntityRef, Page};
use juris_db::ScopedRepository;
use juris_schema::registry::names;
use serde_json::Value;

use crate::context::RequestContext;
use crate::inputs::space::{CreateSpaceInput, ListSpacesInput, SpaceIdInput, UpdateSpaceInput};
use crate::orchestrator::{Actions, Caller, SpaceScope, internal};

impl Actions {
    /// Create a space; the caller becomes its owner.
    pub async fn create_space(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |caller: Caller, input: CreateSpaceInput| async move {
                self.service()
                    .spaces()
                    .insert(&caller.account.id, input.new)
                    .await
                    .map_err(internal("create space"))
            },
        )
        .await
        .on_success("Space created")
    }

    pub async fn get_space(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<Space> {
        self.run_space_action(
            ctx,
            names::SPACE,
            raw,
            move |scope: SpaceScope, input: SpaceIdInput| async move {
                self.service()
                    .spaces()
                    .find_by_id(&input.id, &scope.account.id)
                    .await
                    .map_err(internal("get space"))?
                    .ok_or_else(|| ActionError::not_found(EntityType::Space, input.id))
            },
        )
        .await
    }

    /// Spaces the caller is a member of.
    pub async fn list_spaces(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<Page<Space>> {
        self.run_action(
            ctx,
            names::SPACE_PAGE,
            raw,
            move |caller: Caller, input: ListSpacesInput| async move {
                self.service()
                    .spaces()
                    .list(&caller.account.id, &input.paging.query(input.filter))
                    .await
                    .map_err(internal("list spaces"))
            },
        )
        .await
    }

    pub async fn update_space(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: UpdateSpaceInput| async move {
                scope.require_manager()?;
                self.service()
                    .spaces()
                    .update(&input.id, &scope.account.id, input.patch)
                    .await
                    .map_err(internal("update space"))?
                    .ok_or_else(|| ActionError::not_found(EntityType::Space, input.id))
            },
        )
        .await
        .on_success("Space updated")
    }

    /// Soft-delete a space. Its clients, processes and deadlines become
    /// unreachable with it.
    pub async fn delete_space(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        let result = self
            .run_space_action(
                ctx,
                names::ENTITY_REF,
                raw,
                move |scope: SpaceScope, input: SpaceIdInput| async move {
                    scope.require_owner()?;
                    let deleted = self
                        .service()
                        .spaces()
                        .delete(&input.id, &scope.account.id)
                        .await
                        .map_err(internal("delete space"))?;
                    if deleted {
                        tracing::info!(space_id = %input.id, "space deleted");
                        Ok(EntityRef::new(input.id))
                    } else {
                        Err(ActionError::not_found(EntityType::Space, input.id))
                    }
                },
            )
            .await;
        if let Some(deleted) = &result.data {
            ctx.cache().forget_space(&deleted.id);
        }
        result.on_success("Space deleted")
    }

    /// Members of a space, visible to any member.
    pub async fn list_space_members(
        &self,
        ctx: &RequestContext,
        raw: &Value,
    ) -> ActionResult<Vec<SpaceMember>> {
        self.run_space_action(
            ctx,
            names::SPACE_MEMBERS,
            raw,
            move |_scope: SpaceScope, input: SpaceIdInput| async move {
                self.service()
                    .members(&input.id)
                    .await
                    .map_err(internal("list space members"))
            },
        )
        .await
    }
}
