//! Deadline actions.
//!
//! A deadline always hangs off a live process of the same space. Status
//! changes follow [`DeadlineStatus::can_transition_to`].

use juris_core::entities::Deadline;
use juris_core::enums::{DeadlineStatus, EntityType};
use juris_core::errors::ActionError;
use juris_core::responses::{ActionResult, EntityRef, Page};
use juris_db::ScopedRepository;
use juris_schema::registry::names;
use serde_json::Value;

use crate::context::RequestContext;
use crate::inputs::ScopedId;
use crate::inputs::deadline::{CreateDeadlineInput, ListDeadlinesInput, UpdateDeadlineInput};
use crate::orchestrator::{Actions, SpaceScope, internal};

fn transition_error(from: DeadlineStatus, to: DeadlineStatus) -> ActionError {
    ActionError::invalid(
        "status",
        format!("cannot move from {} to {}", from.as_str(), to.as_str()),
    )
}

impl Actions {
    pub async fn create_deadline(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: CreateDeadlineInput| async move {
                let process = self
                    .service()
                    .processes()
                    .find_by_id(&input.new.process_id, &scope.space_id)
                    .await
                    .map_err(internal("check deadline process"))?;
                if process.is_none() {
                    return Err(ActionError::invalid(
                        "process_id",
                        "process not found in this space",
                    ));
                }
                self.service()
                    .deadlines()
                    .insert(&scope.space_id, input.new)
                    .await
                    .map_err(internal("create deadline"))
            },
        )
        .await
        .on_success("Deadline created")
    }

    pub async fn get_deadline(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<Deadline> {
        self.run_space_action(
            ctx,
            names::DEADLINE,
            raw,
            move |scope: SpaceScope, input: ScopedId| async move {
                self.service()
                    .deadlines()
                    .find_by_id(&input.id, &scope.space_id)
                    .await
                    .map_err(internal("get deadline"))?
                    .ok_or_else(|| ActionError::not_found(EntityType::Deadline, input.id))
            },
        )
        .await
    }

    pub async fn list_deadlines(
        &self,
        ctx: &RequestContext,
        raw: &Value,
    ) -> ActionResult<Page<Deadline>> {
        self.run_space_action(
            ctx,
            names::DEADLINE_PAGE,
            raw,
            move |scope: SpaceScope, input: ListDeadlinesInput| async move {
                self.service()
                    .deadlines()
                    .list(&scope.space_id, &input.paging.query(input.filter))
                    .await
                    .map_err(internal("list deadlines"))
            },
        )
        .await
    }

    pub async fn update_deadline(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: UpdateDeadlineInput| async move {
                let deadlines = self.service().deadlines();
                if let Some(next) = input.patch.status {
                    let current = deadlines
                        .find_by_id(&input.id, &scope.space_id)
                        .await
                        .map_err(internal("load deadline"))?
                        .ok_or_else(|| ActionError::not_found(EntityType::Deadline, &input.id))?;
                    if !current.status.can_transition_to(next) {
                        return Err(transition_error(current.status, next));
                    }
                }
                deadlines
                    .update(&input.id, &scope.space_id, input.patch)
                    .await
                    .map_err(internal("update deadline"))?
                    .ok_or_else(|| ActionError::not_found(EntityType::Deadline, input.id))
            },
        )
        .await
        .on_success("Deadline updated")
    }

    pub async fn delete_deadline(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: ScopedId| async move {
                let deleted = self
                    .service()
                    .deadlines()
                    .delete(&input.id, &scope.space_id)
                    .await
                    .map_err(internal("delete deadline"))?;
                if deleted {
                    Ok(EntityRef::new(input.id))
                } else {
                    Err(ActionError::not_found(EntityType::Deadline, input.id))
                }
            },
        )
        .await
        .on_success("Deadline deleted")
    }
}
