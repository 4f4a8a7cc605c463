//! Process actions.

use juris_core::entities::Process;
use juris_core::enums::EntityType;
use juris_core::errors::ActionError;
use juris_core::responses::{ActionResult, EntityRef, Page};
use juris_db::{JurisService, ScopedRepository};
use juris_schema::registry::names;
use serde_json::Value;

use crate::context::RequestContext;
use crate::inputs::ScopedId;
use crate::inputs::process::{CreateProcessInput, ListProcessesInput, UpdateProcessInput};
use crate::orchestrator::{Actions, SpaceScope, internal};

/// A linked client must be live and belong to the same space.
async fn check_client(
    service: &JurisService,
    space_id: &str,
    client_id: Option<&str>,
) -> Result<(), ActionError> {
    let Some(client_id) = client_id else {
        return Ok(());
    };
    let client = service
        .clients()
        .find_by_id(client_id, space_id)
        .await
        .map_err(internal("check process client"))?;
    if client.is_none() {
        return Err(ActionError::invalid(
            "client_id",
            "client not found in this space",
        ));
    }
    Ok(())
}

impl Actions {
    pub async fn create_process(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: CreateProcessInput| async move {
                check_client(self.service(), &scope.space_id, input.new.client_id.as_deref())
                    .await?;
                self.service()
                    .processes()
                    .insert(&scope.space_id, input.new)
                    .await
                    .map_err(internal("create process"))
            },
        )
        .await
        .on_success("Process created")
    }

    pub async fn get_process(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<Process> {
        self.run_space_action(
            ctx,
            names::PROCESS,
            raw,
            move |scope: SpaceScope, input: ScopedId| async move {
                self.service()
                    .processes()
                    .find_by_id(&input.id, &scope.space_id)
                    .await
                    .map_err(internal("get process"))?
                    .ok_or_else(|| ActionError::not_found(EntityType::Process, input.id))
            },
        )
        .await
    }

    pub async fn list_processes(
        &self,
        ctx: &RequestContext,
        raw: &Value,
    ) -> ActionResult<Page<Process>> {
        self.run_space_action(
            ctx,
            names::PROCESS_PAGE,
            raw,
            move |scope: SpaceScope, input: ListProcessesInput| async move {
                self.service()
                    .processes()
                    .list(&scope.space_id, &input.paging.query(input.filter))
                    .await
                    .map_err(internal("list processes"))
            },
        )
        .await
    }

    pub async fn update_process(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: UpdateProcessInput| async move {
                if let Some(client_id) = &input.patch.client_id {
                    check_client(self.service(), &scope.space_id, client_id.as_deref()).await?;
                }
                self.service()
                    .processes()
                    .update(&input.id, &scope.space_id, input.patch)
                    .await
                    .map_err(internal("update process"))?
                    .ok_or_else(|| ActionError::not_found(EntityType::Process, input.id))
            },
        )
        .await
        .on_success("Process updated")
    }

    /// Soft-delete a process together with its deadlines.
    pub async fn delete_process(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: ScopedId| async move {
                let deleted = self
                    .service()
                    .processes()
                    .delete(&input.id, &scope.space_id)
                    .await
                    .map_err(internal("delete process"))?;
                if deleted {
                    Ok(EntityRef::new(input.id))
                } else {
                    Err(ActionError::not_found(EntityType::Process, input.id))
                }
            },
        )
        .await
        .on_success("Process deleted")
    }
}
