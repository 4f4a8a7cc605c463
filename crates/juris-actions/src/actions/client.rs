//! Client actions.

use juris_core::entities::Client;
use juris_core::enums::EntityType;
use juris_core::errors::ActionError;
use juris_core::responses::{ActionResult, EntityRef, Page};
use juris_db::ScopedRepository;
use juris_schema::registry::names;
use serde_json::Value;

use crate::context::RequestContext;
use crate::inputs::ScopedId;
use crate::inputs::client::{
    CreateClientInput, ListClientsInput, UpdateClientInput, check_document,
};
use crate::orchestrator::{Actions, SpaceScope, internal};

const DOCUMENT_IN_USE: &str = "is already used by another client in this space";

impl Actions {
    pub async fn create_client(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: CreateClientInput| async move {
                let clients = self.service().clients();
                let taken = clients
                    .document_in_use(&scope.space_id, &input.new.document_number, None)
                    .await
                    .map_err(internal("check client document"))?;
                if taken {
                    return Err(ActionError::invalid("document_number", DOCUMENT_IN_USE));
                }
                clients
                    .insert(&scope.space_id, input.new)
                    .await
                    .map_err(internal("create client"))
            },
        )
        .await
        .on_success("Client created")
    }

    pub async fn get_client(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<Client> {
        self.run_space_action(
            ctx,
            names::CLIENT,
            raw,
            move |scope: SpaceScope, input: ScopedId| async move {
                self.service()
                    .clients()
                    .find_by_id(&input.id, &scope.space_id)
                    .await
                    .map_err(internal("get client"))?
                    .ok_or_else(|| ActionError::not_found(EntityType::Client, input.id))
            },
        )
        .await
    }

    pub async fn list_clients(
        &self,
        ctx: &RequestContext,
        raw: &Value,
    ) -> ActionResult<Page<Client>> {
        self.run_space_action(
            ctx,
            names::CLIENT_PAGE,
            raw,
            move |scope: SpaceScope, input: ListClientsInput| async move {
                self.service()
                    .clients()
                    .list(&scope.space_id, &input.paging.query(input.filter))
                    .await
                    .map_err(internal("list clients"))
            },
        )
        .await
    }

    /// Patch a client. A changed type or document number is re-checked
    /// against the stored values and against the other live clients.
    pub async fn update_client(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: UpdateClientInput| async move {
                let clients = self.service().clients();
                let patch = input.patch;
                if patch.client_type.is_some() || patch.document_number.is_some() {
                    let current = clients
                        .find_by_id(&input.id, &scope.space_id)
                        .await
                        .map_err(internal("load client"))?
                        .ok_or_else(|| ActionError::not_found(EntityType::Client, &input.id))?;
                    let client_type = patch.client_type.unwrap_or(current.client_type);
                    let document = patch
                        .document_number
                        .as_deref()
                        .unwrap_or(&current.document_number);
                    check_document(client_type, document)
                        .map_err(|message| ActionError::invalid("document_number", message))?;

                    if document != current.document_number {
                        let taken = clients
                            .document_in_use(&scope.space_id, document, Some(&input.id))
                            .await
                            .map_err(internal("check client document"))?;
                        if taken {
                            return Err(ActionError::invalid("document_number", DOCUMENT_IN_USE));
                        }
                    }
                }

                clients
                    .update(&input.id, &scope.space_id, patch)
                    .await
                    .map_err(internal("update client"))?
                    .ok_or_else(|| ActionError::not_found(EntityType::Client, input.id))
            },
        )
        .await
        .on_success("Client updated")
    }

    /// Soft-delete a client. Processes linked to it keep their link.
    pub async fn delete_client(&self, ctx: &RequestContext, raw: &Value) -> ActionResult<EntityRef> {
        self.run_space_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |scope: SpaceScope, input: ScopedId| async move {
                let deleted = self
                    .service()
                    .clients()
                    .delete(&input.id, &scope.space_id)
                    .await
                    .map_err(internal("delete client"))?;
                if deleted {
                    Ok(EntityRef::new(input.id))
                } else {
                    Err(ActionError::not_found(EntityType::Client, input.id))
                }
            },
        )
        .await
        .on_success("Client deleted")
    }
}
