//! The caller's own account.

use juris_core::entities::Account;
use juris_core::enums::EntityType;
use juris_core::errors::ActionError;
use juris_core::responses::{ActionResult, EntityRef};
use juris_schema::registry::names;
use serde_json::Value;

use crate::context::RequestContext;
use crate::inputs::account::UpdateAccountInput;
use crate::orchestrator::{Actions, Caller, internal};

impl Actions {
    /// The account of the authenticated caller.
    pub async fn get_current_account(
        &self,
        ctx: &RequestContext,
        raw: &Value,
    ) -> ActionResult<Account> {
        self.run_action(ctx, names::ACCOUNT, raw, move |caller: Caller, (): ()| async move {
            Ok(caller.account)
        })
        .await
    }

    pub async fn update_current_account(
        &self,
        ctx: &RequestContext,
        raw: &Value,
    ) -> ActionResult<EntityRef> {
        self.run_action(
            ctx,
            names::ENTITY_REF,
            raw,
            move |caller: Caller, input: UpdateAccountInput| async move {
                let updated = self
                    .service()
                    .update_account(&caller.identity.user_id, input.patch)
                    .await
                    .map_err(internal("update account"))?;
                if updated {
                    Ok(EntityRef::new(caller.account.id))
                } else {
                    Err(ActionError::not_found(EntityType::Account, caller.account.id))
                }
            },
        )
        .await
        .on_success("Account updated")
    }
}
