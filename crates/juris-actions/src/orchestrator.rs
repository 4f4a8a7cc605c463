//! The generic validated tenant action.
//!
//! Every action runs the same pipeline:
//!
//! ```text
//! raw input ─► InputSchema::parse ─► AuthGate ─► account ─► [space membership] ─► handler ─► output schema
//! ```
//!
//! Each stage short-circuits into an `ActionResult` failure: field errors
//! before any I/O, authentication before any repository access,
//! authorization before the handler runs. Repository failures are logged
//! here and surface only as a generic internal error.

use std::future::Future;

use juris_auth::AuthGate;
use juris_core::entities::Account;
use juris_core::enums::{EntityType, MemberRole};
use juris_core::errors::{ActionError, OUTPUT_VALIDATION_MESSAGE};
use juris_core::identity::AuthIdentity;
use juris_core::responses::ActionResult;
use juris_db::JurisService;
use juris_db::error::DatabaseError;
use juris_schema::{InputSchema, SchemaRegistry};
use serde::Serialize;
use serde_json::Value;

use crate::context::RequestContext;

/// Inputs addressed to one space.
pub trait SpaceScoped {
    fn space_id(&self) -> &str;
}

/// The authenticated caller of an account-level action.
#[derive(Debug, Clone)]
pub struct Caller {
    pub identity: AuthIdentity,
    pub account: Account,
}

/// The authenticated caller of a space-level action, with their role in
/// that space.
#[derive(Debug, Clone)]
pub struct SpaceScope {
    pub account: Account,
    pub space_id: String,
    pub role: MemberRole,
}

impl SpaceScope {
    /// # Errors
    ///
    /// Returns `ActionError::Authorization` unless the caller is an owner or
    /// admin of the space.
    pub fn require_manager(&self) -> Result<(), ActionError> {
        if self.role.can_manage() {
            Ok(())
        } else {
            Err(ActionError::Authorization(format!(
                "role '{}' cannot manage this space",
                self.role
            )))
        }
    }

    /// # Errors
    ///
    /// Returns `ActionError::Authorization` unless the caller owns the space.
    pub fn require_owner(&self) -> Result<(), ActionError> {
        if self.role == MemberRole::Owner {
            Ok(())
        } else {
            Err(ActionError::Authorization(
                "only the space owner can do this".to_string(),
            ))
        }
    }
}

/// Map a repository failure to the caller-safe internal error, logging the
/// real cause.
pub(crate) fn internal(operation: &'static str) -> impl FnOnce(DatabaseError) -> ActionError {
    move |error: DatabaseError| {
        tracing::error!(%error, operation, "repository call failed");
        ActionError::internal()
    }
}

/// Entry point for every action.
pub struct Actions {
    service: JurisService,
    registry: SchemaRegistry,
}

impl Actions {
    #[must_use]
    pub fn new(service: JurisService) -> Self {
        Self {
            service,
            registry: SchemaRegistry::new(),
        }
    }

    #[must_use]
    pub const fn service(&self) -> &JurisService {
        &self.service
    }

    /// Run an account-level action: validate `raw` as `I`, authenticate,
    /// resolve the caller's account, run `handler`, and check its output
    /// against the schema registered as `output`.
    pub async fn run_action<I, O, F, Fut>(
        &self,
        ctx: &RequestContext,
        output: &'static str,
        raw: &Value,
        handler: F,
    ) -> ActionResult<O>
    where
        I: InputSchema,
        O: Serialize,
        F: FnOnce(Caller, I) -> Fut,
        Fut: Future<Output = Result<O, ActionError>>,
    {
        let outcome = async {
            let input = I::parse(raw).map_err(ActionError::Validation)?;
            let caller = self.caller(ctx).await?;
            handler(caller, input).await
        }
        .await;
        self.finish(output, outcome)
    }

    /// Run a space-level action. Like [`Self::run_action`], plus the caller
    /// must be a member of the space the input addresses.
    pub async fn run_space_action<I, O, F, Fut>(
        &self,
        ctx: &RequestContext,
        output: &'static str,
        raw: &Value,
        handler: F,
    ) -> ActionResult<O>
    where
        I: InputSchema + SpaceScoped,
        O: Serialize,
        F: FnOnce(SpaceScope, I) -> Fut,
        Fut: Future<Output = Result<O, ActionError>>,
    {
        let outcome = async {
            let input = I::parse(raw).map_err(ActionError::Validation)?;
            let caller = self.caller(ctx).await?;
            let scope = self
                .space_scope(ctx, caller.account, input.space_id())
                .await?;
            handler(scope, input).await
        }
        .await;
        self.finish(output, outcome)
    }

    async fn caller(&self, ctx: &RequestContext) -> Result<Caller, ActionError> {
        let token = ctx.session_token();
        let identity = ctx
            .cache()
            .identity(move || self.authenticate(token))
            .await?
            .clone();
        let user_id = identity.user_id.as_str();
        let account = ctx
            .cache()
            .account(move || self.resolve_account(user_id))
            .await?
            .clone();
        Ok(Caller { identity, account })
    }

    async fn authenticate(&self, token: Option<&str>) -> Result<AuthIdentity, ActionError> {
        AuthGate::new(&self.service)
            .authenticate(token)
            .await
            .map_err(|error| {
                if error.is_unauthenticated() {
                    ActionError::Authentication(error.to_string())
                } else {
                    tracing::error!(%error, "session lookup failed");
                    ActionError::internal()
                }
            })
    }

    async fn resolve_account(&self, auth_user_id: &str) -> Result<Account, ActionError> {
        self.service
            .find_account_by_auth_user(auth_user_id)
            .await
            .map_err(internal("resolve account"))?
            .ok_or_else(|| {
                ActionError::Authentication("no account is linked to this session".to_string())
            })
    }

    async fn space_scope(
        &self,
        ctx: &RequestContext,
        account: Account,
        space_id: &str,
    ) -> Result<SpaceScope, ActionError> {
        let service = &self.service;
        let account_id = account.id.as_str();
        let role = ctx
            .cache()
            .space_role(space_id, move || async move {
                service
                    .member_role(space_id, account_id)
                    .await
                    .map_err(internal("resolve space membership"))
            })
            .await?;

        if let Some(role) = role {
            return Ok(SpaceScope {
                account,
                space_id: space_id.to_string(),
                role,
            });
        }

        let exists = self
            .service
            .spaces()
            .exists(space_id)
            .await
            .map_err(internal("check space existence"))?;
        if exists {
            tracing::warn!(space_id, account_id = %account.id, "space access denied");
            Err(ActionError::Authorization(
                "you are not a member of this space".to_string(),
            ))
        } else {
            Err(ActionError::not_found(EntityType::Space, space_id))
        }
    }

    fn finish<O: Serialize>(
        &self,
        output: &'static str,
        outcome: Result<O, ActionError>,
    ) -> ActionResult<O> {
        let checked = outcome.and_then(|data| {
            self.registry
                .validate_output(output, &data)
                .map_err(|error| {
                    tracing::error!(%error, schema = output, "action output failed schema validation");
                    ActionError::Internal(OUTPUT_VALIDATION_MESSAGE.to_string())
                })?;
            Ok(data)
        });
        if let Err(error) = &checked {
            tracing::debug!(kind = %error.kind(), %error, "action failed");
        }
        ActionResult::from(checked)
    }
}
