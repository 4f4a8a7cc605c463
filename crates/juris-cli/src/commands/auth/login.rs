use anyhow::Context;
use chrono::TimeDelta;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: String,
    account_id: String,
    session_id: String,
    expires_at: String,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user = args.user.trim();
    if user.is_empty() {
        anyhow::bail!("auth login: --user must not be empty");
    }

    let name = args.name.as_deref().unwrap_or(user);
    let email = args
        .email
        .clone()
        .unwrap_or_else(|| format!("{user}@localhost"));

    let account = ctx
        .service()
        .ensure_account(user, name, &email)
        .await
        .context("auth login: failed to provision account")?;

    let ttl = TimeDelta::hours(i64::from(ctx.config.auth.session_ttl_hours));
    let (token, claims) = ctx
        .service()
        .create_session(user, ttl)
        .await
        .context("auth login: failed to open session")?;
    ctx.tokens.store(&token)?;
    tracing::info!(user_id = user, session_id = %claims.session_id, "logged in");

    output(
        &AuthLoginResponse {
            authenticated: true,
            user_id: claims.user_id,
            account_id: account.id,
            session_id: claims.session_id,
            expires_at: claims.expires_at.to_rfc3339(),
        },
        flags.format,
    )
}
