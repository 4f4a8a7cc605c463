use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    revoked: bool,
    cleared: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let revoked = match ctx.tokens.load() {
        Some(token) => ctx.service().revoke_session(&token).await.unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to revoke session; clearing local credentials anyway");
            false
        }),
        None => false,
    };
    ctx.tokens.delete()?;
    output(
        &AuthLogoutResponse {
            revoked,
            cleared: true,
        },
        flags.format,
    )
}
