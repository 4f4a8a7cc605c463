use juris_auth::AuthGate;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize, Default)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    session_id: Option<String>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some((token, source)) = ctx.tokens.load_with_source() else {
        return output(
            &AuthStatusResponse {
                note: Some("no stored session; run 'juris auth login'".into()),
                ..AuthStatusResponse::default()
            },
            flags.format,
        );
    };

    let status = match AuthGate::new(ctx.service()).authenticate(Some(&token)).await {
        Ok(identity) => {
            let expires_at = ctx
                .service()
                .session_by_token(&token)
                .await?
                .map(|claims| claims.expires_at.to_rfc3339());
            AuthStatusResponse {
                authenticated: true,
                user_id: Some(identity.user_id),
                session_id: Some(identity.session_id),
                expires_at,
                token_source: Some(source.as_str()),
                note: None,
            }
        }
        Err(error) => AuthStatusResponse {
            token_source: Some(source.as_str()),
            note: Some(error.to_string()),
            ..AuthStatusResponse::default()
        },
    };

    output(&status, flags.format)
}
