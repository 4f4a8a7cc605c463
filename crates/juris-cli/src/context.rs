use anyhow::Context;
use juris_actions::{Actions, RequestContext};
use juris_auth::TokenStore;
use juris_config::JurisConfig;
use juris_db::JurisService;

/// Everything a command needs: configuration, the action layer and the
/// stored credentials.
pub struct AppContext {
    pub config: JurisConfig,
    pub actions: Actions,
    pub tokens: TokenStore,
}

impl AppContext {
    pub async fn init(config: JurisConfig) -> anyhow::Result<Self> {
        let service = JurisService::open(&config.database, config.general.clone())
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        let tokens = TokenStore::new(config.auth.keyring_service.clone());
        Ok(Self {
            config,
            actions: Actions::new(service),
            tokens,
        })
    }

    /// Request context carrying the stored session token, if any.
    #[must_use]
    pub fn request(&self) -> RequestContext {
        RequestContext::new(self.tokens.load())
    }

    #[must_use]
    pub const fn service(&self) -> &JurisService {
        self.actions.service()
    }
}
