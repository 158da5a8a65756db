use std::sync::Arc;

use tracing::info;

use crate::auth::google::GoogleProvider;
use crate::auth::oauth::IdentityProvider;
use crate::config::db::DbKind;
use crate::config::oauth::GoogleOAuthConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_kind: Option<DbKind>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_kind: None,
            identity_provider: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    /// Registers Google when both client credentials are configured;
    /// otherwise login stays in demo mode.
    pub fn with_google_from_env(mut self) -> Result<Self, AppError> {
        match GoogleOAuthConfig::from_env() {
            Some(config) => {
                info!("google identity provider enabled");
                self.identity_provider = Some(Arc::new(GoogleProvider::new(config)?));
            }
            None => info!("google credentials absent; login runs in demo mode"),
        }
        Ok(self)
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db_kind {
            // single entrypoint: connect + migrate
            Some(kind) => AppState::new(bootstrap_db(kind).await?, self.security_config),
            None => AppState::new_without_db(self.security_config),
        };
        Ok(state.with_identity_provider(self.identity_provider))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
