use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::oauth::IdentityProvider;
use crate::error::AppError;

/// Shared, read-only resources handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connection pool (optional for tests that must never touch storage)
    db: Option<Arc<DatabaseConnection>>,
    /// Token signing configuration
    pub security: SecurityConfig,
    /// External identity provider; `None` selects the demo login
    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(Arc::new(db)),
            security,
            identity_provider: None,
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            identity_provider: None,
        }
    }

    pub fn with_identity_provider(mut self, provider: Option<Arc<dyn IdentityProvider>>) -> Self {
        self.identity_provider = provider;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_deref()
    }

    pub fn require_db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db
            .as_deref()
            .ok_or_else(|| AppError::db_unavailable("Database connection not available"))
    }
}
