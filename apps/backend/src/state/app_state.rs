use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::error::AppError;
use crate::services::session::SessionEngine;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent in engine-only test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// The session lifecycle engine owning the single current round
    pub engine: Arc<SessionEngine>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, engine: Arc<SessionEngine>) -> Self {
        Self {
            db: Some(db),
            security,
            engine,
        }
    }

    /// State without a database connection (for testing); user store
    /// routes reject, session routes work.
    pub fn without_db(security: SecurityConfig, engine: Arc<SessionEngine>) -> Self {
        Self {
            db: None,
            security,
            engine,
        }
    }

    pub fn require_db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::internal("Database connection not available".to_string()))
    }
}
