#![allow(dead_code)] // helpers are shared across test binaries

use std::sync::Arc;
use std::time::SystemTime;

use backend::config::session::SessionConfig;
use backend::services::rewards::NullWinLedger;
use backend::services::session::SessionEngine;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// Engine with a fixed seed and no external collaborators; rounds are
/// opened/resolved by each test, not by a driver task.
pub fn test_engine(config: SessionConfig) -> Arc<SessionEngine> {
    SessionEngine::new(config, Arc::new(NullWinLedger), None, Some(7))
}

/// Database-less state: session routes fully work, user store routes
/// reject.
pub fn db_less_state(engine: Arc<SessionEngine>) -> AppState {
    AppState::without_db(security(), engine)
}

pub fn bearer(username: &str) -> String {
    let token = backend::mint_access_token(username, SystemTime::now(), &security())
        .expect("token should mint");
    format!("Bearer {token}")
}
