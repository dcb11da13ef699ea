//! The reward seam between the engine and the user store.
//!
//! The engine never touches the database directly; it talks to a
//! `WinLedger`, which keeps resolution decoupled from storage and lets
//! tests observe crediting without a database.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::error::AppError;
use crate::services::users;

#[async_trait]
pub trait WinLedger: Send + Sync {
    /// Credit one win to `username`'s cumulative tally. Applied
    /// at-least-once per winner per round; callers treat failures as
    /// log-and-continue.
    async fn credit_win(&self, username: &str) -> Result<(), AppError>;
}

/// Production ledger backed by the `users` table.
pub struct SeaWinLedger {
    db: DatabaseConnection,
}

impl SeaWinLedger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WinLedger for SeaWinLedger {
    async fn credit_win(&self, username: &str) -> Result<(), AppError> {
        users::credit_win(&self.db, username).await
    }
}

/// Ledger for database-less runs: credits vanish, with a debug trace.
pub struct NullWinLedger;

#[async_trait]
impl WinLedger for NullWinLedger {
    async fn credit_win(&self, username: &str) -> Result<(), AppError> {
        debug!(username, "Win credit discarded (no ledger backend)");
        Ok(())
    }
}
