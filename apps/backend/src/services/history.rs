//! Fire-and-forget persistence of finished rounds.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::entities::rounds;
use crate::error::AppError;
use crate::services::session::ResolvedRound;

#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Persist a finished round. The engine dispatches this without
    /// holding its lock and never blocks on the result.
    async fn record_round(&self, round: &ResolvedRound) -> Result<(), AppError>;
}

/// Sink backed by the `rounds` table.
pub struct SeaHistorySink {
    db: DatabaseConnection,
}

impl SeaHistorySink {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistorySink for SeaHistorySink {
    async fn record_round(&self, round: &ResolvedRound) -> Result<(), AppError> {
        let players = serde_json::to_value(&round.players)
            .map_err(|e| AppError::internal(format!("Failed to serialize players: {e}")))?;
        let winners = serde_json::to_value(&round.winners)
            .map_err(|e| AppError::internal(format!("Failed to serialize winners: {e}")))?;

        rounds::ActiveModel {
            id: Set(round.id),
            winning_number: Set(i16::from(round.winning_number)),
            opened_at: Set(round.opened_at),
            closed_at: Set(round.closed_at),
            players: Set(players),
            winners: Set(winners),
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }
}
