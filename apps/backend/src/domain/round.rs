use std::time::Duration;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::DomainError;

/// A player's guess for the round.
pub type Pick = u8;

pub const PICK_MIN: Pick = 1;
pub const PICK_MAX: Pick = 10;

/// Lifecycle phases of the engine's single current round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Process start, before the first round opens.
    Pending,
    /// Accepting joins, picks and leaves.
    Open,
    /// Closed; winning number being drawn and winners recorded.
    Resolving,
    /// Between rounds, waiting for the next open.
    Cooldown,
}

/// One registered player and their (optional, immutable) pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerEntry {
    pub username: String,
    pub pick: Option<Pick>,
}

/// The sole mutable entity: the currently open (or most recently
/// closed) round.
///
/// Insertion order of `players` is preserved so listings are
/// deterministic; a username appears at most once.
#[derive(Debug, Clone)]
pub struct Round {
    pub id: Uuid,
    pub opened_at: OffsetDateTime,
    pub closes_at: OffsetDateTime,
    pub players: Vec<PlayerEntry>,
    /// Set exactly once, at resolution.
    pub winning_number: Option<Pick>,
}

impl Round {
    /// Fresh round opening now; `closes_at` is fixed here and never
    /// revised while the round is open.
    pub fn open(opened_at: OffsetDateTime, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            opened_at,
            closes_at: opened_at + duration,
            players: Vec::new(),
            winning_number: None,
        }
    }

    pub fn player(&self, username: &str) -> Option<&PlayerEntry> {
        self.players.iter().find(|p| p.username == username)
    }

    /// Register `username` with no pick.
    pub fn join(&mut self, username: &str) -> Result<(), DomainError> {
        if self.player(username).is_some() {
            return Err(DomainError::AlreadyJoined);
        }
        self.players.push(PlayerEntry {
            username: username.to_string(),
            pick: None,
        });
        Ok(())
    }

    /// Record an immutable pick for a joined player.
    ///
    /// Validation order matters for the API contract: range first, then
    /// membership, then the append-only check. No partial mutation on
    /// any failure.
    pub fn submit_pick(&mut self, username: &str, value: i64) -> Result<(), DomainError> {
        let pick = parse_pick(value)?;
        let entry = self
            .players
            .iter_mut()
            .find(|p| p.username == username)
            .ok_or(DomainError::NotJoined)?;
        if entry.pick.is_some() {
            return Err(DomainError::AlreadyPicked);
        }
        entry.pick = Some(pick);
        Ok(())
    }

    /// Remove `username` and any recorded pick. Removing an absent
    /// username is a no-op, not an error.
    pub fn leave(&mut self, username: &str) {
        self.players.retain(|p| p.username != username);
    }

    /// Players whose pick equals `winning`. Players with no pick never
    /// match.
    pub fn winners(&self, winning: Pick) -> Vec<PlayerEntry> {
        self.players
            .iter()
            .filter(|p| p.pick == Some(winning))
            .cloned()
            .collect()
    }
}

/// Validate a raw client-supplied pick value.
pub fn parse_pick(value: i64) -> Result<Pick, DomainError> {
    if !(i64::from(PICK_MIN)..=i64::from(PICK_MAX)).contains(&value) {
        return Err(DomainError::InvalidPick);
    }
    Ok(value as Pick)
}
