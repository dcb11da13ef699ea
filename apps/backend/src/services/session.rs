//! The session lifecycle engine.
//!
//! Owns the single current [`Round`] behind one mutex: every mutating
//! operation, including the timer-driven close and restart, passes
//! through that lock one at a time. HTTP handlers call the operation
//! methods; the [`SessionEngine::run`] driver task owns the timing and
//! is the only caller of the open/resolve transitions, so each round
//! closes exactly once and nothing can reschedule it.
//!
//! Resolution effects (win crediting, history persistence) are spawned
//! after the lock is released; a slow or failing collaborator can never
//! delay the next round's opening.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use time::OffsetDateTime;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::session::SessionConfig;
use crate::domain::round::{Phase, Pick, PlayerEntry, Round, PICK_MAX, PICK_MIN};
use crate::errors::DomainError;
use crate::services::history::HistorySink;
use crate::services::rewards::WinLedger;

/// Immutable snapshot of a finished round, frozen at resolution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRound {
    pub id: Uuid,
    pub opened_at: OffsetDateTime,
    pub closed_at: OffsetDateTime,
    pub winning_number: Pick,
    pub players: Vec<PlayerEntry>,
    pub winners: Vec<PlayerEntry>,
}

/// Results view shared by `/session/results` and
/// `/session/completed-results`; `winning_number` is absent while the
/// round is still open.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResults {
    pub winning_number: Option<Pick>,
    pub players: Vec<PlayerEntry>,
    pub winners: Vec<PlayerEntry>,
}

/// Public summary for the unauthenticated `GET /session`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub is_active: bool,
    pub time_left: u64,
    pub players_count: usize,
}

/// Per-player status view for `GET /session/status`.
///
/// During cooldown the finished round's roster stays visible, so
/// `has_joined` and `pick` keep reporting the caller's final standing
/// until the next round opens.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatus {
    pub is_active: bool,
    pub time_left: u64,
    pub has_joined: bool,
    /// Player count of the visible round.
    pub players: usize,
    pub has_picked: bool,
    pub pick: Option<Pick>,
    /// Whole seconds until the next round opens, present during
    /// cooldown.
    pub next_session_start: Option<u64>,
}

struct EngineState {
    phase: Phase,
    /// The open round; `Some` exactly while `phase == Open`.
    round: Option<Round>,
    /// Timer deadline matching the open round's `closes_at`.
    close_deadline: Option<Instant>,
    /// Deadline for the next round's opening, during cooldown.
    next_open_deadline: Option<Instant>,
    /// Most recently resolved round; at most one retained.
    last_resolved: Option<ResolvedRound>,
}

pub struct SessionEngine {
    config: SessionConfig,
    ledger: Arc<dyn WinLedger>,
    history: Option<Arc<dyn HistorySink>>,
    rng: Mutex<StdRng>,
    state: Mutex<EngineState>,
}

impl SessionEngine {
    /// Create an engine in the `Pending` phase. `seed` pins the winning
    /// draw sequence for tests; production passes `None` for system
    /// entropy.
    pub fn new(
        config: SessionConfig,
        ledger: Arc<dyn WinLedger>,
        history: Option<Arc<dyn HistorySink>>,
        seed: Option<u64>,
    ) -> Arc<Self> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Arc::new(Self {
            config,
            ledger,
            history,
            rng: Mutex::new(rng),
            state: Mutex::new(EngineState {
                phase: Phase::Pending,
                round: None,
                close_deadline: None,
                next_open_deadline: None,
                last_resolved: None,
            }),
        })
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Perpetual lifecycle driver: open, wait out the round, resolve,
    /// dispatch effects, wait out the cooldown, repeat. Spawn exactly
    /// once; it ends only with the process.
    pub async fn run(self: Arc<Self>) {
        loop {
            let open_for = self.open_round();
            tokio::time::sleep(open_for).await;
            if let Some(resolved) = self.resolve_round() {
                self.dispatch_round_effects(&resolved);
            }
            tokio::time::sleep(self.config.cooldown).await;
        }
    }

    /// Transition to `Open` with a fresh round. Returns the open
    /// window so the driver can sleep on it.
    pub fn open_round(&self) -> Duration {
        let duration = self.config.round_duration;
        let round = Round::open(OffsetDateTime::now_utc(), duration);
        info!(
            round_id = %round.id,
            duration_secs = duration.as_secs(),
            "Round open"
        );

        let mut state = self.state.lock();
        state.phase = Phase::Open;
        state.close_deadline = Some(Instant::now() + duration);
        state.next_open_deadline = None;
        state.round = Some(round);
        duration
    }

    /// Close the open round: freeze players, draw the winning number,
    /// compute winners, move to cooldown. Returns `None` when no round
    /// is open, which also makes a double firing harmless.
    pub fn resolve_round(&self) -> Option<ResolvedRound> {
        let winning = self.rng.lock().random_range(PICK_MIN..=PICK_MAX);
        self.resolve_round_as(winning)
    }

    fn resolve_round_as(&self, winning: Pick) -> Option<ResolvedRound> {
        let mut state = self.state.lock();
        if state.phase != Phase::Open {
            return None;
        }
        state.phase = Phase::Resolving;
        let mut round = state.round.take()?;
        round.winning_number = Some(winning);
        let winners = round.winners(winning);

        let resolved = ResolvedRound {
            id: round.id,
            opened_at: round.opened_at,
            closed_at: OffsetDateTime::now_utc(),
            winning_number: winning,
            players: round.players,
            winners,
        };
        info!(
            round_id = %resolved.id,
            winning_number = winning,
            players = resolved.players.len(),
            winners = resolved.winners.len(),
            "Round resolved"
        );

        state.last_resolved = Some(resolved.clone());
        state.phase = Phase::Cooldown;
        state.close_deadline = None;
        state.next_open_deadline = Some(Instant::now() + self.config.cooldown);
        Some(resolved)
    }

    /// Spawn the per-winner credits and the history write. Failures are
    /// logged and swallowed; the round cycle never waits on them.
    pub fn dispatch_round_effects(&self, resolved: &ResolvedRound) {
        for winner in &resolved.winners {
            let ledger = Arc::clone(&self.ledger);
            let username = winner.username.clone();
            let round_id = resolved.id;
            tokio::spawn(async move {
                if let Err(err) = ledger.credit_win(&username).await {
                    warn!(%round_id, username, error = %err, "Failed to credit win; continuing");
                }
            });
        }

        if let Some(history) = &self.history {
            let history = Arc::clone(history);
            let resolved = resolved.clone();
            tokio::spawn(async move {
                if let Err(err) = history.record_round(&resolved).await {
                    warn!(round_id = %resolved.id, error = %err, "Failed to persist round history");
                }
            });
        }
    }

    // ----- request-driven operations (require an open round) -----

    pub fn join(&self, username: &str) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let round = open_round_mut(&mut state)?;
        round.join(username)?;
        debug!(username, players = round.players.len(), "Player joined");
        Ok(())
    }

    pub fn submit_pick(&self, username: &str, value: i64) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let round = open_round_mut(&mut state)?;
        round.submit_pick(username, value)?;
        debug!(username, pick = value, "Pick recorded");
        Ok(())
    }

    /// Idempotent within an open round; removing an absent player is a
    /// success.
    pub fn leave(&self, username: &str) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let round = open_round_mut(&mut state)?;
        round.leave(username);
        debug!(username, players = round.players.len(), "Player left");
        Ok(())
    }

    // ----- read-only snapshots -----

    pub fn summary(&self) -> SessionSummary {
        let state = self.state.lock();
        SessionSummary {
            is_active: state.phase == Phase::Open,
            time_left: time_left(&state),
            players_count: visible_players(&state).len(),
        }
    }

    pub fn status_for(&self, username: &str) -> PlayerStatus {
        let state = self.state.lock();
        let players = visible_players(&state);
        let entry = players.iter().find(|p| p.username == username);
        PlayerStatus {
            is_active: state.phase == Phase::Open,
            time_left: time_left(&state),
            has_joined: entry.is_some(),
            players: players.len(),
            has_picked: entry.is_some_and(|e| e.pick.is_some()),
            pick: entry.and_then(|e| e.pick),
            next_session_start: state
                .next_open_deadline
                .map(|d| d.saturating_duration_since(Instant::now()).as_secs()),
        }
    }

    /// Results of the currently open round; `winning_number` stays
    /// absent until the close timer fires.
    pub fn current_results(&self) -> Result<RoundResults, DomainError> {
        let state = self.state.lock();
        if state.phase != Phase::Open {
            return Err(DomainError::NoActiveRound);
        }
        let round = state.round.as_ref().ok_or(DomainError::NoActiveRound)?;
        Ok(RoundResults {
            winning_number: round.winning_number,
            players: round.players.clone(),
            winners: round
                .winning_number
                .map_or_else(Vec::new, |w| round.winners(w)),
        })
    }

    /// Most recently resolved round, available across the cooldown
    /// window and while the next round runs.
    pub fn completed_results(&self) -> Result<RoundResults, DomainError> {
        let state = self.state.lock();
        let resolved = state
            .last_resolved
            .as_ref()
            .ok_or(DomainError::NoResolvedRound)?;
        Ok(RoundResults {
            winning_number: Some(resolved.winning_number),
            players: resolved.players.clone(),
            winners: resolved.winners.clone(),
        })
    }
}

fn open_round_mut(state: &mut EngineState) -> Result<&mut Round, DomainError> {
    if state.phase != Phase::Open {
        return Err(DomainError::NoActiveRound);
    }
    state.round.as_mut().ok_or(DomainError::NoActiveRound)
}

/// Players served by the read endpoints: the open round's roster while
/// one is running, the finished round's through the cooldown.
fn visible_players(state: &EngineState) -> &[PlayerEntry] {
    match state.phase {
        Phase::Open => state.round.as_ref().map_or(&[], |r| r.players.as_slice()),
        Phase::Resolving | Phase::Cooldown => state
            .last_resolved
            .as_ref()
            .map_or(&[], |r| r.players.as_slice()),
        Phase::Pending => &[],
    }
}

fn time_left(state: &EngineState) -> u64 {
    match (state.phase, state.close_deadline) {
        (Phase::Open, Some(deadline)) => deadline
            .saturating_duration_since(Instant::now())
            .as_secs(),
        _ => 0,
    }
}
