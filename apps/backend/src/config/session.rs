use std::time::Duration;

use crate::error::AppError;

/// Default length of the open window of a round.
pub const DEFAULT_ROUND_SECS: u64 = 20;
/// Default pause between a round's resolution and the next open.
pub const DEFAULT_COOLDOWN_SECS: u64 = 10;

/// Timing configuration for the round lifecycle. Both values are fixed
/// at schedule time; nothing reschedules an in-flight round.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub round_duration: Duration,
    pub cooldown: Duration,
}

impl SessionConfig {
    pub fn new(round_duration: Duration, cooldown: Duration) -> Self {
        Self {
            round_duration,
            cooldown,
        }
    }

    /// Read `GAME_ROUND_SECS` / `GAME_COOLDOWN_SECS`, falling back to
    /// the defaults when unset. A present-but-unparseable value is a
    /// configuration error, not a silent fallback.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            round_duration: duration_from_env("GAME_ROUND_SECS", DEFAULT_ROUND_SECS)?,
            cooldown: duration_from_env("GAME_COOLDOWN_SECS", DEFAULT_COOLDOWN_SECS)?,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_duration: Duration::from_secs(DEFAULT_ROUND_SECS),
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
        }
    }
}

fn duration_from_env(var: &str, default_secs: u64) -> Result<Duration, AppError> {
    match std::env::var(var) {
        Ok(raw) => {
            let secs: u64 = raw
                .parse()
                .map_err(|_| AppError::config(format!("{var} must be a number of seconds")))?;
            if secs == 0 {
                return Err(AppError::config(format!("{var} must be positive")));
            }
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}
