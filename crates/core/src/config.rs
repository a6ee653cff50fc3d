//! Rotation configuration.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{GAME_TIME_SECS, OUTCOME_DELAY_MS, STAGE_HEIGHT, STAGE_WIDTH};

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    /// Per-session time budget.
    pub game_duration: Duration,
    /// Pause between an outcome and the next session.
    pub outcome_delay: Duration,
    pub width: u16,
    pub height: u16,
    /// Seed for the engine RNG handed to game modules.
    pub seed: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            game_duration: Duration::from_secs(GAME_TIME_SECS),
            outcome_delay: Duration::from_millis(OUTCOME_DELAY_MS),
            width: STAGE_WIDTH,
            height: STAGE_HEIGHT,
            seed: 1,
        }
    }
}

impl RotationConfig {
    /// Create from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults; the seed falls
    /// back to the wall clock.
    pub fn from_env() -> Self {
        use std::env;

        let game_duration = env::var("MICROGAMES_GAME_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64)
            .unwrap_or(Duration::from_secs(GAME_TIME_SECS));

        let outcome_delay = env::var("MICROGAMES_OUTCOME_DELAY_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(OUTCOME_DELAY_MS));

        let seed = env::var("MICROGAMES_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        Self {
            game_duration,
            outcome_delay,
            seed,
            ..Self::default()
        }
    }

    pub fn with_game_duration(mut self, game_duration: Duration) -> Self {
        self.game_duration = game_duration;
        self
    }

    pub fn with_outcome_delay(mut self, outcome_delay: Duration) -> Self {
        self.outcome_delay = outcome_delay;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
