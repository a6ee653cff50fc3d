//! Error types.

use thiserror::Error;

/// Failure reported by a game module from `on_load` or `on_start`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct GameError {
    message: String,
}

impl GameError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced by the orchestrator.
///
/// A module defect halts the rotation; nothing is skipped or retried.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("game `{prompt}` failed to load: {source}")]
    Load {
        prompt: String,
        #[source]
        source: GameError,
    },

    #[error("game `{prompt}` failed to start: {source}")]
    Start {
        prompt: String,
        #[source]
        source: GameError,
    },

    #[error("rotation halted after a game module failure")]
    Halted,
}
