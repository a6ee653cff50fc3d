//! Optional file logging.
//!
//! The terminal is in raw alternate-screen mode while playing, so events
//! can only go to a file. Nothing is installed unless a path is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_VAR: &str = "MICROGAMES_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "MICROGAMES_LOG";

/// Logging settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub path: Option<String>,
    pub filter: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let path = std::env::var(LOG_PATH_VAR)
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });
        let filter = std::env::var(LOG_FILTER_VAR).unwrap_or_else(|_| "info".to_string());
        Self { path, filter }
    }
}

/// Install the global subscriber. Returns `false` when no path is set.
pub fn init(config: &LogConfig) -> Result<bool> {
    let Some(path) = &config.path else {
        return Ok(false);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path}"))?;

    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;
    Ok(true)
}
