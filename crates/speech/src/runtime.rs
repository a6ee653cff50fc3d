//! Narrator runtime.
//!
//! Bridges the sync frame loop with the async command runner.

use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::process::Command;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SpeechConfig;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("failed to create narration runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Counters shared with the background task.
#[derive(Debug, Default)]
pub struct NarratorStats {
    spoken: AtomicU64,
    failed: AtomicU64,
}

impl NarratorStats {
    pub fn spoken(&self) -> u64 {
        self.spoken.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Running narrator instance.
pub struct Narrator {
    rt: Runtime,
    tx: Option<mpsc::UnboundedSender<String>>,
    task: Option<JoinHandle<()>>,
    stats: Arc<NarratorStats>,
}

impl Narrator {
    /// Start the narrator from environment variables.
    ///
    /// Returns None if `MICROGAMES_SPEECH_DISABLED` is set or the runtime
    /// cannot be created.
    pub fn start_from_env() -> Option<Self> {
        if SpeechConfig::is_disabled() {
            info!("narration disabled via MICROGAMES_SPEECH_DISABLED");
            return None;
        }
        match Self::start(SpeechConfig::from_env()) {
            Ok(narrator) => Some(narrator),
            Err(err) => {
                warn!(error = %err, "narration unavailable");
                None
            }
        }
    }

    pub fn start(config: SpeechConfig) -> Result<Self, SpeechError> {
        let rt = Runtime::new()?;
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let stats = Arc::new(NarratorStats::default());
        let task = rt.spawn(run_narration(config, rx, Arc::clone(&stats)));
        Ok(Self {
            rt,
            tx: Some(tx),
            task: Some(task),
            stats,
        })
    }

    /// Queue `text` for narration. Never blocks.
    pub fn speak(&self, text: &str) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(text.to_string());
        }
    }

    pub fn stats(&self) -> &NarratorStats {
        &self.stats
    }

    /// Stop accepting text and wait for queued lines to finish.
    pub fn shutdown(mut self) {
        self.tx = None;
        if let Some(task) = self.task.take() {
            let _ = self.rt.block_on(task);
        }
    }
}

async fn run_narration(
    config: SpeechConfig,
    mut rx: mpsc::UnboundedReceiver<String>,
    stats: Arc<NarratorStats>,
) {
    let mut warned = false;
    while let Some(text) = rx.recv().await {
        let status = Command::new(&config.program)
            .args(&config.args)
            .arg(&text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) => {
                debug!(text = %text, code = ?status.code(), "narrated");
                stats.spoken.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                stats.failed.fetch_add(1, Ordering::Relaxed);
                if !warned {
                    warned = true;
                    warn!(program = %config.program, error = %err, "speech command failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_counted_not_fatal() {
        let config = SpeechConfig {
            program: "microgames-no-such-tts-binary".to_string(),
            args: Vec::new(),
        };
        let narrator = Narrator::start(config).unwrap();
        narrator.speak("Squeeze!");
        narrator.speak("Get the fish!");
        let stats = Arc::clone(&narrator.stats);
        narrator.shutdown();
        assert_eq!(stats.failed(), 2);
        assert_eq!(stats.spoken(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn lines_run_through_command() {
        let config = SpeechConfig {
            program: "true".to_string(),
            args: Vec::new(),
        };
        let narrator = Narrator::start(config).unwrap();
        narrator.speak("Squeeze!");
        let stats = Arc::clone(&narrator.stats);
        narrator.shutdown();
        assert_eq!(stats.spoken(), 1);
    }
}
