//! Prompt narration through an external text-to-speech command.
//!
//! The frame loop is synchronous, so narration runs on a private tokio
//! runtime: [`Narrator::speak`] only queues text on a channel and returns.
//! A background task runs the configured command (`espeak` by default) for
//! each queued line, one at a time.
//!
//! # Environment Variables
//!
//! - `MICROGAMES_SPEECH_CMD`: command line, text is appended as the last argument
//! - `MICROGAMES_SPEECH_DISABLED`: set to "1" or "true" to disable narration

pub mod config;
pub mod runtime;

pub use config::SpeechConfig;
pub use runtime::{Narrator, NarratorStats, SpeechError};
