//! Microgames (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `microgames::{core,games,input,speech,term,types}` and
//! hosts the terminal binary.

pub mod logging;

pub use microgames_core as core;
pub use microgames_games as games;
pub use microgames_input as input;
pub use microgames_speech as speech;
pub use microgames_term as term;
pub use microgames_types as types;
