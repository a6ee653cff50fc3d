//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of the orchestrator. It maps
//! `crossterm` key and mouse events onto the single logical action and
//! provides an [`ActionInput`] adapter that turns them into press/release
//! edges, including terminals without key-release events.

pub mod handler;
pub mod map;

pub use microgames_types as types;

pub use handler::ActionInput;
pub use map::{map_event, should_quit, RawAction};
