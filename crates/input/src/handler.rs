//! Action input adapter with hold tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a key hold is kept alive by press/repeat events and auto-released when they
//! stop. Mouse holds and terminals that do report key releases never time out.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::Event;

use crate::map::{map_event, RawAction};
use crate::types::{ActionEdge, KEY_RELEASE_TIMEOUT_MS};

/// Edges queued between two frames.
pub const MAX_PENDING_EDGES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldSource {
    None,
    Key,
    Mouse,
}

/// Tracks the held state of the single action and queues its edges.
#[derive(Debug, Clone)]
pub struct ActionInput {
    hold: HoldSource,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
    release_events_seen: bool,
    pending: ArrayVec<ActionEdge, MAX_PENDING_EDGES>,
}

impl ActionInput {
    pub fn new() -> Self {
        Self {
            hold: HoldSource::None,
            last_key_time: Instant::now(),
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
            pending: ArrayVec::new(),
        }
    }

    /// Read `MICROGAMES_RELEASE_TIMEOUT_MS`, falling back to the default.
    pub fn from_env() -> Self {
        let timeout_ms = std::env::var("MICROGAMES_RELEASE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(KEY_RELEASE_TIMEOUT_MS);
        Self::new().with_key_release_timeout_ms(timeout_ms)
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self) -> bool {
        self.hold != HoldSource::None
    }

    /// Feed one terminal event. Returns `true` if it was an action event.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match map_event(event) {
            Some(raw) => {
                self.handle_raw(raw);
                true
            }
            None => false,
        }
    }

    pub fn handle_raw(&mut self, raw: RawAction) {
        match raw {
            RawAction::KeyPress | RawAction::KeyRepeat => {
                self.last_key_time = Instant::now();
                if self.hold == HoldSource::None {
                    self.hold = HoldSource::Key;
                    self.push(ActionEdge::Press);
                }
            }
            RawAction::KeyRelease => {
                self.release_events_seen = true;
                if self.hold == HoldSource::Key {
                    self.hold = HoldSource::None;
                    self.push(ActionEdge::Release);
                }
            }
            RawAction::MouseDown => {
                if self.hold == HoldSource::None {
                    self.hold = HoldSource::Mouse;
                    self.push(ActionEdge::Press);
                }
            }
            RawAction::MouseUp => {
                if self.hold == HoldSource::Mouse {
                    self.hold = HoldSource::None;
                    self.push(ActionEdge::Release);
                }
            }
        }
    }

    /// Apply the auto-release timeout and drain queued edges in arrival order.
    pub fn update(&mut self) -> ArrayVec<ActionEdge, MAX_PENDING_EDGES> {
        if self.hold == HoldSource::Key && !self.release_events_seen {
            let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
            if time_since_last_key > self.key_release_timeout_ms {
                self.hold = HoldSource::None;
                self.push(ActionEdge::Release);
            }
        }
        std::mem::take(&mut self.pending)
    }

    pub fn reset(&mut self) {
        self.hold = HoldSource::None;
        self.last_key_time = Instant::now();
        self.pending.clear();
    }

    fn push(&mut self, edge: ActionEdge) {
        // Full queue: keep the oldest edges.
        let _ = self.pending.try_push(edge);
    }
}

impl Default for ActionInput {
    fn default() -> Self {
        Self::new()
    }
}
