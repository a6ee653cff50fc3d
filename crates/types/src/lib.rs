//! Shared types module - constants and plain data used across the workspace
//!
//! Everything here is pure data with no external dependencies, so it can be
//! used by the orchestrator core, the terminal renderer, the input adapter and
//! the game modules alike.
//!
//! # Session Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GAME_TIME_SECS` | 4 | Time budget of one session before it fails by timeout |
//! | `OUTCOME_DELAY_MS` | 2000 | Pause between an outcome and the next session |
//! | `TICK_MS` | 16 | Fixed frame interval (~60 FPS) |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Auto-release for terminals without key-release events |
//!
//! # Stage Geometry
//!
//! Every session sees the same canonical stage, measured in terminal cells:
//! `STAGE_WIDTH` x `STAGE_HEIGHT` (64 x 22).
//!
//! # Examples
//!
//! ```
//! use microgames_types::{Cue, Outcome, SessionState};
//!
//! assert_eq!(Outcome::Succeeded.cue(), Cue::Success);
//! assert!(SessionState::Failed.is_done());
//! assert!(!SessionState::Running.is_done());
//! ```

/// Default per-session time budget in seconds.
pub const GAME_TIME_SECS: u64 = 4;

/// Delay between a session outcome and the rotation advancing (2 time units).
pub const OUTCOME_DELAY_MS: u64 = 2000;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Hold state timeout when the terminal never reports a key release.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Canonical stage width in cells.
pub const STAGE_WIDTH: u16 = 64;

/// Canonical stage height in cells.
pub const STAGE_HEIGHT: u16 = 22;


/// Edge of the single logical action.
///
/// `Down` is the level signal: it is delivered once per frame while the action
/// is held, after the initial `Press`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionEdge {
    Press,
    Release,
    Down,
}

/// Audio cue requested by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Played when a session succeeds ("cool").
    Success,
    /// Played when a session fails or times out ("scream").
    Failure,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Success => "success",
            Cue::Failure => "failure",
        }
    }
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    pub fn cue(&self) -> Cue {
        match self {
            Outcome::Succeeded => Cue::Success,
            Outcome::Failed => Cue::Failure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "succeeded",
            Outcome::Failed => "failed",
        }
    }
}

/// Per-session state machine.
///
/// `Pending → Running → {Succeeded, Failed} → Advancing → Ended`
///
/// There is no transition out of `Succeeded`/`Failed` back to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Scene built, module not started yet.
    Pending,
    /// Deadline armed, module running.
    Running,
    Succeeded,
    Failed,
    /// Outcome delay elapsed; the orchestrator will switch to the next game.
    Advancing,
    /// Torn down.
    Ended,
}

impl SessionState {
    /// Whether an outcome has already been decided.
    pub fn is_done(&self) -> bool {
        !matches!(self, SessionState::Pending | SessionState::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Pending => "pending",
            SessionState::Running => "running",
            SessionState::Succeeded => "succeeded",
            SessionState::Failed => "failed",
            SessionState::Advancing => "advancing",
            SessionState::Ended => "ended",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    /// Default style with a different foreground.
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn on(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}
