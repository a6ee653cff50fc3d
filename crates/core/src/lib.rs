//! Orchestrator core - sessions, timers, channels and the game contract
//!
//! This crate runs a rotation of short timed microgames. It has **no
//! dependencies** on a terminal, audio or speech backend: presentation is
//! reached through the [`Presenter`] and [`Canvas`] ports, which keeps the
//! whole state machine deterministic and testable with a virtual clock.
//!
//! # Module Structure
//!
//! - [`event`]: broadcast channel with snapshot-on-trigger semantics
//! - [`timer`]: cancelable one-shot timers on a per-session virtual clock
//! - [`api`]: the capability facade a game module receives
//! - [`game`]: the [`Game`] contract and the [`Engine`] handle
//! - [`port`]: presentation ports ([`Presenter`], [`Canvas`], [`Presentable`])
//! - [`rotation`]: cyclic cursor over the game sequence
//! - [`orchestrator`]: the session state machine and rotation driver
//! - [`config`]: environment-driven [`RotationConfig`]
//! - [`rng`]: deterministic RNG for game modules
//!
//! # Session Lifecycle
//!
//! ```text
//! Pending → Running → {Succeeded, Failed} → Advancing → Ended
//! ```
//!
//! - The deadline (default 4s) fires the timeout channel, then fails the session
//! - The first `succeed()`/`fail()` wins; later calls are silent no-ops
//! - 2s after the outcome the rotation advances, `on_end` listeners run, and
//!   the old scene is torn down before the next game starts
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use microgames_core::{
//!     Api, Canvas, Cue, Engine, Game, GameError, Orchestrator, Presentable, Presenter,
//!     RotationConfig, SessionState,
//! };
//!
//! struct PressToWin;
//! struct Nothing;
//!
//! impl Presentable for Nothing {
//!     fn draw(&self, _canvas: &mut dyn Canvas) {}
//! }
//!
//! impl Game for PressToWin {
//!     fn prompt(&self) -> &str { "Press!" }
//!     fn author(&self) -> &str { "docs" }
//!     fn on_start(&self, _engine: &mut Engine, api: Api) -> Result<Box<dyn Presentable>, GameError> {
//!         let a = api.clone();
//!         api.on_action_press(move || a.succeed());
//!         Ok(Box::new(Nothing))
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Cues(Vec<Cue>);
//!
//! impl Presenter for Cues {
//!     fn reset_view(&mut self) {}
//!     fn play_cue(&mut self, cue: Cue) { self.0.push(cue); }
//!     fn show_prompt(&mut self, _prompt: &str) {}
//!     fn speak(&mut self, _text: &str) {}
//! }
//!
//! let games: Vec<Box<dyn Game>> = vec![Box::new(PressToWin)];
//! let mut rotation =
//!     Orchestrator::start_rotation(games, RotationConfig::default(), Cues::default()).unwrap();
//!
//! rotation.tick(Duration::from_millis(500)).unwrap();
//! rotation.press().unwrap();
//! assert_eq!(rotation.session_state(), Some(SessionState::Succeeded));
//! assert_eq!(rotation.presenter().0, vec![Cue::Success]);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod orchestrator;
pub mod port;
pub mod rng;
pub mod rotation;
mod scene;
mod session;
pub mod timer;

pub use microgames_types as types;

// Re-export commonly used types for convenience
pub use api::Api;
pub use config::RotationConfig;
pub use error::{GameError, OrchestratorError};
pub use event::{EventChannel, Subscription};
pub use game::{Camera, Engine, Game};
pub use orchestrator::Orchestrator;
pub use port::{Canvas, Presentable, Presenter, Region};
pub use rng::SimpleRng;
pub use rotation::Rotation;
pub use timer::{TimerHandle, TimerQueue};
pub use types::{ActionEdge, CellStyle, Cue, Outcome, Rgb, SessionState};
