//! Terminal frontend for the microgame rotation.
//!
//! A small, game-oriented rendering layer: scenes render into a plain
//! framebuffer which is diffed and flushed to the terminal. It avoids widget
//! toolkits so stage coordinates map 1:1 to terminal cells.
//!
//! - [`fb`]: framebuffer, implements the core [`Canvas`](crate::core::Canvas) port
//! - [`renderer`]: terminal mode setup and diff flushing
//! - [`presenter`]: [`TermPresenter`], the terminal [`Presenter`](crate::core::Presenter)
//! - [`stage_view`]: composes stage, prompt, countdown and cue banner

pub mod fb;
pub mod presenter;
pub mod renderer;
pub mod stage_view;

pub use microgames_core as core;
pub use microgames_types as types;

pub use fb::{Cell, FrameBuffer, Rgb};
pub use presenter::{TermPresenter, FLASH_DURATION};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use stage_view::{countdown_cells, StageLayout, StageView, Viewport};
