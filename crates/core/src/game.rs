//! Game module contract and the engine handle given to modules.

use std::time::Duration;

use crate::api::Api;
use crate::error::GameError;
use crate::port::Presentable;
use crate::rng::SimpleRng;

/// One microgame.
///
/// A game is authored once and is read-only after `on_load`. Each session
/// calls `on_start`, which wires handlers through the [`Api`] and returns the
/// object to show on stage.
pub trait Game {
    /// Shown and narrated at the start of every session.
    fn prompt(&self) -> &str;

    fn author(&self) -> &str;

    /// One-time initialization, called before the first session of any game.
    fn on_load(&mut self, _engine: &mut Engine) -> Result<(), GameError> {
        Ok(())
    }

    fn on_start(&self, engine: &mut Engine, api: Api) -> Result<Box<dyn Presentable>, GameError>;
}

/// Shared presentation state a module may move around during a session.
///
/// Reset to the default before every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Camera {
    /// Horizontal shift of the whole stage, in cells.
    pub offset_x: i16,
    /// Vertical shift of the whole stage, in cells.
    pub offset_y: i16,
}

/// Engine handle passed to `on_load` and `on_start`.
#[derive(Debug, Clone)]
pub struct Engine {
    width: u16,
    height: u16,
    time: Duration,
    pub camera: Camera,
    rng: SimpleRng,
}

impl Engine {
    pub fn new(width: u16, height: u16, seed: u32) -> Self {
        Self {
            width,
            height,
            time: Duration::ZERO,
            camera: Camera::default(),
            rng: SimpleRng::new(seed),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Time since the rotation started.
    pub fn time(&self) -> Duration {
        self.time
    }

    pub fn rng(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }

    pub(crate) fn advance_time(&mut self, dt: Duration) {
        self.time += dt;
    }

    pub(crate) fn reset_camera(&mut self) {
        self.camera = Camera::default();
    }
}
