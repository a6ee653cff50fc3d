//! Presentation ports.
//!
//! The orchestrator never draws, plays sounds or speaks by itself. It talks to
//! a [`Presenter`] for fire-and-forget presentation effects and draws scene
//! objects through a [`Canvas`]. The terminal frontend implements both.

use std::time::Duration;

use crate::types::{CellStyle, Cue};

/// Fire-and-forget presentation effects requested by the orchestrator.
pub trait Presenter {
    /// Restore shared presentation state (camera, flashes) to its baseline.
    fn reset_view(&mut self);

    fn play_cue(&mut self, cue: Cue);

    /// Show the session prompt on screen.
    fn show_prompt(&mut self, prompt: &str);

    /// Narrate the session prompt.
    fn speak(&mut self, text: &str);
}

/// Cell-addressed drawing surface.
pub trait Canvas {
    fn size(&self) -> (u16, u16);

    fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle);

    fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let (w, _) = self.size();
        let mut cx = x;
        for ch in s.chars() {
            if cx >= w {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }
}

/// Object a game module hands back from `on_start`; owned by the session scene.
pub trait Presentable {
    /// Per-frame update, called before the session timers advance.
    fn update(&mut self, _dt: Duration) {}

    fn draw(&self, canvas: &mut dyn Canvas);
}

/// A clipped, translated window onto another canvas.
///
/// Coordinates are relative to the region origin; anything outside
/// `width` x `height` (or outside the parent canvas) is dropped.
pub struct Region<'a> {
    inner: &'a mut dyn Canvas,
    x: i32,
    y: i32,
    width: u16,
    height: u16,
}

impl<'a> Region<'a> {
    pub fn new(inner: &'a mut dyn Canvas, x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            inner,
            x,
            y,
            width,
            height,
        }
    }
}

impl Canvas for Region<'_> {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if x >= self.width || y >= self.height {
            return;
        }
        let px = self.x + x as i32;
        let py = self.y + y as i32;
        let (pw, ph) = self.inner.size();
        if px < 0 || py < 0 || px >= pw as i32 || py >= ph as i32 {
            return;
        }
        self.inner.put_char(px as u16, py as u16, ch, style);
    }
}
