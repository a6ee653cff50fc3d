//! StageView: maps the orchestrator and presenter state into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::time::Duration;

use crate::core::{Canvas, Orchestrator, Region};
use crate::fb::{Cell, FrameBuffer, Rgb};
use crate::presenter::TermPresenter;
use crate::types::{CellStyle, Cue, SessionState};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen position of the stage interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageLayout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub stage_x: u16,
    pub stage_y: u16,
    pub stage_w: u16,
    pub stage_h: u16,
    /// Row of the countdown bar, if it fits on screen.
    pub bar_y: Option<u16>,
}

const BACKDROP: Rgb = Rgb::new(24, 26, 34);
const PROMPT_MARGIN: u16 = 2;

#[derive(Debug, Default, Clone, Copy)]
pub struct StageView;

impl StageView {
    pub fn new() -> Self {
        Self::default()
    }


    /// Center a `stage_w` x `stage_h` stage plus border and bar in the viewport.
    pub fn layout(&self, stage_w: u16, stage_h: u16, viewport: Viewport) -> StageLayout {
        let frame_w = stage_w + 2;
        let frame_h = stage_h + 2;
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h + 1) / 2;
        let bar_row = frame_y + frame_h;
        StageLayout {
            frame_x,
            frame_y,
            stage_x: frame_x + 1,
            stage_y: frame_y + 1,
            stage_w,
            stage_h,
            bar_y: (bar_row < viewport.height).then_some(bar_row),
        }
    }

    /// Render one frame into an existing framebuffer.
    pub fn render_into(
        &self,
        orchestrator: &Orchestrator<TermPresenter>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let config = orchestrator.config();
        let layout = self.layout(config.width, config.height, viewport);
        let presenter = orchestrator.presenter();

        fb.fill_rect(
            layout.stage_x,
            layout.stage_y,
            layout.stage_w,
            layout.stage_h,
            ' ',
            CellStyle::default().on(BACKDROP),
        );
        draw_border(
            fb,
            layout.frame_x,
            layout.frame_y,
            layout.stage_w + 2,
            layout.stage_h + 2,
            CellStyle::fg(Rgb::new(200, 200, 200)),
        );

        {
            let mut stage = Region::new(
                fb,
                layout.stage_x as i32,
                layout.stage_y as i32,
                layout.stage_w,
                layout.stage_h,
            );
            orchestrator.draw(&mut stage);
            if let Some(prompt) = presenter.prompt() {
                draw_wave_text(&mut stage, PROMPT_MARGIN, 1, prompt, presenter.prompt_age());
            }
            if let Some(cue) = presenter.flash() {
                draw_banner(&mut stage, cue);
            }
        }

        if let Some(bar_y) = layout.bar_y {
            self.draw_countdown(fb, orchestrator, &layout, bar_y);
        }

        if orchestrator.is_halted() {
            let text = "ROTATION HALTED";
            let x = layout.stage_x + layout.stage_w.saturating_sub(text.len() as u16) / 2;
            let y = layout.stage_y + layout.stage_h / 2;
            fb.put_str(x, y, text, CellStyle::fg(Rgb::new(255, 90, 90)).bold());
        }

        if layout.frame_y > 0 {
            let dim = CellStyle {
                dim: true,
                ..CellStyle::default()
            };
            fb.put_str(layout.frame_x, layout.frame_y - 1, "space/enter/click: act   q: quit", dim);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, orchestrator: &Orchestrator<TermPresenter>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(orchestrator, viewport, &mut fb);
        fb
    }

    fn draw_countdown(
        &self,
        fb: &mut FrameBuffer,
        orchestrator: &Orchestrator<TermPresenter>,
        layout: &StageLayout,
        y: u16,
    ) {
        let budget = orchestrator.config().game_duration;
        let running = orchestrator.session_state() == Some(SessionState::Running);
        let left = if running { orchestrator.time_left() } else { Duration::ZERO };
        let width = layout.stage_w + 2;
        let filled = countdown_cells(left, budget, width);

        let style = CellStyle::fg(countdown_color(left, budget));
        let empty = CellStyle {
            dim: true,
            ..CellStyle::default()
        };
        for dx in 0..width {
            if dx < filled {
                fb.put_char(layout.frame_x + dx, y, '█', style);
            } else {
                fb.put_char(layout.frame_x + dx, y, '░', empty);
            }
        }
    }
}

/// Number of bar cells lit for `left` out of `budget`.
pub fn countdown_cells(left: Duration, budget: Duration, width: u16) -> u16 {
    if budget.is_zero() {
        return 0;
    }
    let ratio = (left.as_secs_f64() / budget.as_secs_f64()).clamp(0.0, 1.0);
    (ratio * width as f64).ceil() as u16
}

fn countdown_color(left: Duration, budget: Duration) -> Rgb {
    if left.as_secs_f64() < budget.as_secs_f64() * 0.25 {
        Rgb::new(230, 80, 70)
    } else {
        Rgb::new(240, 200, 80)
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Oscillate between `lo` and `hi` as `t` advances.
fn wave(lo: f64, hi: f64, t: f64) -> f64 {
    lo + (hi - lo) * (t.sin() + 1.0) / 2.0
}

/// Per-character wave: vertical bob, a bold pulse and a hue swing.
fn draw_wave_text(canvas: &mut dyn Canvas, x: u16, y: u16, text: &str, age: Duration) {
    let t = age.as_secs_f64() * 6.0;
    for (i, ch) in text.chars().enumerate() {
        let i_f = i as f64;
        let dy = wave(-1.0, 1.0, t + i_f * 0.5).round() as i32;
        let pulse = wave(1.0, 1.1, t + i_f);
        let hue = wave(-30.0, 30.0, t + i_f);
        let style = CellStyle {
            fg: hue_shift(Rgb::new(255, 255, 255), Rgb::new(255, 210, 120), hue),
            bold: pulse > 1.05,
            ..CellStyle::default().on(BACKDROP)
        };
        let cy = y as i32 + dy;
        if cy >= 0 {
            canvas.put_char(x + i as u16, cy as u16, ch, style);
        }
    }
}

fn hue_shift(a: Rgb, b: Rgb, swing: f64) -> Rgb {
    let k = ((swing + 30.0) / 60.0).clamp(0.0, 1.0);
    let mix = |p: u8, q: u8| (p as f64 + (q as f64 - p as f64) * k).round() as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

fn draw_banner(canvas: &mut dyn Canvas, cue: Cue) {
    let (text, bg) = match cue {
        Cue::Success => ("  COOL!  ", Rgb::new(60, 170, 90)),
        Cue::Failure => ("  NOPE!  ", Rgb::new(190, 50, 50)),
    };
    let (w, h) = canvas.size();
    let x = w.saturating_sub(text.len() as u16) / 2;
    let y = h / 2;
    canvas.put_str(x, y, text, CellStyle::fg(Rgb::new(255, 255, 255)).bold().on(bg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_is_full_at_start_and_empty_at_end() {
        let budget = Duration::from_secs(4);
        assert_eq!(countdown_cells(budget, budget, 20), 20);
        assert_eq!(countdown_cells(Duration::from_secs(2), budget, 20), 10);
        assert_eq!(countdown_cells(Duration::ZERO, budget, 20), 0);
        assert_eq!(countdown_cells(Duration::ZERO, Duration::ZERO, 20), 0);
    }

    #[test]
    fn wave_stays_in_range() {
        for i in 0..100 {
            let v = wave(-2.0, 2.0, i as f64 * 0.37);
            assert!((-2.0..=2.0).contains(&v));
        }
    }

    #[test]
    fn layout_centers_stage() {
        let view = StageView::new();
        let layout = view.layout(10, 4, Viewport::new(20, 10));
        assert_eq!(layout.frame_x, 4);
        assert_eq!(layout.stage_x, 5);
        assert_eq!(layout.bar_y, Some(layout.frame_y + 6));

        let cramped = view.layout(10, 4, Viewport::new(12, 6));
        assert_eq!(cramped.bar_y, None);
    }
}
