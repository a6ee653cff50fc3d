//! "Squeeze!": a mosquito buzzes around; squeeze the hand when it is close.
//!
//! One press decides the session. If the mosquito is within reach of the
//! hand it is caught, otherwise the squeeze misses. On timeout it flies off.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use microgames_core::{
    Api, Canvas, CellStyle, Engine, Game, GameError, Presentable, Rgb, SimpleRng,
};

/// Horizontal reach of the hand, in cells from its center.
pub const REACH_X: f32 = 3.0;
/// Vertical reach of the hand, in cells from its center.
pub const REACH_Y: f32 = 1.5;

/// First stage row the mosquito may use (the prompt sits above).
const TOP_ROW: f32 = 4.0;
const ESCAPE_SPEED: f32 = 24.0;

pub struct Squeeze {
    pinned: Option<(f32, f32)>,
}

impl Squeeze {
    pub fn new() -> Self {
        Self { pinned: None }
    }

    /// Start the mosquito at a fixed stage position, hovering in place.
    pub fn pinned(x: f32, y: f32) -> Self {
        Self {
            pinned: Some((x, y)),
        }
    }

    /// Where the hand sits on a stage of the given size.
    pub fn hand_position(width: u16, height: u16) -> (f32, f32) {
        (width as f32 / 2.0, height as f32 / 2.0 + 3.0)
    }
}

impl Default for Squeeze {
    fn default() -> Self {
        Self::new()
    }
}

struct Mosquito {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    hovering: bool,
}

struct SqueezeState {
    width: f32,
    height: f32,
    hand: (f32, f32),
    mosquito: Mosquito,
    hand_closed: bool,
    caught: bool,
    escaping: bool,
    rng: SimpleRng,
}

impl SqueezeState {
    fn in_reach(&self) -> bool {
        (self.mosquito.x - self.hand.0).abs() <= REACH_X
            && (self.mosquito.y - self.hand.1).abs() <= REACH_Y
    }

    fn wander(&mut self, dt: f32) {
        let m = &mut self.mosquito;
        if self.escaping {
            m.y -= ESCAPE_SPEED * dt;
            return;
        }
        if self.caught || m.hovering {
            return;
        }
        if self.rng.chance(1, 20) {
            let (vx, vy) = random_velocity(&mut self.rng);
            m.vx = vx;
            m.vy = vy;
        }
        m.x += m.vx * dt;
        m.y += m.vy * dt;

        let max_x = self.width - 2.0;
        let max_y = self.height - 2.0;
        if m.x < 1.0 || m.x > max_x {
            m.vx = -m.vx;
            m.x = m.x.clamp(1.0, max_x);
        }
        if m.y < TOP_ROW || m.y > max_y {
            m.vy = -m.vy;
            m.y = m.y.clamp(TOP_ROW, max_y);
        }
    }
}

fn random_velocity(rng: &mut SimpleRng) -> (f32, f32) {
    let vx = rng.between(10, 22) as f32 * if rng.chance(1, 2) { -1.0 } else { 1.0 };
    let vy = rng.between(3, 9) as f32 * if rng.chance(1, 2) { -1.0 } else { 1.0 };
    (vx, vy)
}

impl Game for Squeeze {
    fn prompt(&self) -> &str {
        "Squeeze!"
    }

    fn author(&self) -> &str {
        "tga"
    }

    fn on_start(&self, engine: &mut Engine, api: Api) -> Result<Box<dyn Presentable>, GameError> {
        let width = api.width() as f32;
        let height = api.height() as f32;
        if width < 8.0 || height < TOP_ROW + 4.0 {
            return Err(GameError::new("stage too small for Squeeze"));
        }

        let mut rng = engine.rng().fork();
        let mosquito = match self.pinned {
            Some((x, y)) => Mosquito {
                x,
                y,
                vx: 0.0,
                vy: 0.0,
                hovering: true,
            },
            None => {
                let (vx, vy) = random_velocity(&mut rng);
                Mosquito {
                    x: rng.between(2, width as i32 - 3) as f32,
                    y: rng.between(TOP_ROW as i32, height as i32 - 3) as f32,
                    vx,
                    vy,
                    hovering: false,
                }
            }
        };

        let state = Rc::new(RefCell::new(SqueezeState {
            width,
            height,
            hand: Squeeze::hand_position(api.width(), api.height()),
            mosquito,
            hand_closed: false,
            caught: false,
            escaping: false,
            rng,
        }));

        {
            let state = Rc::clone(&state);
            let session = api.clone();
            api.on_action_press(move || {
                if session.is_done() {
                    return;
                }
                let caught = {
                    let mut s = state.borrow_mut();
                    s.hand_closed = true;
                    s.caught = s.in_reach();
                    s.caught
                };
                if caught {
                    session.succeed();
                } else {
                    session.fail();
                }
            });
        }

        {
            let state = Rc::clone(&state);
            api.on_action_release(move || state.borrow_mut().hand_closed = false);
        }

        {
            let state = Rc::clone(&state);
            api.on_timeout(move || state.borrow_mut().escaping = true);
        }

        Ok(Box::new(SqueezeView { state }))
    }
}

struct SqueezeView {
    state: Rc<RefCell<SqueezeState>>,
}

impl Presentable for SqueezeView {
    fn update(&mut self, dt: Duration) {
        self.state.borrow_mut().wander(dt.as_secs_f32());
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let s = self.state.borrow();
        let (hx, hy) = (s.hand.0.round() as i32, s.hand.1.round() as i32);

        let hand_style = CellStyle::fg(Rgb::new(240, 200, 160));
        let hand = if s.hand_closed { "(###)" } else { "\\|||/" };
        put_str_at(canvas, hx - 2, hy, hand, hand_style);
        put_str_at(canvas, hx - 1, hy + 1, "| |", hand_style);

        let (mx, my) = (s.mosquito.x.round() as i32, s.mosquito.y.round() as i32);
        if s.caught {
            put_str_at(canvas, hx - 1, hy - 1, "*x*", CellStyle::fg(Rgb::new(220, 60, 60)).bold());
        } else {
            put_str_at(canvas, mx, my, "ж", CellStyle::fg(Rgb::new(170, 170, 180)).bold());
        }
    }
}

fn put_str_at(canvas: &mut dyn Canvas, x: i32, y: i32, text: &str, style: CellStyle) {
    if y < 0 {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if cx >= 0 {
            canvas.put_char(cx as u16, y as u16, ch, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(x: f32, y: f32) -> SqueezeState {
        SqueezeState {
            width: 64.0,
            height: 22.0,
            hand: Squeeze::hand_position(64, 22),
            mosquito: Mosquito {
                x,
                y,
                vx: 0.0,
                vy: 0.0,
                hovering: true,
            },
            hand_closed: false,
            caught: false,
            escaping: false,
            rng: SimpleRng::new(3),
        }
    }

    #[test]
    fn reach_is_a_box_around_the_hand() {
        let (hx, hy) = Squeeze::hand_position(64, 22);
        assert!(state_at(hx, hy).in_reach());
        assert!(state_at(hx + REACH_X, hy - REACH_Y).in_reach());
        assert!(!state_at(hx + REACH_X + 1.0, hy).in_reach());
        assert!(!state_at(hx, hy - REACH_Y - 1.0).in_reach());
    }

    #[test]
    fn wandering_stays_inside_the_stage() {
        let mut s = state_at(10.0, 10.0);
        s.mosquito.hovering = false;
        s.mosquito.vx = 40.0;
        s.mosquito.vy = -30.0;
        for _ in 0..500 {
            s.wander(0.016);
            assert!((1.0..=62.0).contains(&s.mosquito.x));
            assert!((TOP_ROW..=20.0).contains(&s.mosquito.y));
        }
    }

    #[test]
    fn escaping_mosquito_leaves_upward() {
        let mut s = state_at(10.0, 10.0);
        s.escaping = true;
        s.wander(0.5);
        assert!(s.mosquito.y < 0.0);
    }
}
