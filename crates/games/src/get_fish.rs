//! "Get the fish!": hold the action to walk the cat past a snapping trap.
//!
//! The trap alternates between open and shut on session timers. Standing on
//! it while it is shut fails the session; reaching the fish succeeds.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

use microgames_core::{
    Api, Canvas, CellStyle, Engine, Game, GameError, Presentable, Rgb,
};

/// Cat walking speed, in cells per second.
pub const CAT_SPEED: f32 = 20.0;

const CAT: &str = "=^.^=";
const CAT_SAD: &str = "=;.;=";
const CAT_W: f32 = 5.0;
const TRAP_W: f32 = 3.0;
const FISH: &str = "<><";

/// Open/shut durations of the trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapTiming {
    pub open: Duration,
    pub shut: Duration,
}

impl Default for TrapTiming {
    fn default() -> Self {
        Self {
            open: Duration::from_millis(900),
            shut: Duration::from_millis(500),
        }
    }
}

pub struct GetFish {
    timing: Option<TrapTiming>,
}

impl GetFish {
    /// Trap timing is randomized per session.
    pub fn new() -> Self {
        Self { timing: None }
    }

    pub fn with_trap_timing(timing: TrapTiming) -> Self {
        Self {
            timing: Some(timing),
        }
    }
}

impl Default for GetFish {
    fn default() -> Self {
        Self::new()
    }
}

struct FishState {
    ground: f32,
    cat_x: f32,
    trap_x: f32,
    fish_x: f32,
    trap_shut: bool,
    walk_requested: bool,
    caught: bool,
    ate: bool,
    timed_out: bool,
}

impl FishState {
    fn on_trap(&self) -> bool {
        self.cat_x + CAT_W > self.trap_x && self.cat_x < self.trap_x + TRAP_W
    }

    fn at_fish(&self) -> bool {
        self.cat_x + CAT_W >= self.fish_x
    }
}

impl Game for GetFish {
    fn prompt(&self) -> &str {
        "Get the fish!"
    }

    fn author(&self) -> &str {
        "tga"
    }

    fn on_start(&self, engine: &mut Engine, api: Api) -> Result<Box<dyn Presentable>, GameError> {
        let width = api.width() as f32;
        let height = api.height() as f32;
        if width < 24.0 || height < 8.0 {
            return Err(GameError::new("stage too small for Get the fish"));
        }

        let timing = match self.timing {
            Some(timing) => timing,
            None => {
                let rng = engine.rng();
                TrapTiming {
                    open: Duration::from_millis(rng.between(600, 1100) as u64),
                    shut: Duration::from_millis(rng.between(350, 600) as u64),
                }
            }
        };

        let state = Rc::new(RefCell::new(FishState {
            ground: height - 5.0,
            cat_x: 2.0,
            trap_x: (width / 2.0 - TRAP_W / 2.0).floor(),
            fish_x: width - 6.0,
            trap_shut: false,
            walk_requested: false,
            caught: false,
            ate: false,
            timed_out: false,
        }));

        {
            let state = Rc::clone(&state);
            api.on_action_down(move || state.borrow_mut().walk_requested = true);
        }

        {
            let state = Rc::clone(&state);
            api.on_timeout(move || state.borrow_mut().timed_out = true);
        }

        schedule_trap(api.clone(), Rc::clone(&state), timing);

        Ok(Box::new(FishView { state, api }))
    }
}

/// Flip the trap after the current phase and re-arm for the next one.
fn schedule_trap(api: Api, state: Rc<RefCell<FishState>>, timing: TrapTiming) {
    let shut = state.borrow().trap_shut;
    let delay = if shut { timing.shut } else { timing.open };
    let session = api.clone();
    api.after(delay, move || {
        let snapped = {
            let mut s = state.borrow_mut();
            s.trap_shut = !s.trap_shut;
            trace!(shut = s.trap_shut, "trap");
            if s.trap_shut && s.on_trap() && !session.is_done() {
                s.caught = true;
            }
            s.caught
        };
        if snapped {
            session.fail();
        }
        schedule_trap(session, state, timing);
    });
}

struct FishView {
    state: Rc<RefCell<FishState>>,
    api: Api,
}

impl Presentable for FishView {
    fn update(&mut self, dt: Duration) {
        let mut outcome = None;
        {
            let mut s = self.state.borrow_mut();
            let walking = std::mem::take(&mut s.walk_requested);
            if !walking || self.api.is_done() {
                return;
            }
            s.cat_x = (s.cat_x + CAT_SPEED * dt.as_secs_f32()).min(s.fish_x - CAT_W + 1.0);
            if s.trap_shut && s.on_trap() {
                s.caught = true;
                outcome = Some(false);
            } else if s.at_fish() {
                s.ate = true;
                outcome = Some(true);
            }
        }
        match outcome {
            Some(true) => self.api.succeed(),
            Some(false) => self.api.fail(),
            None => {}
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let s = self.state.borrow();
        let (w, _) = canvas.size();
        let ground = s.ground as u16;
        let row = ground.saturating_sub(1);

        canvas.fill_rect(0, ground, w, 1, '▀', CellStyle::fg(Rgb::new(110, 90, 60)));

        if !s.ate {
            canvas.put_str(s.fish_x as u16, row, FISH, CellStyle::fg(Rgb::new(90, 170, 240)).bold());
        }

        let trap_style = CellStyle::fg(Rgb::new(200, 200, 210));
        let trap = if s.trap_shut { "\\^/" } else { "\\_/" };
        canvas.put_str(s.trap_x as u16, row, trap, trap_style);

        let cat_style = if s.caught {
            CellStyle::fg(Rgb::new(220, 80, 80)).bold()
        } else {
            CellStyle::fg(Rgb::new(250, 190, 90)).bold()
        };
        let cat = if s.caught || s.timed_out { CAT_SAD } else { CAT };
        let cat_row = if s.caught { row } else { row.saturating_sub(1) };
        canvas.put_str(s.cat_x.round() as u16, cat_row, cat, cat_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FishState {
        FishState {
            ground: 17.0,
            cat_x: 2.0,
            trap_x: 30.0,
            fish_x: 58.0,
            trap_shut: false,
            walk_requested: false,
            caught: false,
            ate: false,
            timed_out: false,
        }
    }

    #[test]
    fn trap_overlap_uses_cat_width() {
        let mut s = state();
        s.cat_x = 30.0 - CAT_W;
        assert!(!s.on_trap());
        s.cat_x += 0.5;
        assert!(s.on_trap());
        s.cat_x = 30.0 + TRAP_W;
        assert!(!s.on_trap());
    }

    #[test]
    fn fish_is_reached_by_the_nose() {
        let mut s = state();
        s.cat_x = 58.0 - CAT_W - 0.5;
        assert!(!s.at_fish());
        s.cat_x = 58.0 - CAT_W;
        assert!(s.at_fish());
    }
}
