use std::time::Duration;

use microgames::core::{
    Api, Canvas, CellStyle, Engine, Game, GameError, Orchestrator, Presentable, RotationConfig,
};
use microgames::term::{countdown_cells, FrameBuffer, StageView, TermPresenter, Viewport};
use microgames::types::Cue;

struct Marker;

impl Presentable for Marker {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.put_char(0, 0, 'X', CellStyle::default());
    }
}

/// Draws a marker at the stage origin and succeeds on press.
struct Pressy {
    shift: i16,
}

impl Game for Pressy {
    fn prompt(&self) -> &str {
        "Press it!"
    }
    fn author(&self) -> &str {
        "tests"
    }
    fn on_start(&self, engine: &mut Engine, api: Api) -> Result<Box<dyn Presentable>, GameError> {
        engine.camera.offset_x = self.shift;
        let session = api.clone();
        api.on_action_press(move || session.succeed());
        Ok(Box::new(Marker))
    }
}

struct Broken;

impl Game for Broken {
    fn prompt(&self) -> &str {
        "Broken!"
    }
    fn author(&self) -> &str {
        "tests"
    }
    fn on_start(&self, _engine: &mut Engine, _api: Api) -> Result<Box<dyn Presentable>, GameError> {
        Err(GameError::new("boom"))
    }
}

fn rotation(games: Vec<Box<dyn Game>>) -> Orchestrator<TermPresenter> {
    match Orchestrator::start_rotation(games, RotationConfig::default(), TermPresenter::new()) {
        Ok(o) => o,
        Err(err) => panic!("rotation failed to start: {err}"),
    }
}

// 64x22 stage + border => 66x24 frame, plus the countdown row.
const VP: (u16, u16) = (80, 30);
const FRAME_X: u16 = 7;
const FRAME_Y: u16 = 2;

fn render(o: &Orchestrator<TermPresenter>) -> FrameBuffer {
    StageView::default().render(o, Viewport::new(VP.0, VP.1))
}

fn ch(fb: &FrameBuffer, x: u16, y: u16) -> char {
    fb.get(x, y).map(|c| c.ch).unwrap_or('?')
}

#[test]
fn stage_frame_is_centered() {
    let o = rotation(vec![Box::new(Pressy { shift: 0 })]);
    let fb = render(&o);

    assert_eq!(ch(&fb, FRAME_X, FRAME_Y), '┌');
    assert_eq!(ch(&fb, FRAME_X + 65, FRAME_Y), '┐');
    assert_eq!(ch(&fb, FRAME_X, FRAME_Y + 23), '└');
    assert_eq!(ch(&fb, FRAME_X + 65, FRAME_Y + 23), '┘');
}

#[test]
fn scene_draws_inside_stage_and_follows_camera() {
    let o = rotation(vec![Box::new(Pressy { shift: 0 })]);
    assert_eq!(ch(&render(&o), FRAME_X + 1, FRAME_Y + 1), 'X');

    let o = rotation(vec![Box::new(Pressy { shift: 3 })]);
    let fb = render(&o);
    assert_eq!(ch(&fb, FRAME_X + 4, FRAME_Y + 1), 'X');
    assert_ne!(ch(&fb, FRAME_X + 1, FRAME_Y + 1), 'X');
}

#[test]
fn prompt_letters_are_on_stage() {
    let o = rotation(vec![Box::new(Pressy { shift: 0 })]);
    let fb = render(&o);
    // The wave moves letters up and down but never off their column.
    let column = FRAME_X + 1 + 2;
    let found = (FRAME_Y..FRAME_Y + 5).any(|y| ch(&fb, column, y) == 'P');
    assert!(found);
}

#[test]
fn countdown_bar_drains_with_session_time() {
    let mut o = rotation(vec![Box::new(Pressy { shift: 0 })]);
    let bar_y = FRAME_Y + 24;

    let fb = render(&o);
    assert!((FRAME_X..FRAME_X + 66).all(|x| ch(&fb, x, bar_y) == '█'));

    o.tick(Duration::from_secs(2)).unwrap();
    let fb = render(&o);
    let lit = (FRAME_X..FRAME_X + 66).filter(|&x| ch(&fb, x, bar_y) == '█').count();
    assert_eq!(lit as u16, countdown_cells(Duration::from_secs(2), Duration::from_secs(4), 66));
    assert_eq!(lit, 33);
}

#[test]
fn success_flashes_banner_and_rings_once() {
    let mut o = rotation(vec![Box::new(Pressy { shift: 0 })]);
    o.press().unwrap();

    assert_eq!(o.presenter().flash(), Some(Cue::Success));
    assert!(render(&o).contains_text("COOL!"));
    assert!(o.presenter_mut().take_bell());
    assert!(!o.presenter_mut().take_bell());

    // The banner goes away on its own, well before the next session.
    o.presenter_mut().update(Duration::from_secs(2));
    assert!(!render(&o).contains_text("COOL!"));
}

#[test]
fn halted_rotation_is_shown() {
    let mut o = rotation(vec![Box::new(Pressy { shift: 0 }), Box::new(Broken)]);
    o.tick(Duration::from_secs(4)).unwrap();
    assert!(render(&o).contains_text("NOPE!"));
    assert!(o.tick(Duration::from_secs(2)).is_err());

    let fb = render(&o);
    assert!(fb.contains_text("ROTATION HALTED"));
}

#[test]
fn tiny_viewport_does_not_panic() {
    let o = rotation(vec![Box::new(Pressy { shift: 0 })]);
    for (w, h) in [(0, 0), (1, 1), (10, 3), (66, 24)] {
        let fb = StageView::default().render(&o, Viewport::new(w, h));
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
}
