//! Terminal microgame runner (default binary).
//!
//! Drives the orchestrator with a fixed-rate frame loop: crossterm input is
//! turned into action edges, the rotation is ticked with the measured frame
//! time, and the stage is rendered through the diffing framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::info;

use microgames::core::{Orchestrator, RotationConfig};
use microgames::games::default_games;
use microgames::input::{should_quit, ActionInput};
use microgames::logging::{self, LogConfig};
use microgames::speech::Narrator;
use microgames::term::{FrameBuffer, StageView, TermPresenter, TerminalRenderer, Viewport};
use microgames::types::TICK_MS;

type Rotation = Orchestrator<TermPresenter>;

fn main() -> Result<()> {
    logging::init(&LogConfig::from_env())?;

    let config = RotationConfig::from_env();
    info!(
        game_ms = config.game_duration.as_millis() as u64,
        outcome_delay_ms = config.outcome_delay.as_millis() as u64,
        seed = config.seed,
        "starting rotation"
    );

    let mut presenter = TermPresenter::new();
    if let Some(narrator) = Narrator::start_from_env() {
        presenter = presenter.with_voice(move |text| narrator.speak(text));
    }

    let mut rotation = Orchestrator::start_rotation(default_games(), config, presenter)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut rotation);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(sessions = rotation.sessions_started(), "rotation stopped");
    result
}

fn run(term: &mut TerminalRenderer, rotation: &mut Rotation) -> Result<()> {
    let view = StageView::default();
    let mut input = ActionInput::from_env();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(rotation, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
        if rotation.presenter_mut().take_bell() {
            term.bell()?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if should_quit(key) => return Ok(()),
                Event::Resize(_, _) => term.invalidate(),
                // Releases are lost while unfocused; drop the hold now.
                Event::FocusLost => {
                    input.reset();
                    if rotation.is_held() {
                        rotation.release()?;
                    }
                }
                other => {
                    input.handle_event(&other);
                }
            }
        }

        for edge in input.update() {
            rotation.dispatch(edge)?;
        }

        // Tick.
        let dt = last_tick.elapsed();
        if dt >= tick_duration {
            last_tick = Instant::now();
            rotation.tick(dt)?;
            rotation.presenter_mut().update(dt);
        }
    }
}
