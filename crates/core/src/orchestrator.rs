//! Session orchestrator - owns the rotation and drives one session at a time.
//!
//! The orchestrator is driven from the outside by a frame loop:
//!
//! - [`Orchestrator::tick`] once per frame with the elapsed time
//! - [`Orchestrator::press`] / [`Orchestrator::release`] on action edges
//! - [`Orchestrator::draw`] to render the current scene
//!
//! Outcomes reported by a module (or by the deadline) only mark the session;
//! the actual switch to the next game happens here, after the session's
//! outcome delay has elapsed on its own timer queue.

use std::rc::Rc;
use std::time::Duration;

use tracing::{error, info};

use crate::api::Api;
use crate::config::RotationConfig;
use crate::error::OrchestratorError;
use crate::game::{Engine, Game};
use crate::port::{Canvas, Presenter, Region};
use crate::rotation::Rotation;
use crate::scene::Scene;
use crate::session::SessionShared;
use crate::types::{ActionEdge, Outcome, SessionState};

pub struct Orchestrator<P: Presenter> {
    games: Vec<Box<dyn Game>>,
    config: RotationConfig,
    presenter: P,
    engine: Engine,
    rotation: Option<Rotation>,
    scene: Option<Scene>,
    held: bool,
    halted: bool,
    sessions_started: u64,
}

impl<P: Presenter> Orchestrator<P> {
    /// Load every game once, in order, then start the session for `games[0]`.
    ///
    /// An empty sequence is not an error: the returned orchestrator simply has
    /// nothing to run and every driving call is a no-op.
    pub fn start_rotation(
        mut games: Vec<Box<dyn Game>>,
        config: RotationConfig,
        presenter: P,
    ) -> Result<Self, OrchestratorError> {
        let mut engine = Engine::new(config.width, config.height, config.seed);

        for game in games.iter_mut() {
            game.on_load(&mut engine)
                .map_err(|source| OrchestratorError::Load {
                    prompt: game.prompt().to_string(),
                    source,
                })?;
        }

        let rotation = Rotation::new(games.len());
        let mut orchestrator = Self {
            games,
            config,
            presenter,
            engine,
            rotation,
            scene: None,
            held: false,
            halted: false,
            sessions_started: 0,
        };

        match rotation {
            Some(rotation) => orchestrator.run_session(rotation.cursor())?,
            None => info!("no games configured, rotation not started"),
        }
        Ok(orchestrator)
    }

    /// Advance one frame.
    pub fn tick(&mut self, dt: Duration) -> Result<(), OrchestratorError> {
        if self.halted {
            return Err(OrchestratorError::Halted);
        }
        self.engine.advance_time(dt);

        let session = {
            let Some(scene) = self.scene.as_mut() else {
                return Ok(());
            };
            if self.held {
                scene.session().down.trigger();
            }
            scene.update(dt);
            Rc::clone(scene.session())
        };

        session.timers.advance(dt);
        self.flush_cues();

        if session.state() == SessionState::Advancing {
            self.advance()?;
        }
        Ok(())
    }

    pub fn press(&mut self) -> Result<(), OrchestratorError> {
        self.dispatch(ActionEdge::Press)
    }

    pub fn release(&mut self) -> Result<(), OrchestratorError> {
        self.dispatch(ActionEdge::Release)
    }

    /// Deliver an action edge to the current session only.
    ///
    /// A press while already held, or a release while not held, is dropped.
    /// `Down` is delivered by [`Orchestrator::tick`] and ignored here.
    pub fn dispatch(&mut self, edge: ActionEdge) -> Result<(), OrchestratorError> {
        if self.halted {
            return Err(OrchestratorError::Halted);
        }
        match edge {
            ActionEdge::Press if self.held => return Ok(()),
            ActionEdge::Release if !self.held => return Ok(()),
            ActionEdge::Press => self.held = true,
            ActionEdge::Release => self.held = false,
            ActionEdge::Down => return Ok(()),
        }

        if let Some(scene) = &self.scene {
            scene.session().input(edge).trigger();
        }
        self.flush_cues();
        Ok(())
    }

    /// Draw the current scene onto the stage canvas, shifted by the camera.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let Some(scene) = &self.scene else {
            return;
        };
        let camera = self.engine.camera;
        let mut region = Region::new(
            canvas,
            camera.offset_x as i32,
            camera.offset_y as i32,
            self.config.width,
            self.config.height,
        );
        scene.draw(&mut region);
    }

    pub fn rotation(&self) -> Option<Rotation> {
        self.rotation
    }

    pub fn current_game(&self) -> Option<&dyn Game> {
        self.rotation.map(|r| self.games[r.cursor()].as_ref())
    }

    pub fn prompt(&self) -> Option<&str> {
        self.current_game().map(|g| g.prompt())
    }

    pub fn session_index(&self) -> Option<usize> {
        self.scene.as_ref().map(|s| s.session().index)
    }

    pub fn session_state(&self) -> Option<SessionState> {
        self.scene.as_ref().map(|s| s.session().state())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.scene.as_ref().and_then(|s| s.session().outcome())
    }

    /// Time remaining before the current session times out.
    pub fn time_left(&self) -> Duration {
        self.scene
            .as_ref()
            .map(|s| s.session().time_left())
            .unwrap_or_default()
    }

    pub fn session_elapsed(&self) -> Duration {
        self.scene
            .as_ref()
            .map(|s| s.session().timers.now())
            .unwrap_or_default()
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn advance(&mut self) -> Result<(), OrchestratorError> {
        let Some(rotation) = self.rotation else {
            return Ok(());
        };
        let next = rotation.advance();
        self.rotation = Some(next);

        if let Some(scene) = &self.scene {
            let listeners = scene.session().on_end.trigger();
            info!(
                from = rotation.cursor(),
                to = next.cursor(),
                listeners,
                "rotation advanced"
            );
        }
        self.run_session(next.cursor())
    }

    fn run_session(&mut self, index: usize) -> Result<(), OrchestratorError> {
        self.engine.reset_camera();
        self.presenter.reset_view();

        if let Some(previous) = self.scene.take() {
            previous.teardown();
        }

        let game = &self.games[index];
        let session = SessionShared::new(
            index,
            game.prompt(),
            self.config.width,
            self.config.height,
            self.config.outcome_delay,
        );
        let mut scene = Scene::new(Rc::clone(&session));
        session.arm_deadline(self.config.game_duration);
        self.sessions_started += 1;
        info!(
            index,
            prompt = game.prompt(),
            author = game.author(),
            budget_ms = self.config.game_duration.as_millis() as u64,
            "session started"
        );

        let object = match game.on_start(&mut self.engine, Api::new(&session)) {
            Ok(object) => object,
            Err(source) => {
                scene.teardown();
                self.halted = true;
                error!(index, prompt = game.prompt(), error = %source, "game failed to start, rotation halted");
                return Err(OrchestratorError::Start {
                    prompt: game.prompt().to_string(),
                    source,
                });
            }
        };
        scene.attach(object);
        self.scene = Some(scene);

        self.presenter.show_prompt(game.prompt());
        self.presenter.speak(game.prompt());

        // The module may already have reported from inside `on_start`.
        self.flush_cues();
        Ok(())
    }

    fn flush_cues(&mut self) {
        if let Some(scene) = &self.scene {
            for cue in scene.session().take_cues() {
                self.presenter.play_cue(cue);
            }
        }
    }
}
