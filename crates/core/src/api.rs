//! Capability API facade handed to game modules.
//!
//! An [`Api`] is bound to exactly one session. It can subscribe to that
//! session's input and lifecycle channels, report an outcome, and schedule
//! session-scoped timers. It has no route to other sessions or to the
//! rotation. Once its session is torn down every call is a silent no-op.

use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::event::Subscription;
use crate::session::SessionShared;
use crate::timer::TimerHandle;
use crate::types::{ActionEdge, Outcome};

#[derive(Clone)]
pub struct Api {
    session: Weak<SessionShared>,
    width: u16,
    height: u16,
}

impl Api {
    pub(crate) fn new(session: &Rc<SessionShared>) -> Self {
        Self {
            session: Rc::downgrade(session),
            width: session.width,
            height: session.height,
        }
    }

    /// Called once when the action goes down.
    pub fn on_action_press(&self, handler: impl FnMut() + 'static) -> Subscription {
        self.subscribe_input(ActionEdge::Press, handler)
    }

    /// Called once when the action goes up.
    pub fn on_action_release(&self, handler: impl FnMut() + 'static) -> Subscription {
        self.subscribe_input(ActionEdge::Release, handler)
    }

    /// Called every frame while the action is held.
    pub fn on_action_down(&self, handler: impl FnMut() + 'static) -> Subscription {
        self.subscribe_input(ActionEdge::Down, handler)
    }

    /// Called when the session deadline expires, right before the session fails.
    pub fn on_timeout(&self, handler: impl FnMut() + 'static) {
        if let Some(session) = self.session.upgrade() {
            session.track(session.on_timeout.add(handler));
        }
    }

    /// Called when the rotation moves past this session.
    pub fn on_end(&self, handler: impl FnMut() + 'static) -> Subscription {
        match self.session.upgrade() {
            Some(session) => session.track(session.on_end.add(handler)),
            None => Subscription::detached(),
        }
    }

    pub fn succeed(&self) {
        if let Some(session) = self.session.upgrade() {
            session.conclude(Outcome::Succeeded);
        }
    }

    pub fn fail(&self) {
        if let Some(session) = self.session.upgrade() {
            session.conclude(Outcome::Failed);
        }
    }

    /// Stage width in cells (same for every session).
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Stage height in cells (same for every session).
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Run `action` once after `delay`, unless the session ends first.
    pub fn after(&self, delay: Duration, action: impl FnOnce() + 'static) -> TimerHandle {
        match self.session.upgrade() {
            Some(session) => session.timers.after(delay, action),
            None => TimerHandle::detached(),
        }
    }

    /// Time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.session
            .upgrade()
            .map(|s| s.timers.now())
            .unwrap_or_default()
    }

    /// Whether an outcome was already reported (or the session is gone).
    pub fn is_done(&self) -> bool {
        self.session
            .upgrade()
            .map(|s| s.is_done())
            .unwrap_or(true)
    }

    fn subscribe_input(&self, edge: ActionEdge, handler: impl FnMut() + 'static) -> Subscription {
        match self.session.upgrade() {
            Some(session) => session.track(session.input(edge).add(handler)),
            None => Subscription::detached(),
        }
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("live", &(self.session.strong_count() > 0))
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
