//! Scene container for one session.

use std::rc::Rc;
use std::time::Duration;

use crate::port::{Canvas, Presentable};
use crate::session::SessionShared;

/// Root of everything shown and scheduled during one session.
///
/// Dropping objects and disposing the session state happen together in
/// [`Scene::teardown`]; nothing carries over into the next session.
pub(crate) struct Scene {
    session: Rc<SessionShared>,
    objects: Vec<Box<dyn Presentable>>,
}

impl Scene {
    pub(crate) fn new(session: Rc<SessionShared>) -> Self {
        Self {
            session,
            objects: Vec::new(),
        }
    }

    pub(crate) fn session(&self) -> &Rc<SessionShared> {
        &self.session
    }

    pub(crate) fn attach(&mut self, object: Box<dyn Presentable>) {
        self.objects.push(object);
    }

    pub(crate) fn update(&mut self, dt: Duration) {
        for object in &mut self.objects {
            object.update(dt);
        }
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        for object in &self.objects {
            object.draw(canvas);
        }
    }

    pub(crate) fn teardown(mut self) {
        // Objects go first: they may hold handles that reach into the session.
        self.objects.clear();
        self.session.dispose();
    }
}
