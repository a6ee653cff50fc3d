//! Per-session state and the exactly-once outcome rule.
//!
//! Everything a single session owns lives in [`SessionShared`]: its timer
//! queue, the deadline handle, the outcome and input channels, the disposal
//! list and the cue outbox. The orchestrator holds the only strong reference;
//! the [`crate::Api`] and every scheduled action hold weak ones, so nothing a
//! module keeps around can extend a session past its teardown.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, info};

use crate::event::{EventChannel, Subscription};
use crate::timer::{TimerHandle, TimerQueue};
use crate::types::{ActionEdge, Cue, Outcome, SessionState};

pub(crate) struct SessionShared {
    pub(crate) index: usize,
    pub(crate) prompt: String,
    pub(crate) width: u16,
    pub(crate) height: u16,
    state: Cell<SessionState>,
    done: Cell<bool>,
    pub(crate) timers: TimerQueue,
    deadline: RefCell<Option<TimerHandle>>,
    deadline_at: Cell<Duration>,
    outcome_delay: Duration,
    pub(crate) on_end: EventChannel,
    pub(crate) on_timeout: EventChannel,
    pub(crate) press: EventChannel,
    pub(crate) release: EventChannel,
    pub(crate) down: EventChannel,
    disposal: RefCell<Vec<Subscription>>,
    cues: RefCell<Vec<Cue>>,
    outcome: Cell<Option<Outcome>>,
}

impl SessionShared {
    pub(crate) fn new(
        index: usize,
        prompt: &str,
        width: u16,
        height: u16,
        outcome_delay: Duration,
    ) -> Rc<Self> {
        Rc::new(Self {
            index,
            prompt: prompt.to_string(),
            width,
            height,
            state: Cell::new(SessionState::Pending),
            done: Cell::new(false),
            timers: TimerQueue::new(),
            deadline: RefCell::new(None),
            deadline_at: Cell::new(Duration::ZERO),
            outcome_delay,
            on_end: EventChannel::new(),
            on_timeout: EventChannel::new(),
            press: EventChannel::new(),
            release: EventChannel::new(),
            down: EventChannel::new(),
            disposal: RefCell::new(Vec::new()),
            cues: RefCell::new(Vec::new()),
            outcome: Cell::new(None),
        })
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state.get()
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done.get()
    }

    pub(crate) fn outcome(&self) -> Option<Outcome> {
        self.outcome.get()
    }

    pub(crate) fn input(&self, edge: ActionEdge) -> &EventChannel {
        match edge {
            ActionEdge::Press => &self.press,
            ActionEdge::Release => &self.release,
            ActionEdge::Down => &self.down,
        }
    }

    /// Put a subscription on the disposal list.
    pub(crate) fn track(&self, sub: Subscription) -> Subscription {
        self.disposal.borrow_mut().push(sub.clone());
        sub
    }

    /// Arm the session deadline and enter `Running`.
    ///
    /// On expiry the timeout channel fires first, then the session fails.
    pub(crate) fn arm_deadline(self: &Rc<Self>, budget: Duration) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = self.timers.after(budget, move || {
            if let Some(session) = weak.upgrade() {
                info!(index = session.index, prompt = %session.prompt, "session timed out");
                session.on_timeout.trigger();
                session.conclude(Outcome::Failed);
            }
        });
        self.deadline_at.set(self.timers.now() + budget);
        *self.deadline.borrow_mut() = Some(handle);
        self.state.set(SessionState::Running);
    }

    pub(crate) fn time_left(&self) -> Duration {
        if self.done.get() {
            return Duration::ZERO;
        }
        self.deadline_at.get().saturating_sub(self.timers.now())
    }

    /// The single outcome transition. Every call after the first is a no-op.
    pub(crate) fn conclude(self: &Rc<Self>, outcome: Outcome) {
        if self.done.get() {
            debug!(index = self.index, outcome = outcome.as_str(), "outcome ignored, session already done");
            return;
        }
        self.done.set(true);
        self.outcome.set(Some(outcome));
        self.state.set(match outcome {
            Outcome::Succeeded => SessionState::Succeeded,
            Outcome::Failed => SessionState::Failed,
        });

        // The deadline must be dead before the advance is scheduled.
        if let Some(deadline) = self.deadline.borrow_mut().take() {
            deadline.cancel();
        }
        self.on_timeout.clear();
        self.cues.borrow_mut().push(outcome.cue());

        info!(
            index = self.index,
            prompt = %self.prompt,
            outcome = outcome.as_str(),
            elapsed_ms = self.timers.now().as_millis() as u64,
            "session outcome"
        );

        let weak: Weak<Self> = Rc::downgrade(self);
        self.timers.after(self.outcome_delay, move || {
            if let Some(session) = weak.upgrade() {
                session.state.set(SessionState::Advancing);
            }
        });
    }

    pub(crate) fn take_cues(&self) -> Vec<Cue> {
        std::mem::take(&mut *self.cues.borrow_mut())
    }

    /// Release everything the session owns.
    pub(crate) fn dispose(&self) {
        let subs: Vec<Subscription> = self.disposal.borrow_mut().drain(..).collect();
        let released = subs.len();
        for sub in subs {
            sub.cancel();
        }
        for channel in [
            &self.on_end,
            &self.on_timeout,
            &self.press,
            &self.release,
            &self.down,
        ] {
            channel.clear();
        }
        if let Some(deadline) = self.deadline.borrow_mut().take() {
            deadline.cancel();
        }
        self.timers.clear();
        self.cues.borrow_mut().clear();
        self.done.set(true);
        self.state.set(SessionState::Ended);
        debug!(index = self.index, released, "session disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Rc<SessionShared> {
        SessionShared::new(0, "Test!", 10, 10, Duration::from_secs(2))
    }

    #[test]
    fn conclude_is_exactly_once() {
        let s = session();
        s.arm_deadline(Duration::from_secs(4));

        s.conclude(Outcome::Failed);
        s.conclude(Outcome::Succeeded);
        s.conclude(Outcome::Failed);

        assert_eq!(s.state(), SessionState::Failed);
        assert_eq!(s.outcome(), Some(Outcome::Failed));
        assert_eq!(s.take_cues(), vec![Cue::Failure]);
        // Only the delayed advance remains.
        assert_eq!(s.timers.pending(), 1);
    }

    #[test]
    fn deadline_fires_timeout_then_fails() {
        let s = session();
        let order = Rc::new(RefCell::new(Vec::new()));
        let (o, weak) = (Rc::clone(&order), Rc::downgrade(&s));
        s.on_timeout.add(move || {
            let state = weak.upgrade().map(|s| s.state());
            o.borrow_mut().push(state);
        });
        s.arm_deadline(Duration::from_secs(4));

        s.timers.advance(Duration::from_secs(4));
        assert_eq!(order.borrow().as_slice(), &[Some(SessionState::Running)]);
        assert_eq!(s.state(), SessionState::Failed);

        s.timers.advance(Duration::from_secs(2));
        assert_eq!(s.state(), SessionState::Advancing);
    }

    #[test]
    fn time_left_counts_down_and_zeroes_when_done() {
        let s = session();
        s.arm_deadline(Duration::from_secs(4));
        s.timers.advance(Duration::from_millis(1500));
        assert_eq!(s.time_left(), Duration::from_millis(2500));
        s.conclude(Outcome::Succeeded);
        assert_eq!(s.time_left(), Duration::ZERO);
    }

    #[test]
    fn dispose_clears_everything() {
        let s = session();
        let sub = s.track(s.press.add(|| {}));
        s.on_end.add(|| {});
        s.arm_deadline(Duration::from_secs(4));

        s.dispose();
        assert!(!sub.is_active());
        assert!(s.on_end.is_empty());
        assert_eq!(s.timers.pending(), 0);
        assert_eq!(s.state(), SessionState::Ended);
        assert!(s.is_done());
    }
}
