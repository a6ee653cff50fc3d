//! Session timer - cancelable one-shot countdowns on a virtual clock
//!
//! A [`TimerQueue`] owns its own clock that only moves when the owner calls
//! [`TimerQueue::advance`]. Due actions fire in due-time order (ties in
//! scheduling order), and while an action runs the clock reads that action's
//! due time. Delays scheduled from inside an action are therefore measured from
//! the instant the action was due, not from the end of the frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerStatus {
    Pending,
    Fired,
    Canceled,
}

struct Entry {
    due: Duration,
    seq: u64,
    status: Rc<Cell<TimerStatus>>,
    action: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Inner {
    now: Duration,
    next_seq: u64,
    entries: Vec<Entry>,
}

/// Queue of one-shot timers sharing one virtual clock.
#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<Inner>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Schedule `action` to run once, `delay` from now.
    pub fn after(&self, delay: Duration, action: impl FnOnce() + 'static) -> TimerHandle {
        let status = Rc::new(Cell::new(TimerStatus::Pending));
        let mut inner = self.inner.borrow_mut();
        inner.next_seq += 1;
        let entry = Entry {
            due: inner.now + delay,
            seq: inner.next_seq,
            status: Rc::clone(&status),
            action: Box::new(action),
        };
        inner.entries.push(entry);
        TimerHandle { status }
    }

    /// Move the clock forward by `dt`, firing every action that becomes due.
    ///
    /// Returns the number of actions fired.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.now() + dt;
        let mut fired = 0;

        while let Some(entry) = self.pop_due(target) {
            entry.status.set(TimerStatus::Fired);
            (entry.action)();
            fired += 1;
        }

        let mut inner = self.inner.borrow_mut();
        if inner.now < target {
            inner.now = target;
        }
        fired
    }

    /// Cancel and drop every pending timer.
    pub fn clear(&self) {
        let drained: Vec<Entry> = self.inner.borrow_mut().entries.drain(..).collect();
        for entry in &drained {
            if entry.status.get() == TimerStatus::Pending {
                entry.status.set(TimerStatus::Canceled);
            }
        }
        // Actions may own handles back into their session; drop them with no
        // borrow held.
        drop(drained);
    }

    /// Number of timers that can still fire.
    pub fn pending(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.status.get() == TimerStatus::Pending)
            .count()
    }

    fn pop_due(&self, target: Duration) -> Option<Entry> {
        let mut inner = self.inner.borrow_mut();
        inner
            .entries
            .retain(|e| e.status.get() == TimerStatus::Pending);

        let idx = inner
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= target)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;

        let entry = inner.entries.remove(idx);
        if inner.now < entry.due {
            inner.now = entry.due;
        }
        Some(entry)
    }
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

/// Handle to one scheduled action.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    status: Rc<Cell<TimerStatus>>,
}

impl TimerHandle {
    /// A handle that was never scheduled; behaves as already canceled.
    pub fn detached() -> Self {
        Self {
            status: Rc::new(Cell::new(TimerStatus::Canceled)),
        }
    }

    /// Prevent the action from firing. No-op once it has fired.
    pub fn cancel(&self) {
        if self.status.get() == TimerStatus::Pending {
            self.status.set(TimerStatus::Canceled);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status.get() == TimerStatus::Pending
    }

    pub fn has_fired(&self) -> bool {
        self.status.get() == TimerStatus::Fired
    }

    pub fn is_canceled(&self) -> bool {
        self.status.get() == TimerStatus::Canceled
    }
}
