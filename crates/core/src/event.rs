//! Event channel - minimal multi-subscriber broadcast
//!
//! A channel keeps an ordered list of handlers. `trigger()` copies the list
//! before invoking anything, so handlers may freely `add`, `cancel` or `clear`
//! while a dispatch is in flight: those changes only affect the next trigger.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler = Rc<RefCell<dyn FnMut()>>;

struct Slot {
    id: u64,
    handler: Handler,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    slots: Vec<Slot>,
}

/// Broadcast list with add/trigger/clear.
///
/// Cloning a channel yields another handle to the same subscriber list.
#[derive(Clone, Default)]
pub struct EventChannel {
    inner: Rc<RefCell<Subscribers>>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler. Handlers run in subscription order.
    pub fn add(&self, handler: impl FnMut() + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.slots.push(Slot {
            id,
            handler: Rc::new(RefCell::new(handler)),
        });
        Subscription {
            id,
            channel: Rc::downgrade(&self.inner),
        }
    }

    /// Invoke every subscriber present at the time of the call.
    ///
    /// Returns the number of handlers invoked.
    pub fn trigger(&self) -> usize {
        let snapshot: Vec<Handler> = self
            .inner
            .borrow()
            .slots
            .iter()
            .map(|slot| Rc::clone(&slot.handler))
            .collect();

        let mut invoked = 0;
        for handler in snapshot {
            // A handler that re-triggers its own channel is not re-entered.
            if let Ok(mut f) = handler.try_borrow_mut() {
                (*f)();
                invoked += 1;
            }
        }
        invoked
    }

    /// Drop all subscribers.
    pub fn clear(&self) {
        self.inner.borrow_mut().slots.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Handle to a single subscription.
///
/// Holds only a weak reference, so it never keeps a channel alive.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    channel: Weak<RefCell<Subscribers>>,
}

impl Subscription {
    /// A handle that is not attached to any channel.
    pub fn detached() -> Self {
        Self {
            id: 0,
            channel: Weak::new(),
        }
    }

    /// Remove the handler from its channel. No-op if already removed.
    pub fn cancel(&self) {
        if let Some(inner) = self.channel.upgrade() {
            inner.borrow_mut().slots.retain(|slot| slot.id != self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.channel
            .upgrade()
            .map(|inner| inner.borrow().slots.iter().any(|slot| slot.id == self.id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnMut()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let make = move |name: &'static str| {
            let l = Rc::clone(&l);
            Box::new(move || l.borrow_mut().push(name)) as Box<dyn FnMut()>
        };
        (log, make)
    }

    #[test]
    fn trigger_runs_handlers_in_subscription_order() {
        let ch = EventChannel::new();
        let (log, make) = recorder();
        ch.add(make("a"));
        ch.add(make("b"));
        ch.add(make("c"));

        assert_eq!(ch.trigger(), 3);
        assert_eq!(log.borrow().as_slice(), &["a", "b", "c"]);
    }

    #[test]
    fn clear_makes_trigger_a_no_op_until_new_subscribers() {
        let ch = EventChannel::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        ch.add(move || h.set(h.get() + 1));

        ch.clear();
        assert_eq!(ch.trigger(), 0);
        assert_eq!(hits.get(), 0);

        let h = Rc::clone(&hits);
        ch.add(move || h.set(h.get() + 10));
        ch.trigger();
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn cancel_removes_only_that_subscriber() {
        let ch = EventChannel::new();
        let (log, make) = recorder();
        let sub_a = ch.add(make("a"));
        ch.add(make("b"));

        assert!(sub_a.is_active());
        sub_a.cancel();
        assert!(!sub_a.is_active());
        sub_a.cancel();

        ch.trigger();
        assert_eq!(log.borrow().as_slice(), &["b"]);
    }

    #[test]
    fn handler_can_clear_channel_mid_trigger_without_skipping_snapshot() {
        let ch = EventChannel::new();
        let (log, make) = recorder();
        let ch2 = ch.clone();
        let mut first = make("first");
        ch.add(move || {
            first();
            ch2.clear();
        });
        ch.add(make("second"));

        assert_eq!(ch.trigger(), 2);
        assert_eq!(log.borrow().as_slice(), &["first", "second"]);

        // The clear took effect for the next dispatch.
        assert_eq!(ch.trigger(), 0);
    }

    #[test]
    fn handler_added_mid_trigger_runs_on_next_trigger_only() {
        let ch = EventChannel::new();
        let hits = Rc::new(Cell::new(0));
        let ch2 = ch.clone();
        let h = Rc::clone(&hits);
        ch.add(move || {
            let h = Rc::clone(&h);
            ch2.add(move || h.set(h.get() + 1));
        });

        ch.trigger();
        assert_eq!(hits.get(), 0);
        assert_eq!(ch.len(), 2);

        ch.trigger();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn recursive_trigger_does_not_reenter_running_handler() {
        let ch = EventChannel::new();
        let hits = Rc::new(Cell::new(0));
        let ch2 = ch.clone();
        let h = Rc::clone(&hits);
        ch.add(move || {
            h.set(h.get() + 1);
            ch2.trigger();
        });

        ch.trigger();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn subscription_outliving_channel_is_inert() {
        let sub = {
            let ch = EventChannel::new();
            ch.add(|| {})
        };
        assert!(!sub.is_active());
        sub.cancel();
        assert!(!Subscription::detached().is_active());
    }
}
