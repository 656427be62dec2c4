//! The seam between the controllers and whatever hosts them.
//!
//! Controllers never touch `window` directly. Timers and the clock come from a
//! [`Scheduler`], and every mount hands back a [`Disposer`] that detaches it.
//! In the browser the scheduler is backed by `setInterval`/`setTimeout`
//! (see `web::scheduler`); in tests it is a virtual clock advanced by hand
//! (see `test_helpers::VirtualScheduler`).
//!
//! All of this is single-threaded: tasks are `Rc` closures, state is
//! `Rc<RefCell<_>>`, and each callback runs to completion before the next.

use chrono::{DateTime, FixedOffset};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Opaque handle for a pending timer.
///
/// Browsers hand out small positive integers; the virtual scheduler does the
/// same, so the wrapped value is only meaningful to the scheduler that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub i32);

/// Timers and wall-clock time.
pub trait Scheduler: Clone + 'static {
    /// Run `task` every `period` until cancelled.
    fn every(&self, period: Duration, task: Rc<dyn Fn()>) -> TimerId;

    /// Run `task` once after `delay`.
    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a timer. Cancelling an unknown or already-fired id is a no-op.
    fn cancel(&self, id: TimerId);

    /// Current moment, carrying the host's local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// A repeating timer slot that holds at most one live timer.
///
/// [`restart`](Self::restart) cancels the previous timer before starting the
/// next, so the owner can never end up with two intervals racing each other.
pub struct IntervalSlot<S: Scheduler> {
    scheduler: S,
    current: Cell<Option<TimerId>>,
}

impl<S: Scheduler> IntervalSlot<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            current: Cell::new(None),
        }
    }

    pub fn restart(&self, period: Duration, task: Rc<dyn Fn()>) {
        self.stop();
        self.current.set(Some(self.scheduler.every(period, task)));
    }

    pub fn stop(&self) {
        if let Some(id) = self.current.take() {
            self.scheduler.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.get().is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: Scheduler> Drop for IntervalSlot<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run-once teardown for a mounted component.
///
/// Dropping a disposer runs it; [`Disposer::forget`] keeps the component alive
/// for the rest of the page's life instead.
#[must_use = "dropping a Disposer detaches the component immediately"]
pub struct Disposer(Option<Box<dyn FnOnce()>>);

impl Disposer {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(teardown)))
    }

    /// A disposer with nothing to tear down.
    pub fn noop() -> Self {
        Self(None)
    }

    /// Merge several disposers into one that runs them in order.
    pub fn all(parts: Vec<Disposer>) -> Self {
        Self::new(move || {
            for part in parts {
                part.dispose();
            }
        })
    }

    pub fn dispose(mut self) {
        if let Some(teardown) = self.0.take() {
            teardown();
        }
    }

    /// Leak the component: it stays mounted until the page unloads.
    ///
    /// The teardown closure and everything it captures are leaked with it,
    /// which is what keeps handles captured by the teardown alive.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        if let Some(teardown) = self.0.take() {
            teardown();
        }
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Disposer")
            .field(&if self.0.is_some() { "armed" } else { "spent" })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::VirtualScheduler;
    use std::cell::RefCell;

    #[test]
    fn disposer_runs_once_on_dispose() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let d = Disposer::new(move || h.set(h.get() + 1));
        d.dispose();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn disposer_runs_on_drop() {
        let hits = Rc::new(Cell::new(0));
        {
            let h = hits.clone();
            let _d = Disposer::new(move || h.set(h.get() + 1));
        }
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn forgotten_disposer_never_runs() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        Disposer::new(move || h.set(h.get() + 1)).forget();
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn all_runs_parts_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let parts = (0..3)
            .map(|i| {
                let log = log.clone();
                Disposer::new(move || log.borrow_mut().push(i))
            })
            .collect();
        Disposer::all(parts).dispose();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn interval_slot_keeps_a_single_timer() {
        let sched = VirtualScheduler::new();
        let slot = IntervalSlot::new(sched.clone());
        let ticks = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let t = ticks.clone();
            slot.restart(Duration::from_millis(100), Rc::new(move || t.set(t.get() + 1)));
        }
        assert_eq!(sched.pending(), 1);

        sched.advance(Duration::from_millis(100));
        assert_eq!(ticks.get(), 1);

        slot.stop();
        assert!(!slot.is_running());
        sched.advance(Duration::from_millis(1000));
        assert_eq!(ticks.get(), 1);
    }

    #[test]
    fn dropping_interval_slot_cancels_its_timer() {
        let sched = VirtualScheduler::new();
        let ticks = Rc::new(Cell::new(0));
        {
            let slot = IntervalSlot::new(sched.clone());
            let t = ticks.clone();
            slot.restart(Duration::from_millis(100), Rc::new(move || t.set(t.get() + 1)));
            assert_eq!(sched.pending(), 1);
        }
        assert_eq!(sched.pending(), 0);
        sched.advance(Duration::from_millis(500));
        assert_eq!(ticks.get(), 0);
    }
}
