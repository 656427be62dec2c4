//! Carousel controller.
//!
//! A slider is a viewport holding N slides side by side. Exactly one slide is
//! visible: the viewport is shifted left by `index × 100%`. Indicator dots
//! mirror the index, and a repeating timer advances it.
//!
//! [`Track`] is the index arithmetic alone. [`Carousel`] owns a track, the
//! view it renders to, and the auto-advance timer. Manual navigation always
//! cancels the running timer and starts a fresh one, so a click resets the
//! countdown instead of racing it.
//!
//! A slider with no slides mounts as an inert instance: no timer, navigation
//! is ignored.

use crate::host::{Disposer, IntervalSlot, Scheduler};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Current position within a fixed number of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    index: usize,
    len: usize,
}

impl Track {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.len;
    }

    pub fn previous(&mut self) {
        if self.is_empty() {
            return;
        }
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// Jump straight to `n`.
    ///
    /// Not bounds-checked: dots are the only caller and a dot's position is a
    /// slide position. An out-of-range `n` is rendered as-is and the next
    /// step wraps back into range.
    pub fn go_to(&mut self, n: usize) {
        if self.is_empty() {
            return;
        }
        self.index = n;
    }

    /// Horizontal viewport offset, in percent of the viewport width.
    pub fn offset_percent(&self) -> i64 {
        -(self.index as i64) * 100
    }
}

/// Where a carousel renders.
pub trait SlideSurface: 'static {
    /// Shift the viewport to `offset_percent` (0, -100, -200, ...).
    fn translate(&self, offset_percent: i64);

    /// Number of indicator dots. May be zero.
    fn dot_count(&self) -> usize;

    /// Mark one dot active or inactive.
    fn set_dot_active(&self, dot: usize, active: bool);
}

/// One mounted slider. Cloning yields another handle to the same instance.
pub struct Carousel<V: SlideSurface, S: Scheduler> {
    inner: Rc<Inner<V, S>>,
}

struct Inner<V: SlideSurface, S: Scheduler> {
    track: RefCell<Track>,
    view: V,
    timer: IntervalSlot<S>,
    period: Duration,
    disposed: Cell<bool>,
}

impl<V: SlideSurface, S: Scheduler> Inner<V, S> {
    fn render(&self) {
        let track = *self.track.borrow();
        self.view.translate(track.offset_percent());
        for dot in 0..self.view.dot_count() {
            self.view.set_dot_active(dot, dot == track.index());
        }
    }

    fn advance(&self) {
        self.track.borrow_mut().next();
        self.render();
    }
}

impl<V: SlideSurface, S: Scheduler> Clone for Carousel<V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V: SlideSurface, S: Scheduler> Carousel<V, S> {
    /// Render slide 0 and start auto-advancing every `period`.
    pub fn mount(view: V, slides: usize, scheduler: S, period: Duration) -> Self {
        let carousel = Self {
            inner: Rc::new(Inner {
                track: RefCell::new(Track::new(slides)),
                view,
                timer: IntervalSlot::new(scheduler),
                period,
                disposed: Cell::new(false),
            }),
        };
        carousel.inner.render();
        if slides > 0 {
            carousel.start_auto_advance();
        }
        debug_log!("carousel mounted: {slides} slides, {}ms period", period.as_millis());
        carousel
    }

    /// Manual "next" (the next button).
    pub fn next(&self) {
        self.navigate(Track::next);
    }

    /// Manual "previous" (the previous button).
    pub fn previous(&self) {
        self.navigate(Track::previous);
    }

    /// Manual jump (a dot click).
    pub fn go_to(&self, n: usize) {
        self.navigate(|t| t.go_to(n));
    }

    pub fn index(&self) -> usize {
        self.inner.track.borrow().index()
    }

    pub fn len(&self) -> usize {
        self.inner.track.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn view(&self) -> &V {
        &self.inner.view
    }

    /// Whether the auto-advance timer is live.
    pub fn is_running(&self) -> bool {
        self.inner.timer.is_running()
    }

    /// Stop the timer and ignore further navigation.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        self.inner.timer.stop();
    }

    pub fn disposer(&self) -> Disposer {
        let this = self.clone();
        Disposer::new(move || this.dispose())
    }

    fn navigate(&self, step: impl FnOnce(&mut Track)) {
        if self.inner.disposed.get() || self.is_empty() {
            return;
        }
        self.inner.timer.stop();
        step(&mut *self.inner.track.borrow_mut());
        self.inner.render();
        self.start_auto_advance();
    }

    fn start_auto_advance(&self) {
        // Weak, so a pending interval never keeps a disposed slider alive.
        let weak = Rc::downgrade(&self.inner);
        self.inner.timer.restart(
            self.inner.period,
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.advance();
                }
            }),
        );
    }
}
