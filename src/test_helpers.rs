//! Shared test utilities: a virtual clock and in-memory stand-ins for every
//! view trait.
//!
//! All fakes are cheap `Rc` handles, so a test can keep a clone of a field or
//! slider it handed to a controller and inspect what the controller did to it.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let sched = VirtualScheduler::new();
//! let carousel = Carousel::mount(FakeSlider::new(3), 3, sched.clone(), PERIOD);
//! sched.advance(PERIOD);
//! assert_eq!(carousel.view().active_dots(), vec![1]);
//! ```

use crate::carousel::SlideSurface;
use crate::form::{Banner, Field, FormSurface};
use crate::host::{Scheduler, TimerId};
use crate::nav::{MenuSurface, NavLink};
use crate::page::{Document, FormMarkup, SliderMarkup};
use crate::validate::FieldKind;
use chrono::{DateTime, FixedOffset};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Parse an RFC 3339 timestamp. Panics on malformed input.
pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap_or_else(|e| panic!("bad test timestamp {rfc3339:?}: {e}"))
}

// =========================================================================
// Virtual scheduler
// =========================================================================

enum Task {
    Every { period: u64, task: Rc<dyn Fn()> },
    Once(Box<dyn FnOnce()>),
}

struct Timer {
    due: u64,
    task: Task,
}

struct Clock {
    epoch: DateTime<FixedOffset>,
    now_ms: u64,
    next_id: i32,
    timers: BTreeMap<i32, Timer>,
}

/// Deterministic scheduler. Time only moves when [`advance`](Self::advance)
/// is called; timers fire in due order, ties broken by creation order.
#[derive(Clone)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::starting_at(at("2026-10-18T09:00:00+00:00"))
    }

    pub fn starting_at(epoch: DateTime<FixedOffset>) -> Self {
        Self {
            clock: Rc::new(RefCell::new(Clock {
                epoch,
                now_ms: 0,
                next_id: 1,
                timers: BTreeMap::new(),
            })),
        }
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    /// Move time forward, firing every timer that comes due on the way.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now_ms + by.as_millis() as u64;
        loop {
            let next = {
                let clock = self.clock.borrow();
                clock
                    .timers
                    .iter()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(id, t)| (t.due, **id))
                    .map(|(id, _)| *id)
            };
            let Some(id) = next else { break };

            // Release the borrow before running: tasks schedule and cancel.
            let run: Box<dyn FnOnce()> = {
                let mut clock = self.clock.borrow_mut();
                let Some(timer) = clock.timers.remove(&id) else { break };
                clock.now_ms = timer.due;
                match timer.task {
                    Task::Every { period, task } => {
                        let due = timer.due + period;
                        clock.timers.insert(
                            id,
                            Timer {
                                due,
                                task: Task::Every {
                                    period,
                                    task: Rc::clone(&task),
                                },
                            },
                        );
                        Box::new(move || task())
                    }
                    Task::Once(task) => task,
                }
            };
            run();
        }
        self.clock.borrow_mut().now_ms = target;
    }

    fn insert(&self, delay: Duration, task: Task) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now_ms + delay.as_millis() as u64;
        clock.timers.insert(id, Timer { due, task });
        TimerId(id)
    }
}

impl Scheduler for VirtualScheduler {
    fn every(&self, period: Duration, task: Rc<dyn Fn()>) -> TimerId {
        let period_ms = (period.as_millis() as u64).max(1);
        self.insert(
            Duration::from_millis(period_ms),
            Task::Every {
                period: period_ms,
                task,
            },
        )
    }

    fn after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        self.insert(delay, Task::Once(task))
    }

    fn cancel(&self, id: TimerId) {
        self.clock.borrow_mut().timers.remove(&id.0);
    }

    fn now(&self) -> DateTime<FixedOffset> {
        let clock = self.clock.borrow();
        clock.epoch + chrono::Duration::milliseconds(clock.now_ms as i64)
    }
}

// =========================================================================
// Carousel
// =========================================================================

/// Records the last transform and each dot's state.
#[derive(Clone)]
pub struct FakeSlider {
    offset: Rc<Cell<Option<i64>>>,
    dots: Rc<RefCell<Vec<bool>>>,
}

impl FakeSlider {
    pub fn new(dots: usize) -> Self {
        Self {
            offset: Rc::new(Cell::new(None)),
            dots: Rc::new(RefCell::new(vec![false; dots])),
        }
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset.get()
    }

    pub fn active_dots(&self) -> Vec<usize> {
        self.dots
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i)
            .collect()
    }
}

impl SlideSurface for FakeSlider {
    fn translate(&self, offset_percent: i64) {
        self.offset.set(Some(offset_percent));
    }

    fn dot_count(&self) -> usize {
        self.dots.borrow().len()
    }

    fn set_dot_active(&self, dot: usize, active: bool) {
        self.dots.borrow_mut()[dot] = active;
    }
}

// =========================================================================
// Forms
// =========================================================================

struct Slot {
    text: String,
    visible: bool,
}

struct FieldState {
    kind: FieldKind,
    initial: String,
    value: RefCell<String>,
    error_class: Cell<bool>,
    slot: RefCell<Option<Slot>>,
    slots_created: Cell<usize>,
}

/// A field with a value, an error flag, and a lazily created feedback slot.
#[derive(Clone)]
pub struct FakeField(Rc<FieldState>);

impl FakeField {
    pub fn new(kind: FieldKind, initial: &str) -> Self {
        Self(Rc::new(FieldState {
            kind,
            initial: initial.to_string(),
            value: RefCell::new(initial.to_string()),
            error_class: Cell::new(false),
            slot: RefCell::new(None),
            slots_created: Cell::new(0),
        }))
    }

    pub fn set_value(&self, value: &str) {
        *self.0.value.borrow_mut() = value.to_string();
    }

    pub fn has_error_class(&self) -> bool {
        self.0.error_class.get()
    }

    pub fn slot_exists(&self) -> bool {
        self.0.slot.borrow().is_some()
    }

    pub fn slot_text(&self) -> Option<String> {
        self.0.slot.borrow().as_ref().map(|s| s.text.clone())
    }

    pub fn slot_visible(&self) -> bool {
        self.0.slot.borrow().as_ref().is_some_and(|s| s.visible)
    }

    pub fn slots_created(&self) -> usize {
        self.0.slots_created.get()
    }

    fn reset(&self) {
        self.set_value(&self.0.initial.clone());
    }
}

impl Field for FakeField {
    fn kind(&self) -> FieldKind {
        self.0.kind
    }

    fn value(&self) -> String {
        self.0.value.borrow().clone()
    }

    fn show_error(&self, message: &str) {
        self.0.error_class.set(true);
        let mut slot = self.0.slot.borrow_mut();
        if slot.is_none() {
            self.0.slots_created.set(self.0.slots_created.get() + 1);
        }
        *slot = Some(Slot {
            text: message.to_string(),
            visible: true,
        });
    }

    fn clear_error(&self) {
        self.0.error_class.set(false);
        if let Some(slot) = self.0.slot.borrow_mut().as_mut() {
            slot.visible = false;
        }
    }
}

struct BannerState {
    message: String,
    visible: Cell<bool>,
    attached: Cell<bool>,
}

#[derive(Clone)]
pub struct FakeBanner(Rc<BannerState>);

impl FakeBanner {
    pub fn message(&self) -> &str {
        &self.0.message
    }

    pub fn is_visible(&self) -> bool {
        self.0.visible.get()
    }

    pub fn is_attached(&self) -> bool {
        self.0.attached.get()
    }
}

impl Banner for FakeBanner {
    fn hide(&self) {
        self.0.visible.set(false);
    }

    fn remove(&self) {
        self.0.attached.set(false);
    }
}

/// A form that resets its fields and keeps every banner it ever showed.
#[derive(Clone)]
pub struct FakeForm {
    fields: Vec<FakeField>,
    banners: Rc<RefCell<Vec<FakeBanner>>>,
    resets: Rc<Cell<usize>>,
}

impl FakeForm {
    pub fn new(fields: Vec<FakeField>) -> Self {
        Self {
            fields,
            banners: Rc::new(RefCell::new(Vec::new())),
            resets: Rc::new(Cell::new(0)),
        }
    }

    pub fn banner_count(&self) -> usize {
        self.banners.borrow().len()
    }

    pub fn banner(&self, index: usize) -> FakeBanner {
        self.banners.borrow()[index].clone()
    }

    pub fn resets(&self) -> usize {
        self.resets.get()
    }
}

impl FormSurface for FakeForm {
    type Field = FakeField;
    type Banner = FakeBanner;

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
        for field in &self.fields {
            field.reset();
        }
    }

    fn show_banner(&self, message: &str) -> FakeBanner {
        let banner = FakeBanner(Rc::new(BannerState {
            message: message.to_string(),
            visible: Cell::new(true),
            attached: Cell::new(true),
        }));
        self.banners.borrow_mut().push(banner.clone());
        banner
    }
}

// =========================================================================
// Navigation
// =========================================================================

#[derive(Clone)]
pub struct FakeMenu {
    open: Rc<Cell<bool>>,
}

impl FakeMenu {
    pub fn new(open: bool) -> Self {
        Self {
            open: Rc::new(Cell::new(open)),
        }
    }

    pub fn open(&self) -> bool {
        self.open.get()
    }
}

impl MenuSurface for FakeMenu {
    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn set_open(&self, open: bool) {
        self.open.set(open);
    }
}

/// A link that records the inline styles set on it, in order.
#[derive(Clone)]
pub struct FakeLink {
    href: Option<String>,
    styles: Rc<RefCell<Vec<(String, String)>>>,
}

impl FakeLink {
    pub fn new(href: Option<&str>) -> Self {
        Self {
            href: href.map(str::to_string),
            styles: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn styles(&self) -> Vec<(String, String)> {
        self.styles.borrow().clone()
    }
}

impl NavLink for FakeLink {
    fn href(&self) -> Option<String> {
        self.href.clone()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .push((property.to_string(), value.to_string()));
    }
}

// =========================================================================
// Document
// =========================================================================

/// A page assembled from fakes, builder style.
pub struct FakeDocument {
    pathname: String,
    sliders: Vec<(FakeSlider, usize)>,
    forms: Vec<FakeForm>,
    menu: Option<FakeMenu>,
    links: Vec<FakeLink>,
}

impl FakeDocument {
    pub fn new(pathname: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
            sliders: Vec::new(),
            forms: Vec::new(),
            menu: None,
            links: Vec::new(),
        }
    }

    pub fn with_slider(mut self, slides: usize, dots: usize) -> Self {
        self.sliders.push((FakeSlider::new(dots), slides));
        self
    }

    pub fn with_form(mut self, fields: Vec<FakeField>) -> Self {
        self.forms.push(FakeForm::new(fields));
        self
    }

    pub fn with_menu(mut self) -> Self {
        self.menu = Some(FakeMenu::new(false));
        self
    }

    pub fn with_links(mut self, hrefs: &[&str]) -> Self {
        self.links
            .extend(hrefs.iter().map(|h| FakeLink::new(Some(h))));
        self
    }

    pub fn link(&self, index: usize) -> FakeLink {
        self.links[index].clone()
    }
}

impl Document for FakeDocument {
    type Slider = FakeSlider;
    type Form = FakeForm;
    type Menu = FakeMenu;
    type Link = FakeLink;

    fn sliders(&self) -> Vec<SliderMarkup<FakeSlider>> {
        self.sliders
            .iter()
            .map(|(surface, slides)| SliderMarkup {
                surface: surface.clone(),
                slides: *slides,
            })
            .collect()
    }

    fn forms(&self) -> Vec<FormMarkup<FakeForm>> {
        self.forms
            .iter()
            .map(|form| FormMarkup {
                surface: form.clone(),
                fields: form.fields.clone(),
            })
            .collect()
    }

    fn menu(&self) -> Option<FakeMenu> {
        self.menu.clone()
    }

    fn nav_links(&self) -> Vec<FakeLink> {
        self.links.clone()
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_scheduler_fires_in_due_order() {
        let sched = VirtualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, ms) in [("b", 200), ("a", 100), ("c", 200)] {
            let log = log.clone();
            sched.after(Duration::from_millis(ms), Box::new(move || log.borrow_mut().push(name)));
        }
        sched.advance(Duration::from_millis(500));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn virtual_scheduler_clock_moves_with_advance() {
        let sched = VirtualScheduler::starting_at(at("2026-10-18T09:00:00+00:00"));
        sched.advance(Duration::from_millis(1500));
        assert_eq!(sched.now(), at("2026-10-18T09:00:01.500+00:00"));
    }

    #[test]
    fn tasks_may_schedule_follow_ups() {
        let sched = VirtualScheduler::new();
        let hit = Rc::new(Cell::new(false));
        let (s, h) = (sched.clone(), hit.clone());
        sched.after(
            Duration::from_millis(10),
            Box::new(move || {
                s.after(Duration::from_millis(10), Box::new(move || h.set(true)));
            }),
        );
        sched.advance(Duration::from_millis(20));
        assert!(hit.get());
    }
}
