//! # Guidepost
//!
//! Client-side behavior for a static travel-guide site: an auto-advancing
//! image carousel, contact-form validation with inline feedback, a
//! collapsible navigation menu, active-link highlighting, and smooth
//! scrolling for in-page anchors. The crate compiles to a wasm bundle that a
//! page loads with a single `<script type="module">`; the same code builds
//! natively for the `guidepost` CLI and for unit tests.
//!
//! # Architecture: Controllers Behind a Host Seam
//!
//! ```text
//!   page markup ──► web::dom (web-sys views) ─┐
//!                                             ├─► controllers ◄─ config
//!   window timers ─► web::scheduler ──────────┘   (carousel, form, nav)
//! ```
//!
//! Controllers own all the state and all the rules. They never reach for
//! `window` or `document` themselves: they act on small view traits and ask a
//! [`host::Scheduler`] for timers and the clock. The browser glue in `web`
//! implements those traits on top of `web-sys`; the test helpers implement
//! them in memory with a virtual clock.
//!
//! This split exists for two reasons:
//!
//! - **Testability**: a five-second carousel or a 3.3-second banner lifecycle
//!   is checked in microseconds by advancing a virtual clock.
//! - **One source of truth**: the CLI `check` command runs exactly the
//!   validator the browser runs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`host`] | `Scheduler` trait, single-timer `IntervalSlot`, run-once `Disposer` |
//! | [`config`] | `guidepost.toml` / page-embedded JSON loading, merging, validation |
//! | [`validate`] | Field rules (required, email, phone, future date, min length) |
//! | [`carousel`] | Slide index arithmetic and the auto-advancing controller |
//! | [`form`] | Blur/submit validation, feedback slots, success banner lifecycle |
//! | [`nav`] | Menu toggle, current-page detection, active-link styling, scroll targets |
//! | [`page`] | Discovers every component in a document and mounts its controller |
//! | [`markup`] | Maud rendering of the markup contract and the demo pages |
//! | [`output`] | CLI output formatting |
//! | `web` | wasm32 only: `web-sys` views, browser scheduler, event wiring |
//!
//! # Design Decisions
//!
//! ## Instance-Scoped State
//!
//! Each slider and each form gets its own controller. Two sliders on one page
//! advance independently and never share an index or a timer; a page without
//! a slider schedules nothing at all.
//!
//! ## One Timer Per Carousel
//!
//! Manual navigation stops the auto-advance interval before starting a new
//! one, through [`host::IntervalSlot`]. Rapid clicking never stacks
//! intervals, so the advance rate stays one slide per period.
//!
//! ## Config Over Constants
//!
//! Every period, message, and class name lives in
//! [`config::BehaviorConfig`]. Stock defaults reproduce the shipped site
//! exactly; a page can embed a JSON overlay naming only what it changes.

#[macro_use]
mod logging;

pub mod carousel;
pub mod config;
pub mod form;
pub mod host;
pub mod markup;
pub mod nav;
pub mod output;
pub mod page;
pub mod validate;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;
