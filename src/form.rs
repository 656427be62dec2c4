//! Form controller.
//!
//! Fields are validated on blur for immediate feedback, and all of them are
//! validated together on submit. Native submission is always suppressed by
//! the caller; this module only decides what the page shows.
//!
//! ## Feedback Slots
//!
//! Each field owns at most one feedback slot, placed right after it. The slot
//! is created the first time the field fails and reused from then on; a
//! passing field hides its slot without removing it. How the slot is found or
//! created is the [`Field`] implementation's business.
//!
//! ## Success Banner
//!
//! ```text
//! t = 0            banner inserted, visible
//! t = hide_after   banner hidden (fade-out starts)
//! t = +fade        banner removed
//! ```

use crate::config::BannerConfig;
use crate::host::{Disposer, Scheduler};
use crate::validate::{FieldKind, Validator, Verdict};
use chrono::{DateTime, FixedOffset};
use std::cell::Cell;
use std::rc::Rc;

/// One input, text area, or select.
pub trait Field: 'static {
    fn kind(&self) -> FieldKind;

    /// Current raw value, untrimmed.
    fn value(&self) -> String;

    /// Flag the field and show `message` in its feedback slot, creating the
    /// slot if the field has none yet.
    fn show_error(&self, message: &str);

    /// Unflag the field and hide its feedback slot, if it has one.
    fn clear_error(&self);
}

/// A transient confirmation shown after a successful submit.
pub trait Banner: 'static {
    fn hide(&self);
    fn remove(&self);
}

/// The form element itself.
pub trait FormSurface: 'static {
    type Field: Field;
    type Banner: Banner;

    /// Restore every field to its initial value.
    fn reset(&self);

    /// Insert a visible banner carrying `message`.
    fn show_banner(&self, message: &str) -> Self::Banner;
}

/// Validate one field and reflect the verdict on it.
pub fn check_field<F: Field>(field: &F, validator: &Validator, now: DateTime<FixedOffset>) -> Verdict {
    let verdict = validator.check(field.kind(), &field.value(), now);
    match verdict {
        Ok(()) => field.clear_error(),
        Err(violation) => field.show_error(validator.message(violation)),
    }
    verdict
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; the banner is up and the form was reset.
    Accepted,
    /// At least one field failed; each failing field shows its own message.
    Rejected { invalid: usize },
    /// The controller was disposed.
    Ignored,
}

/// One mounted form. Cloning yields another handle to the same instance.
pub struct FormController<F: FormSurface, S: Scheduler> {
    inner: Rc<Inner<F, S>>,
}

struct Inner<F: FormSurface, S: Scheduler> {
    surface: F,
    fields: Vec<F::Field>,
    validator: Rc<Validator>,
    scheduler: S,
    banner: BannerConfig,
    disposed: Cell<bool>,
}

impl<F: FormSurface, S: Scheduler> Clone for FormController<F, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F: FormSurface, S: Scheduler> FormController<F, S> {
    /// `fields` is fixed here: controls added to the form later are not
    /// validated.
    pub fn mount(
        surface: F,
        fields: Vec<F::Field>,
        validator: Rc<Validator>,
        scheduler: S,
        banner: BannerConfig,
    ) -> Self {
        debug_log!("form mounted with {} fields", fields.len());
        Self {
            inner: Rc::new(Inner {
                surface,
                fields,
                validator,
                scheduler,
                banner,
                disposed: Cell::new(false),
            }),
        }
    }

    /// A field lost focus. Returns `None` for an unknown index or after
    /// disposal.
    pub fn blur(&self, index: usize) -> Option<Verdict> {
        if self.inner.disposed.get() {
            return None;
        }
        let field = self.inner.fields.get(index)?;
        Some(check_field(field, &self.inner.validator, self.inner.scheduler.now()))
    }

    /// The form was submitted.
    ///
    /// Every field is validated, even after the first failure, so all
    /// errors show at once.
    pub fn submit(&self) -> SubmitOutcome {
        if self.inner.disposed.get() {
            return SubmitOutcome::Ignored;
        }
        let now = self.inner.scheduler.now();
        let invalid = self
            .inner
            .fields
            .iter()
            .map(|field| check_field(field, &self.inner.validator, now))
            .filter(Result::is_err)
            .count();

        if invalid > 0 {
            debug_log!("form rejected: {invalid} invalid fields");
            return SubmitOutcome::Rejected { invalid };
        }

        self.show_banner();
        self.inner.surface.reset();
        SubmitOutcome::Accepted
    }

    pub fn fields(&self) -> &[F::Field] {
        &self.inner.fields
    }

    pub fn surface(&self) -> &F {
        &self.inner.surface
    }

    /// Ignore further blur/submit. Banners already on screen finish their
    /// hide/remove sequence.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
    }

    pub fn disposer(&self) -> Disposer {
        let this = self.clone();
        Disposer::new(move || this.dispose())
    }

    fn show_banner(&self) {
        let cfg = &self.inner.banner;
        let banner = self.inner.surface.show_banner(&cfg.message);
        let scheduler = self.inner.scheduler.clone();
        let fade = cfg.fade();
        self.inner.scheduler.after(
            cfg.hide_after(),
            Box::new(move || {
                banner.hide();
                scheduler.after(fade, Box::new(move || banner.remove()));
            }),
        );
    }
}
