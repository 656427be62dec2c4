//! Page bootstrap.
//!
//! Discovers every slider, form, and menu in a document and mounts one
//! controller for each. The document is abstract ([`Document`]) so discovery
//! runs against the real DOM in the browser and against fakes in tests.
//!
//! Bootstrapping only creates controllers. Attaching event listeners to the
//! controls that drive them is the host's job, since only the host knows what
//! a click is.

use crate::carousel::{Carousel, SlideSurface};
use crate::config::BehaviorConfig;
use crate::form::{FormController, FormSurface};
use crate::host::{Disposer, Scheduler};
use crate::nav::{self, Menu, MenuSurface, NavLink};
use crate::validate::Validator;
use std::rc::Rc;

/// A slider found in the document.
pub struct SliderMarkup<V> {
    pub surface: V,
    /// Slide count, fixed at discovery.
    pub slides: usize,
}

/// A form found in the document, with the controls it contained at discovery.
pub struct FormMarkup<F: FormSurface> {
    pub surface: F,
    pub fields: Vec<F::Field>,
}

/// Everything bootstrap needs to find in a page.
pub trait Document {
    type Slider: SlideSurface;
    type Form: FormSurface;
    type Menu: MenuSurface;
    type Link: NavLink;

    fn sliders(&self) -> Vec<SliderMarkup<Self::Slider>>;
    fn forms(&self) -> Vec<FormMarkup<Self::Form>>;
    /// `None` when the page has no menu toggle.
    fn menu(&self) -> Option<Self::Menu>;
    fn nav_links(&self) -> Vec<Self::Link>;
    /// `location.pathname`.
    fn pathname(&self) -> String;
}

/// Every controller mounted on one page.
pub struct Page<D: Document, S: Scheduler> {
    pub carousels: Vec<Carousel<D::Slider, S>>,
    pub forms: Vec<FormController<D::Form, S>>,
    pub menu: Option<Menu<D::Menu>>,
}

impl<D: Document, S: Scheduler> Page<D, S> {
    /// Mount a controller for every slider, form, and menu in `doc`.
    pub fn boot(doc: &D, scheduler: S, config: &BehaviorConfig) -> Self {
        let carousels: Vec<_> = doc
            .sliders()
            .into_iter()
            .map(|s| {
                Carousel::mount(
                    s.surface,
                    s.slides,
                    scheduler.clone(),
                    config.carousel.interval(),
                )
            })
            .collect();

        let validator = Rc::new(Validator::new(config.validation.clone()));
        let forms: Vec<_> = doc
            .forms()
            .into_iter()
            .map(|f| {
                FormController::mount(
                    f.surface,
                    f.fields,
                    Rc::clone(&validator),
                    scheduler.clone(),
                    config.banner.clone(),
                )
            })
            .collect();

        let menu = doc.menu().map(Menu::mount);

        info_log!(
            "guidepost: {} sliders, {} forms, menu {}",
            carousels.len(),
            forms.len(),
            if menu.is_some() { "present" } else { "absent" }
        );

        Self {
            carousels,
            forms,
            menu,
        }
    }

    /// Tears down every controller on the page.
    pub fn disposer(&self) -> Disposer {
        let mut parts: Vec<Disposer> = self.carousels.iter().map(Carousel::disposer).collect();
        parts.extend(self.forms.iter().map(FormController::disposer));
        parts.extend(self.menu.iter().map(Menu::disposer));
        Disposer::all(parts)
    }
}

/// Highlight the nav links pointing at the current page. Runs at load time,
/// independent of [`Page::boot`].
pub fn highlight_nav<D: Document>(doc: &D, config: &BehaviorConfig) -> usize {
    nav::highlight_active_links(&doc.nav_links(), &doc.pathname(), &config.nav)
}
