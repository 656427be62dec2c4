//! Navigation: the collapsible menu, active-link highlighting, and
//! smooth-scroll targets for in-page anchors.

use crate::config::NavConfig;
use crate::host::Disposer;
use std::cell::Cell;
use std::rc::Rc;

// =============================================================================
// Menu toggle
// =============================================================================

/// The toggle button and the panel it opens.
pub trait MenuSurface: 'static {
    /// Whether the markup starts out open.
    fn is_open(&self) -> bool;

    /// Put both the toggle and the panel in the open or closed state.
    fn set_open(&self, open: bool);
}

/// A mounted menu. Cloning yields another handle to the same menu.
pub struct Menu<M: MenuSurface> {
    inner: Rc<MenuInner<M>>,
}

struct MenuInner<M> {
    surface: M,
    open: Cell<bool>,
    disposed: Cell<bool>,
}

impl<M: MenuSurface> Clone for Menu<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M: MenuSurface> Menu<M> {
    pub fn mount(surface: M) -> Self {
        let open = surface.is_open();
        Self {
            inner: Rc::new(MenuInner {
                surface,
                open: Cell::new(open),
                disposed: Cell::new(false),
            }),
        }
    }

    /// The toggle was clicked.
    pub fn toggle(&self) {
        self.set(!self.inner.open.get());
    }

    /// A link inside the panel was clicked. The link still navigates.
    pub fn close(&self) {
        self.set(false);
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.get()
    }

    pub fn surface(&self) -> &M {
        &self.inner.surface
    }

    pub fn dispose(&self) {
        self.inner.disposed.set(true);
    }

    pub fn disposer(&self) -> Disposer {
        let this = self.clone();
        Disposer::new(move || this.dispose())
    }

    fn set(&self, open: bool) {
        if self.inner.disposed.get() {
            return;
        }
        self.inner.open.set(open);
        self.inner.surface.set_open(open);
    }
}

// =============================================================================
// Active link
// =============================================================================

/// A navigation link that can be restyled.
pub trait NavLink {
    /// The raw `href` attribute, as written in the markup.
    fn href(&self) -> Option<String>;

    fn set_style(&self, property: &str, value: &str);
}

/// File name of the current page: the last segment of `pathname`, or the
/// default document when the path ends in `/` or is empty.
///
/// ```
/// use guidepost::nav::current_page;
/// assert_eq!(current_page("/guides/lisbon.html", "index.html"), "lisbon.html");
/// assert_eq!(current_page("/guides/", "index.html"), "index.html");
/// ```
pub fn current_page<'a>(pathname: &'a str, default_document: &'a str) -> &'a str {
    match pathname.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => default_document,
    }
}

/// Exact string comparison; no normalization of either side.
pub fn is_active_link(href: &str, page: &str) -> bool {
    href == page
}

/// CSS declarations applied to the active link.
pub fn active_link_style(cfg: &NavConfig) -> [(&'static str, String); 2] {
    let accent = cfg.accent();
    [
        ("color", accent.clone()),
        ("border-bottom", format!("{} {accent}", cfg.underline)),
    ]
}

/// Style every link pointing at the current page. Returns how many matched.
pub fn highlight_active_links<L: NavLink>(links: &[L], pathname: &str, cfg: &NavConfig) -> usize {
    let page = current_page(pathname, &cfg.default_document);
    let style = active_link_style(cfg);
    let mut matched = 0;
    for link in links {
        let Some(href) = link.href() else { continue };
        if is_active_link(&href, page) {
            for (property, value) in &style {
                link.set_style(property, value);
            }
            matched += 1;
        }
    }
    debug_log!("{matched} nav links match {page}");
    matched
}

// =============================================================================
// Smooth scroll
// =============================================================================

/// The selector to scroll to for an in-page anchor, if `href` is one.
///
/// A bare `#` has no target.
pub fn scroll_target(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}
