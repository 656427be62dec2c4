//! Attaches DOM listeners to mounted controllers.

use super::WebError;
use super::dom::{WebDocument, query_all, query_within};
use super::listen::Listeners;
use super::scheduler::BrowserScheduler;
use crate::config::Selectors;
use crate::nav;
use crate::page::Page;
use web_sys::{Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// Wire prev/next buttons, dots, field blur, form submit, the menu toggle,
/// and links inside the menu panel.
pub fn wire_page(
    page: &Page<WebDocument, BrowserScheduler>,
    listeners: &mut Listeners,
) -> Result<(), WebError> {
    for carousel in &page.carousels {
        let view = carousel.view();
        if let Some(prev) = view.prev_button() {
            let c = carousel.clone();
            listeners.on(prev, "click", move |_| c.previous())?;
        }
        if let Some(next) = view.next_button() {
            let c = carousel.clone();
            listeners.on(next, "click", move |_| c.next())?;
        }
        for (i, dot) in view.dots().iter().enumerate() {
            let c = carousel.clone();
            listeners.on(dot, "click", move |_| c.go_to(i))?;
        }
    }

    for form in &page.forms {
        for (i, field) in form.fields().iter().enumerate() {
            let f = form.clone();
            listeners.on(field.element(), "blur", move |_| {
                f.blur(i);
            })?;
        }
        let f = form.clone();
        listeners.on(form.surface().element(), "submit", move |event: Event| {
            event.prevent_default();
            let outcome = f.submit();
            debug_log!("submit: {outcome:?}");
        })?;
    }

    if let Some(menu) = &page.menu {
        let m = menu.clone();
        listeners.on(menu.surface().toggle_button(), "click", move |_| m.toggle())?;
        if let Some(panel) = menu.surface().panel() {
            for link in query_within(panel, "a") {
                let m = menu.clone();
                listeners.on(&link, "click", move |_| m.close())?;
            }
        }
    }

    Ok(())
}

/// Every in-page anchor scrolls smoothly to its target instead of jumping.
pub fn wire_anchors(
    document: &web_sys::Document,
    selectors: &Selectors,
    listeners: &mut Listeners,
) -> Result<(), WebError> {
    for anchor in query_all(document, &selectors.anchors) {
        let doc = document.clone();
        let link = anchor.clone();
        listeners.on(&anchor, "click", move |event: Event| {
            event.prevent_default();
            let Some(href) = link.get_attribute("href") else { return };
            if let Some(target) = anchor_target(&doc, &href) {
                scroll_to(&target);
            }
        })?;
    }
    Ok(())
}

/// The element an in-page `href` points at. A bare `#`, a missing id, and a
/// fragment that is not a valid selector (`#1bad`) all resolve to nothing.
pub fn anchor_target(document: &web_sys::Document, href: &str) -> Option<Element> {
    let selector = nav::scroll_target(href)?;
    match document.query_selector(selector) {
        Ok(found) => found,
        Err(e) => {
            debug_log!("no scroll target for {href}: {e:?}");
            None
        }
    }
}

fn scroll_to(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
