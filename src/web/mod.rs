//! Browser entry point.
//!
//! The bundle runs [`start`] as soon as it is instantiated. Nav highlighting
//! and smooth scrolling are wired right away; sliders, forms, and the menu
//! are mounted once the DOM is parsed (immediately, if it already is).
//!
//! Behavior can be tuned per page with an embedded JSON overlay:
//!
//! ```html
//! <script type="application/json" id="guidepost-config">
//!   { "banner": { "message": "Obrigado!" } }
//! </script>
//! ```

mod bootstrap;
mod dom;
mod listen;
mod scheduler;

pub use bootstrap::{anchor_target, wire_anchors};
pub use dom::{WebDocument, WebField, WebForm, WebLink, WebMenu, WebSlider};
pub use listen::{Listener, Listeners};
pub use scheduler::BrowserScheduler;

use crate::config::{self, BehaviorConfig};
use crate::host::Disposer;
use crate::page::{self, Page};
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Event;

/// Id of the optional config overlay element.
pub const CONFIG_ELEMENT_ID: &str = "guidepost-config";

#[derive(Error, Debug)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Read the page's config overlay. A missing element means stock defaults;
/// a malformed one is reported and also falls back to stock defaults.
pub fn page_config(document: &web_sys::Document) -> BehaviorConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return BehaviorConfig::default();
    };
    config::from_page_json(&text).unwrap_or_else(|e| {
        warn_log!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
        BehaviorConfig::default()
    })
}

/// Whether the document is still being parsed. `readyState` moves from
/// `loading` to `interactive` when DOMContentLoaded fires.
pub fn is_loading(document: &web_sys::Document) -> bool {
    document.ready_state() == "loading"
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let config = Rc::new(page_config(&document));
    let doc = WebDocument::new(document.clone(), Rc::clone(&config));

    page::highlight_nav(&doc, &config);
    let mut anchors = Listeners::default();
    bootstrap::wire_anchors(&document, &config.selectors, &mut anchors)?;
    anchors.into_disposer().forget();

    if is_loading(&document) {
        let on_ready = Closure::once(move |_: Event| {
            if let Err(e) = mount(&doc, window, &config) {
                error_log!("guidepost: {e}");
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        // Runs once on a page that never unloads.
        on_ready.forget();
    } else {
        mount(&doc, window, &config)?;
    }
    Ok(())
}

/// Boot every controller, attach its listeners, and keep both alive for the
/// life of the page.
fn mount(
    doc: &WebDocument,
    window: web_sys::Window,
    config: &BehaviorConfig,
) -> Result<(), WebError> {
    let page = Page::boot(doc, BrowserScheduler::new(window), config);
    let mut listeners = Listeners::default();
    if let Err(e) = bootstrap::wire_page(&page, &mut listeners) {
        page.disposer().dispose();
        return Err(e);
    }
    debug_log!("{} listeners attached", listeners.len());
    Disposer::all(vec![page.disposer(), listeners.into_disposer()]).forget();
    Ok(())
}
