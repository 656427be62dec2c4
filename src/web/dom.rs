//! `web-sys` implementations of the view traits.
//!
//! Every selector and state class comes from [`Selectors`]. DOM calls that
//! fail (an invalid selector, a detached node) are logged and skipped: a
//! broken widget must not take the rest of the page down with it.

use crate::carousel::SlideSurface;
use crate::config::{BehaviorConfig, Selectors};
use crate::form::{Banner, Field, FormSurface};
use crate::nav::{MenuSurface, NavLink};
use crate::page::{Document, FormMarkup, SliderMarkup};
use crate::validate::FieldKind;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, NodeList,
};

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `querySelectorAll` on the document, empty on a bad selector.
pub(crate) fn query_all(document: &web_sys::Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => elements(list),
        Err(e) => {
            warn_log!("bad selector {selector:?}: {e:?}");
            Vec::new()
        }
    }
}

/// `querySelectorAll` scoped to `root`, empty on a bad selector.
pub(crate) fn query_within(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => elements(list),
        Err(e) => {
            warn_log!("bad selector {selector:?}: {e:?}");
            Vec::new()
        }
    }
}

fn query_first(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        warn_log!("class {class:?} not toggled: {e:?}");
    }
}

// =============================================================================
// Document
// =============================================================================

pub struct WebDocument {
    document: web_sys::Document,
    config: Rc<BehaviorConfig>,
}

impl WebDocument {
    pub fn new(document: web_sys::Document, config: Rc<BehaviorConfig>) -> Self {
        Self { document, config }
    }

    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }

    fn selectors(&self) -> &Selectors {
        &self.config.selectors
    }

    fn field(&self, element: Element) -> Option<WebField> {
        let element = element.dyn_into::<HtmlElement>().ok()?;
        let input_type = element
            .dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::type_)
            .unwrap_or_default();
        let kind = FieldKind::from_control(&element.tag_name(), &input_type);
        Some(WebField {
            document: self.document.clone(),
            element,
            kind,
            error_class: self.selectors().error_class.clone(),
            slot_class: self.selectors().error_message_class.clone(),
            active_class: self.selectors().active_class.clone(),
            slot: RefCell::new(None),
        })
    }
}

impl Document for WebDocument {
    type Slider = WebSlider;
    type Form = WebForm;
    type Menu = WebMenu;
    type Link = WebLink;

    fn sliders(&self) -> Vec<SliderMarkup<WebSlider>> {
        let sel = self.selectors();
        query_all(&self.document, &sel.slider)
            .into_iter()
            .map(|container| {
                let slides = query_within(&container, &sel.slider_item).len();
                let surface = WebSlider {
                    wrapper: query_first(&container, &sel.slider_wrapper)
                        .and_then(|w| w.dyn_into::<HtmlElement>().ok()),
                    dots: query_within(&container, &sel.slider_dot),
                    prev: query_first(&container, &sel.slider_prev),
                    next: query_first(&container, &sel.slider_next),
                    active_class: sel.active_class.clone(),
                };
                SliderMarkup { surface, slides }
            })
            .collect()
    }

    fn forms(&self) -> Vec<FormMarkup<WebForm>> {
        let sel = self.selectors();
        query_all(&self.document, &sel.form)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlFormElement>().ok())
            .map(|form| {
                let fields = query_within(&form, &sel.fields)
                    .into_iter()
                    .filter_map(|el| self.field(el))
                    .collect();
                let surface = WebForm {
                    document: self.document.clone(),
                    form,
                    banner_class: sel.success_message_class.clone(),
                    active_class: sel.active_class.clone(),
                };
                FormMarkup { surface, fields }
            })
            .collect()
    }

    fn menu(&self) -> Option<WebMenu> {
        let sel = self.selectors();
        let toggle = self.document.query_selector(&sel.menu_toggle).ok().flatten()?;
        let panel = self.document.query_selector(&sel.nav).ok().flatten();
        Some(WebMenu {
            toggle,
            panel,
            active_class: sel.active_class.clone(),
        })
    }

    fn nav_links(&self) -> Vec<WebLink> {
        query_all(&self.document, &self.selectors().nav_links)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .map(WebLink)
            .collect()
    }

    fn pathname(&self) -> String {
        self.document
            .location()
            .and_then(|l| l.pathname().ok())
            .unwrap_or_default()
    }
}

// =============================================================================
// Slider
// =============================================================================

pub struct WebSlider {
    wrapper: Option<HtmlElement>,
    dots: Vec<Element>,
    prev: Option<Element>,
    next: Option<Element>,
    active_class: String,
}

impl WebSlider {
    pub fn dots(&self) -> &[Element] {
        &self.dots
    }

    pub fn prev_button(&self) -> Option<&Element> {
        self.prev.as_ref()
    }

    pub fn next_button(&self) -> Option<&Element> {
        self.next.as_ref()
    }
}

impl SlideSurface for WebSlider {
    fn translate(&self, offset_percent: i64) {
        let Some(wrapper) = &self.wrapper else { return };
        let value = format!("translateX({offset_percent}%)");
        if let Err(e) = wrapper.style().set_property("transform", &value) {
            warn_log!("slider transform not set: {e:?}");
        }
    }

    fn dot_count(&self) -> usize {
        self.dots.len()
    }

    fn set_dot_active(&self, dot: usize, active: bool) {
        if let Some(el) = self.dots.get(dot) {
            set_class(el, &self.active_class, active);
        }
    }
}

// =============================================================================
// Form
// =============================================================================

pub struct WebField {
    document: web_sys::Document,
    element: HtmlElement,
    kind: FieldKind,
    error_class: String,
    slot_class: String,
    active_class: String,
    slot: RefCell<Option<Element>>,
}

impl WebField {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// The feedback slot, if one exists: the cached one, or an adjacent
    /// sibling already carrying the slot class.
    fn find_slot(&self) -> Option<Element> {
        if let Some(slot) = self.slot.borrow().as_ref() {
            return Some(slot.clone());
        }
        let sibling = self
            .element
            .next_element_sibling()
            .filter(|s| s.class_list().contains(&self.slot_class))?;
        *self.slot.borrow_mut() = Some(sibling.clone());
        Some(sibling)
    }

    fn create_slot(&self) -> Option<Element> {
        let slot = self.document.create_element("div").ok()?;
        slot.set_class_name(&self.slot_class);
        let parent = self.element.parent_node()?;
        if let Err(e) = parent.insert_before(&slot, self.element.next_sibling().as_ref()) {
            warn_log!("feedback slot not inserted: {e:?}");
            return None;
        }
        *self.slot.borrow_mut() = Some(slot.clone());
        Some(slot)
    }
}

impl Field for WebField {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn show_error(&self, message: &str) {
        set_class(&self.element, &self.error_class, true);
        let Some(slot) = self.find_slot().or_else(|| self.create_slot()) else {
            return;
        };
        slot.set_text_content(Some(message));
        set_class(&slot, &self.active_class, true);
    }

    fn clear_error(&self) {
        set_class(&self.element, &self.error_class, false);
        if let Some(slot) = self.find_slot() {
            set_class(&slot, &self.active_class, false);
        }
    }
}

pub struct WebForm {
    document: web_sys::Document,
    form: HtmlFormElement,
    banner_class: String,
    active_class: String,
}

impl WebForm {
    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }
}

pub struct WebBanner {
    element: Option<Element>,
    active_class: String,
}

impl Banner for WebBanner {
    fn hide(&self) {
        if let Some(el) = &self.element {
            set_class(el, &self.active_class, false);
        }
    }

    fn remove(&self) {
        if let Some(el) = &self.element {
            el.remove();
        }
    }
}

impl FormSurface for WebForm {
    type Field = WebField;
    type Banner = WebBanner;

    fn reset(&self) {
        self.form.reset();
    }

    fn show_banner(&self, message: &str) -> WebBanner {
        let element = self.document.create_element("div").ok().and_then(|div| {
            div.set_class_name(&format!("{} {}", self.banner_class, self.active_class));
            div.set_text_content(Some(message));
            match self.form.insert_before(&div, self.form.first_child().as_ref()) {
                Ok(_) => Some(div),
                Err(e) => {
                    warn_log!("banner not inserted: {e:?}");
                    None
                }
            }
        });
        WebBanner {
            element,
            active_class: self.active_class.clone(),
        }
    }
}

// =============================================================================
// Navigation
// =============================================================================

pub struct WebMenu {
    toggle: Element,
    panel: Option<Element>,
    active_class: String,
}

impl WebMenu {
    pub fn toggle_button(&self) -> &Element {
        &self.toggle
    }

    pub fn panel(&self) -> Option<&Element> {
        self.panel.as_ref()
    }
}

impl MenuSurface for WebMenu {
    fn is_open(&self) -> bool {
        self.toggle.class_list().contains(&self.active_class)
    }

    fn set_open(&self, open: bool) {
        set_class(&self.toggle, &self.active_class, open);
        if let Some(panel) = &self.panel {
            set_class(panel, &self.active_class, open);
        }
    }
}

pub struct WebLink(HtmlElement);

impl NavLink for WebLink {
    fn href(&self) -> Option<String> {
        self.0.get_attribute("href")
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.0.style().set_property(property, value) {
            warn_log!("style {property} not set: {e:?}");
        }
    }
}
