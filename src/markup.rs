//! HTML rendering of the markup contract.
//!
//! The browser bundle only attaches to markup shaped the way these functions
//! render it: a `.slider-container` holding a `.slider-wrapper` of
//! `.slider-item`s with optional `.slider-dot`s and prev/next buttons, a
//! `.menu-toggle` beside a `nav`, and plain forms. Rendering it here gives the
//! CLI `demo` command and the browser tests one shared source of truth.
//!
//! Class names are the stock ones. A page that overrides `[selectors]` has to
//! render its own markup.

use crate::config::BehaviorConfig;
use crate::validate::FieldKind;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CSS: &str = include_str!("../static/demo.css");

/// File name wasm-pack gives the JS glue for this crate.
pub const BUNDLE_ENTRY: &str = "guidepost.js";

#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no guidepost.js in bundle directory {}", .0.display())]
    MissingBundle(PathBuf),
}

pub struct Slide<'a> {
    pub title: &'a str,
    pub caption: &'a str,
}

pub struct FormField<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub kind: FieldKind,
}

/// A carousel. `dots` renders one dot per slide; `controls` renders the
/// prev/next buttons.
pub fn slider(slides: &[Slide], dots: bool, controls: bool) -> Markup {
    html! {
        div.slider-container {
            div.slider-wrapper {
                @for slide in slides {
                    div.slider-item {
                        h3 { (slide.title) }
                        p { (slide.caption) }
                    }
                }
            }
            @if controls {
                button.slider-prev type="button" aria-label="Previous slide" { "‹" }
                button.slider-next type="button" aria-label="Next slide" { "›" }
            }
            @if dots {
                div.slider-dots {
                    @for i in 0..slides.len() {
                        button.slider-dot type="button" aria-label=(format!("Slide {}", i + 1)) {}
                    }
                }
            }
        }
    }
}

/// The menu toggle and the nav panel it opens. `links` are `(href, label)`.
pub fn menu(links: &[(&str, &str)]) -> Markup {
    html! {
        button.menu-toggle type="button" aria-label="Menu" { "☰" }
        nav {
            ul {
                @for (href, label) in links {
                    li { a href=(href) { (label) } }
                }
            }
        }
    }
}

fn control(field: &FormField) -> Markup {
    let input_type = match field.kind {
        FieldKind::TextArea => {
            return html! { textarea id=(field.name) name=(field.name) rows="4" {} };
        }
        FieldKind::Text => "text",
        FieldKind::Email => "email",
        FieldKind::Tel => "tel",
        FieldKind::Date => "date",
        FieldKind::Password => "password",
        FieldKind::Other => "number",
    };
    html! { input id=(field.name) name=(field.name) type=(input_type); }
}

/// A form with one labelled control per field. Validation is left entirely
/// to the bundle, so the controls carry no `required` attributes.
pub fn contact_form(fields: &[FormField]) -> Markup {
    html! {
        form novalidate {
            @for field in fields {
                label for=(field.name) { (field.label) }
                (control(field))
            }
            button type="submit" { "Send" }
        }
    }
}

/// The JSON overlay element read at startup.
pub fn config_script(config: &BehaviorConfig) -> Result<Markup, MarkupError> {
    // `</` would close the script element early.
    let json = serde_json::to_string(config)?.replace("</", "<\\/");
    Ok(html! {
        script type="application/json" id="guidepost-config" { (PreEscaped(json)) }
    })
}

/// The two demo pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoPage {
    Home,
    About,
}

impl DemoPage {
    pub const ALL: [DemoPage; 2] = [DemoPage::Home, DemoPage::About];

    pub fn file_name(self) -> &'static str {
        match self {
            DemoPage::Home => "index.html",
            DemoPage::About => "about.html",
        }
    }

    fn title(self) -> &'static str {
        match self {
            DemoPage::Home => "Wanderlust Guides",
            DemoPage::About => "About Wanderlust",
        }
    }
}

const NAV: [(&str, &str); 3] = [
    ("index.html", "Home"),
    ("about.html", "About"),
    ("#contact", "Contact"),
];

const DESTINATIONS: [Slide<'static>; 3] = [
    Slide { title: "Lisbon", caption: "Trams, tiles, and custard tarts." },
    Slide { title: "Kyoto", caption: "Temples at dawn, tea by afternoon." },
    Slide { title: "Cusco", caption: "Gateway to the Sacred Valley." },
];

const TEAM: [Slide<'static>; 2] = [
    Slide { title: "Our guides", caption: "Locals in every city we cover." },
    Slide { title: "Our promise", caption: "No tourist traps, ever." },
];

fn home_content() -> Markup {
    let fields = [
        FormField { name: "name", label: "Name", kind: FieldKind::Text },
        FormField { name: "email", label: "Email", kind: FieldKind::Email },
        FormField { name: "message", label: "Message", kind: FieldKind::TextArea },
    ];
    html! {
        section id="destinations" {
            h2 { "Destinations" }
            (slider(&DESTINATIONS, true, true))
            p { a href="#contact" { "Plan a trip" } }
        }
        section id="contact" {
            h2 { "Contact" }
            (contact_form(&fields))
        }
    }
}

fn about_content() -> Markup {
    let fields = [
        FormField { name: "phone", label: "Phone", kind: FieldKind::Tel },
        FormField { name: "travel-date", label: "Travel date", kind: FieldKind::Date },
        FormField { name: "password", label: "Password", kind: FieldKind::Password },
    ];
    html! {
        section id="team" {
            h2 { "Who we are" }
            (slider(&TEAM, true, false))
            (slider(&DESTINATIONS, false, true))
        }
        section id="contact" {
            h2 { "Book a call" }
            (contact_form(&fields))
        }
    }
}

/// A full demo page exercising every contract element. `bundle` is the
/// directory, relative to the page, holding the wasm-pack output.
pub fn demo_page(
    page: DemoPage,
    config: &BehaviorConfig,
    bundle: &str,
) -> Result<Markup, MarkupError> {
    let loader = format!("import init from './{bundle}/{BUNDLE_ENTRY}';\ninit();");
    let content = match page {
        DemoPage::Home => home_content(),
        DemoPage::About => about_content(),
    };
    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title()) }
                style { (PreEscaped(CSS)) }
                (config_script(config)?)
            }
            body {
                header {
                    strong { "Wanderlust" }
                    (menu(&NAV))
                }
                main { (content) }
                script type="module" { (PreEscaped(loader)) }
            }
        }
    })
}

/// Write both demo pages into `output`, copying a wasm-pack bundle into
/// `output/pkg` when one is given. Returns the written pages.
pub fn write_demo(
    output: &Path,
    config: &BehaviorConfig,
    bundle_dir: Option<&Path>,
) -> Result<Vec<PathBuf>, MarkupError> {
    if let Some(dir) = bundle_dir
        && !dir.join(BUNDLE_ENTRY).is_file()
    {
        return Err(MarkupError::MissingBundle(dir.to_path_buf()));
    }

    fs::create_dir_all(output)?;
    let mut written = Vec::new();
    for page in DemoPage::ALL {
        let path = output.join(page.file_name());
        fs::write(&path, demo_page(page, config, "pkg")?.into_string())?;
        written.push(path);
    }

    if let Some(dir) = bundle_dir {
        let pkg = output.join("pkg");
        fs::create_dir_all(&pkg)?;
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::copy(entry.path(), pkg.join(entry.file_name()))?;
            }
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn slider_renders_one_dot_per_slide() {
        let html = slider(&DESTINATIONS, true, true).into_string();
        assert_eq!(count(&html, "class=\"slider-item\""), 3);
        assert_eq!(count(&html, "class=\"slider-dot\""), 3);
        assert!(html.contains("class=\"slider-prev\""));
        assert!(html.contains("class=\"slider-next\""));
    }

    #[test]
    fn slider_without_dots_or_controls() {
        let html = slider(&TEAM, false, false).into_string();
        assert_eq!(count(&html, "class=\"slider-item\""), 2);
        assert!(!html.contains("slider-dot"));
        assert!(!html.contains("slider-prev"));
    }

    #[test]
    fn slide_text_is_escaped() {
        let html = slider(&[Slide { title: "<b>", caption: "&" }], false, false).into_string();
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("&amp;"));
    }

    #[test]
    fn menu_renders_toggle_and_links() {
        let html = menu(&NAV).into_string();
        assert!(html.starts_with("<button class=\"menu-toggle\""));
        assert!(html.contains("<a href=\"about.html\">About</a>"));
    }

    #[test]
    fn form_controls_follow_field_kind() {
        let fields = [
            FormField { name: "email", label: "Email", kind: FieldKind::Email },
            FormField { name: "msg", label: "Message", kind: FieldKind::TextArea },
        ];
        let html = contact_form(&fields).into_string();
        assert!(html.contains("type=\"email\""));
        assert!(html.contains("<textarea id=\"msg\""));
        assert!(html.contains("novalidate"));
    }

    // =========================================================================
    // Config script
    // =========================================================================

    #[test]
    fn config_script_round_trips() {
        let mut config = BehaviorConfig::default();
        config.carousel.interval_ms = 1234;
        let html = config_script(&config).unwrap().into_string();
        let start = html.find('>').unwrap() + 1;
        let end = html.rfind("</script>").unwrap();
        let parsed = crate::config::from_page_json(&html[start..end]).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn config_script_cannot_close_early() {
        let mut config = BehaviorConfig::default();
        config.banner.message = "</script><script>alert(1)".into();
        let html = config_script(&config).unwrap().into_string();
        assert_eq!(count(&html, "</script>"), 1);
    }

    // =========================================================================
    // Demo pages
    // =========================================================================

    #[test]
    fn home_page_has_every_contract_element() {
        let html = demo_page(DemoPage::Home, &BehaviorConfig::default(), "pkg")
            .unwrap()
            .into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        for class in ["menu-toggle", "slider-container", "slider-wrapper", "slider-dot"] {
            assert!(html.contains(class), "missing {class}");
        }
        assert!(html.contains("href=\"#contact\""));
        assert!(html.contains("import init from './pkg/guidepost.js'"));
        assert!(html.contains("--primary-color"));
    }

    #[test]
    fn about_page_has_two_sliders() {
        let html = demo_page(DemoPage::About, &BehaviorConfig::default(), "pkg")
            .unwrap()
            .into_string();
        assert_eq!(count(&html, "class=\"slider-container\""), 2);
        assert!(html.contains("type=\"tel\""));
        assert!(html.contains("type=\"date\""));
    }

    #[test]
    fn write_demo_writes_both_pages() {
        let tmp = tempfile::TempDir::new().unwrap();
        let written = write_demo(tmp.path(), &BehaviorConfig::default(), None).unwrap();
        assert_eq!(written.len(), 2);
        assert!(tmp.path().join("index.html").is_file());
        assert!(tmp.path().join("about.html").is_file());
        assert!(!tmp.path().join("pkg").exists());
    }

    #[test]
    fn write_demo_copies_bundle() {
        let bundle = tempfile::TempDir::new().unwrap();
        fs::write(bundle.path().join(BUNDLE_ENTRY), "export default function init() {}").unwrap();
        fs::write(bundle.path().join("guidepost_bg.wasm"), [0u8, 97, 115, 109]).unwrap();

        let out = tempfile::TempDir::new().unwrap();
        write_demo(out.path(), &BehaviorConfig::default(), Some(bundle.path())).unwrap();
        assert!(out.path().join("pkg").join(BUNDLE_ENTRY).is_file());
        assert!(out.path().join("pkg/guidepost_bg.wasm").is_file());
    }

    #[test]
    fn write_demo_rejects_bundle_without_entry() {
        let bundle = tempfile::TempDir::new().unwrap();
        let out = tempfile::TempDir::new().unwrap();
        let err = write_demo(out.path(), &BehaviorConfig::default(), Some(bundle.path()));
        assert!(matches!(err, Err(MarkupError::MissingBundle(_))));
        assert!(!out.path().join("index.html").exists());
    }
}
