//! Behavior configuration.
//!
//! Every timing, message, and selector the controllers use comes from a
//! [`BehaviorConfig`]. Stock defaults reproduce the site's shipped behavior;
//! a `guidepost.toml` (for the CLI) or a JSON blob embedded in the page (for
//! the browser) overrides only the keys it names.
//!
//! ## Page-Embedded Overrides
//!
//! ```html
//! <script type="application/json" id="guidepost-config">
//!   { "carousel": { "interval_ms": 8000 } }
//! </script>
//! ```
//!
//! The blob is merged over stock defaults exactly like a TOML overlay, so a
//! page names only what it changes. Unknown keys are rejected.
//!
//! ## Configuration Options
//!
//! ```toml
//! [carousel]
//! interval_ms = 5000         # Auto-advance period; manual navigation restarts it
//!
//! [banner]
//! message = "Thank you! We will get back to you soon."
//! hide_after_ms = 3000       # Banner loses `active` after this long
//! fade_ms = 300              # ...and is removed from the page this long after
//!
//! [validation]
//! min_length = 8             # Passwords and text areas
//! phone_min_length = 10
//! date_policy = "timestamp"  # or "calendar"
//!
//! [nav]
//! default_document = "index.html"
//! accent_var = "--primary-color"
//! underline = "2px solid"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything the controllers can be tuned with.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    pub carousel: CarouselConfig,
    pub banner: BannerConfig,
    pub validation: ValidationConfig,
    pub nav: NavConfig,
    pub selectors: Selectors,
}

impl BehaviorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be greater than 0".into(),
            ));
        }
        if self.validation.min_length == 0 {
            return Err(ConfigError::Validation(
                "validation.min_length must be greater than 0".into(),
            ));
        }
        if self.validation.phone_min_length == 0 {
            return Err(ConfigError::Validation(
                "validation.phone_min_length must be greater than 0".into(),
            ));
        }
        if self.nav.default_document.is_empty() {
            return Err(ConfigError::Validation(
                "nav.default_document must not be empty".into(),
            ));
        }
        if !self.nav.accent_var.starts_with("--") {
            return Err(ConfigError::Validation(format!(
                "nav.accent_var must be a CSS custom property (got {:?})",
                self.nav.accent_var
            )));
        }
        if let Some(name) = self.selectors.first_empty() {
            return Err(ConfigError::Validation(format!(
                "selectors.{name} must not be empty"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Auto-advance period in milliseconds.
    pub interval_ms: u64,
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

/// Success banner shown after a form passes validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    pub message: String,
    /// Delay before the banner loses its `active` class.
    pub hide_after_ms: u64,
    /// Delay between hiding and removal, reserved for the fade-out transition.
    pub fade_ms: u64,
}

impl BannerConfig {
    pub fn hide_after(&self) -> Duration {
        Duration::from_millis(self.hide_after_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            message: "Thank you! We will get back to you soon.".to_string(),
            hide_after_ms: 3000,
            fade_ms: 300,
        }
    }
}

/// How a `date` field is compared with the current moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// The date is read as midnight UTC and compared with the full current
    /// timestamp. Today is rejected once midnight UTC has passed.
    #[default]
    Timestamp,
    /// The date is compared with today's local calendar date. Today passes.
    Calendar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Minimum length for passwords and text areas, in UTF-16 code units.
    pub min_length: usize,
    /// Minimum length of a phone number, counting separators.
    pub phone_min_length: usize,
    pub date_policy: DatePolicy,
    pub messages: Messages,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            phone_min_length: 10,
            date_policy: DatePolicy::default(),
            messages: Messages::default(),
        }
    }
}

/// Inline messages shown under invalid fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Messages {
    pub required: String,
    pub email: String,
    pub phone: String,
    pub future_date: String,
    /// `{min}` is replaced by `validation.min_length`.
    pub min_length: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "This field is required".to_string(),
            email: "Please enter a valid email address".to_string(),
            phone: "Please enter a valid phone number".to_string(),
            future_date: "Please select a future date".to_string(),
            min_length: "Minimum {min} characters required".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Page a bare directory URL resolves to.
    pub default_document: String,
    /// CSS custom property holding the site's accent color.
    pub accent_var: String,
    /// Border shorthand (minus the color) used to underline the active link.
    pub underline: String,
}

impl NavConfig {
    /// `var(--primary-color)`, ready for a style declaration.
    pub fn accent(&self) -> String {
        format!("var({})", self.accent_var)
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            default_document: "index.html".to_string(),
            accent_var: "--primary-color".to_string(),
            underline: "2px solid".to_string(),
        }
    }
}

/// Structural contract: where each piece of markup is found and which classes
/// mark its states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub menu_toggle: String,
    pub nav: String,
    pub nav_links: String,
    pub slider: String,
    pub slider_wrapper: String,
    pub slider_item: String,
    pub slider_dot: String,
    pub slider_prev: String,
    pub slider_next: String,
    pub form: String,
    pub fields: String,
    pub anchors: String,
    pub active_class: String,
    pub error_class: String,
    pub error_message_class: String,
    pub success_message_class: String,
}

impl Selectors {
    fn first_empty(&self) -> Option<&'static str> {
        [
            ("menu_toggle", &self.menu_toggle),
            ("nav", &self.nav),
            ("nav_links", &self.nav_links),
            ("slider", &self.slider),
            ("slider_wrapper", &self.slider_wrapper),
            ("slider_item", &self.slider_item),
            ("slider_dot", &self.slider_dot),
            ("slider_prev", &self.slider_prev),
            ("slider_next", &self.slider_next),
            ("form", &self.form),
            ("fields", &self.fields),
            ("anchors", &self.anchors),
            ("active_class", &self.active_class),
            ("error_class", &self.error_class),
            ("error_message_class", &self.error_message_class),
            ("success_message_class", &self.success_message_class),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_toggle: ".menu-toggle".to_string(),
            nav: "nav".to_string(),
            nav_links: "nav a".to_string(),
            slider: ".slider-container".to_string(),
            slider_wrapper: ".slider-wrapper".to_string(),
            slider_item: ".slider-item".to_string(),
            slider_dot: ".slider-dot".to_string(),
            slider_prev: ".slider-prev".to_string(),
            slider_next: ".slider-next".to_string(),
            form: "form".to_string(),
            fields: "input, textarea, select".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            active_class: "active".to_string(),
            error_class: "error".to_string(),
            error_message_class: "error-message".to_string(),
            success_message_class: "success-message".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BehaviorConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BehaviorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BehaviorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a `guidepost.toml`, falling back to stock defaults when
/// the file is absent.
pub fn load_config(path: &Path) -> Result<BehaviorConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(path)?)
}

/// Resolve config from the JSON blob a page embeds.
///
/// JSON objects map onto TOML tables one-to-one, so the blob goes through the
/// same merge as a file overlay. JSON `null` is not representable in TOML and
/// is rejected.
pub fn from_page_json(json: &str) -> Result<BehaviorConfig, ConfigError> {
    if json.trim().is_empty() {
        return resolve_config(stock_defaults_value()?, None);
    }
    let raw: serde_json::Value = serde_json::from_str(json)?;
    let overlay = toml::Value::try_from(raw).map_err(|e| {
        ConfigError::Validation(format!("page config is not representable as TOML: {e}"))
    })?;
    resolve_config(stock_defaults_value()?, Some(overlay))
}

/// Returns a fully-commented stock `guidepost.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Guidepost Configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Each file only needs the keys it wants to override. Unknown keys are errors.
#
# The same structure, as JSON, can be embedded in a page:
#   <script type="application/json" id="guidepost-config">{ ... }</script>

# ---------------------------------------------------------------------------
# Carousel
# ---------------------------------------------------------------------------
[carousel]
# Auto-advance period. Clicking prev/next or a dot restarts the countdown.
interval_ms = 5000

# ---------------------------------------------------------------------------
# Success banner
# ---------------------------------------------------------------------------
[banner]
message = "Thank you! We will get back to you soon."
# The banner loses its `active` class after this long...
hide_after_ms = 3000
# ...and is removed this long after that (time for the CSS fade-out).
fade_ms = 300

# ---------------------------------------------------------------------------
# Field validation
# ---------------------------------------------------------------------------
[validation]
# Minimum length for password fields and text areas.
min_length = 8
# Minimum length for phone numbers (digits, spaces, + - ( ) all count).
phone_min_length = 10
# "timestamp": a date is read as midnight UTC and must not be earlier than
#              the current moment (today is rejected once midnight UTC passed).
# "calendar":  a date must not be earlier than today's local date.
date_policy = "timestamp"

[validation.messages]
required = "This field is required"
email = "Please enter a valid email address"
phone = "Please enter a valid phone number"
future_date = "Please select a future date"
# {min} is replaced by min_length above.
min_length = "Minimum {min} characters required"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# Page a URL ending in "/" resolves to when matching nav links.
default_document = "index.html"
# CSS custom property with the accent color for the active link.
accent_var = "--primary-color"
# Border shorthand (color is appended) for the active link underline.
underline = "2px solid"

# ---------------------------------------------------------------------------
# Markup contract
# ---------------------------------------------------------------------------
[selectors]
menu_toggle = ".menu-toggle"
nav = "nav"
nav_links = "nav a"
slider = ".slider-container"
slider_wrapper = ".slider-wrapper"
slider_item = ".slider-item"
slider_dot = ".slider-dot"
slider_prev = ".slider-prev"
slider_next = ".slider-next"
form = "form"
fields = "input, textarea, select"
anchors = 'a[href^="#"]'
active_class = "active"
error_class = "error"
error_message_class = "error-message"
success_message_class = "success-message"
"##
}
