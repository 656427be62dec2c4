//! CLI output formatting.
//!
//! Each command has a `format_*` function returning display lines, which keeps
//! formatting testable without capturing stdout, and a `print_*` wrapper.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! email "user@example"
//!     invalid: Please enter a valid email address
//! ```
//!
//! ## Demo
//!
//! ```text
//! Demo → dist
//!     index.html
//!     about.html
//!     pkg/ (wasm bundle)
//! ```

use crate::config::BehaviorConfig;
use crate::validate::{FieldKind, Verdict};
use std::path::{Path, PathBuf};

/// Values longer than this are shortened in check output.
const VALUE_DISPLAY_MAX: usize = 40;

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Shorten `text` to `max` characters, appending `...` if shortened.
fn truncate_value(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Email => "email",
        FieldKind::Tel => "tel",
        FieldKind::Date => "date",
        FieldKind::Password => "password",
        FieldKind::TextArea => "textarea",
        FieldKind::Other => "other",
    }
}

// ============================================================================
// check
// ============================================================================

/// `message` is the text the page would show for the verdict's violation.
pub fn format_check_output(
    kind: FieldKind,
    value: &str,
    verdict: Verdict,
    message: Option<&str>,
) -> Vec<String> {
    let shown = if kind == FieldKind::Password {
        "*".repeat(value.chars().count().min(VALUE_DISPLAY_MAX))
    } else {
        truncate_value(value, VALUE_DISPLAY_MAX)
    };
    let status = match (verdict, message) {
        (Ok(()), _) => "valid".to_string(),
        (Err(_), Some(msg)) => format!("invalid: {msg}"),
        (Err(v), None) => format!("invalid: {v:?}"),
    };
    vec![
        format!("{} {:?}", kind_label(kind), shown),
        format!("{}{}", indent(1), status),
    ]
}

pub fn print_check_output(kind: FieldKind, value: &str, verdict: Verdict, message: Option<&str>) {
    for line in format_check_output(kind, value, verdict, message) {
        println!("{}", line);
    }
}

// ============================================================================
// show-config
// ============================================================================

/// The resolved config as the JSON a page would embed.
pub fn format_config_json(config: &BehaviorConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

// ============================================================================
// demo
// ============================================================================

pub fn format_demo_output(output: &Path, pages: &[PathBuf], bundled: bool) -> Vec<String> {
    let mut lines = vec![format!("Demo \u{2192} {}", output.display())];
    for page in pages {
        let shown = page.strip_prefix(output).unwrap_or(page);
        lines.push(format!("{}{}", indent(1), shown.display()));
    }
    if bundled {
        lines.push(format!("{}pkg/ (wasm bundle)", indent(1)));
    } else {
        lines.push(format!(
            "{}no bundle copied; build one with `wasm-pack build --target web` and pass --bundle pkg",
            indent(1)
        ));
    }
    lines
}

pub fn print_demo_output(output: &Path, pages: &[PathBuf], bundled: bool) {
    for line in format_demo_output(output, pages, bundled) {
        println!("{}", line);
    }
}
