//! Field validation.
//!
//! [`Validator::check`] is a pure function of a field's kind, its raw value,
//! and the current moment. It never touches the page; the form controller
//! applies the verdict.
//!
//! ## Rules
//!
//! Evaluated in order on the trimmed value, first match wins:
//!
//! | # | Applies to | Fails when | Violation |
//! |---|------------|------------|-----------|
//! | 1 | every field | value is empty | [`Violation::Required`] |
//! | 2 | `email` | not `^[^\s@]+@[^\s@]+\.[^\s@]+$` | [`Violation::Email`] |
//! | 3 | `tel` | not `^[0-9\-+\s()]{10,}$` | [`Violation::Phone`] |
//! | 4 | `date` | date is before now (see [`DatePolicy`]) | [`Violation::PastDate`] |
//! | 5 | `password`, text areas | shorter than `min_length` UTF-16 units | [`Violation::TooShort`] |
//!
//! Trimming and the `\s` in rules 2 and 3 use the browser's whitespace set,
//! which includes U+FEFF and excludes U+0085.
//!
//! Lengths are counted in UTF-16 code units because that is what the browser's
//! `minlength` and `value.length` count; an emoji is two units.
//!
//! A `date` value that does not parse is never rejected by rule 4. Date inputs
//! only ever produce `YYYY-MM-DD` or an empty string, and the empty string is
//! already caught by rule 1.

use crate::config::{DatePolicy, ValidationConfig};
use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;

/// What kind of control a field is, as far as validation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Password,
    TextArea,
    Other,
}

impl FieldKind {
    /// Classify a control from its tag name and `type` property.
    ///
    /// Tag names compare case-insensitively (`TEXTAREA` from the DOM,
    /// `textarea` from markup). Inputs without a recognized type fall back to
    /// [`FieldKind::Other`], except the explicit `text` type.
    pub fn from_control(tag_name: &str, input_type: &str) -> Self {
        if tag_name.eq_ignore_ascii_case("textarea") {
            return FieldKind::TextArea;
        }
        match input_type.to_ascii_lowercase().as_str() {
            "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "date" => FieldKind::Date,
            "password" => FieldKind::Password,
            "textarea" => FieldKind::TextArea,
            _ => FieldKind::Other,
        }
    }

    /// Parse a kind name as used on the CLI.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(FieldKind::Text),
            "email" => Some(FieldKind::Email),
            "tel" | "phone" => Some(FieldKind::Tel),
            "date" => Some(FieldKind::Date),
            "password" => Some(FieldKind::Password),
            "textarea" => Some(FieldKind::TextArea),
            "other" => Some(FieldKind::Other),
            _ => None,
        }
    }

    fn needs_min_length(self) -> bool {
        matches!(self, FieldKind::Password | FieldKind::TextArea)
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    Email,
    Phone,
    PastDate,
    TooShort,
}

pub type Verdict = Result<(), Violation>;

/// Browser whitespace as a regex class body: the line terminators, the
/// explicit format characters, and every `Zs` space.
const BROWSER_SPACE: &str = r"\t\n\x0B\x0C\r\x{FEFF}\x{2028}\x{2029}\p{Zs}";

/// Placeholder in the `min_length` message replaced by the configured minimum.
pub const MIN_PLACEHOLDER: &str = "{min}";

/// Compiled validation rules plus the messages to show for each violation.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
    email: Regex,
    phone: Regex,
    too_short: String,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        let email = Regex::new(&format!(
            r"^[^@{BROWSER_SPACE}]+@[^@{BROWSER_SPACE}]+\.[^@{BROWSER_SPACE}]+$"
        ))
        .expect("email pattern is valid");
        let phone = Regex::new(&format!(r"^[0-9\-+(){BROWSER_SPACE}]+$"))
            .expect("phone pattern is valid");
        let too_short = config
            .messages
            .min_length
            .replace(MIN_PLACEHOLDER, &config.min_length.to_string());
        Self {
            config,
            email,
            phone,
            too_short,
        }
    }

    /// Judge one field's current value.
    pub fn check(&self, kind: FieldKind, raw: &str, now: DateTime<FixedOffset>) -> Verdict {
        let value = raw.trim_matches(is_browser_space);
        if value.is_empty() {
            return Err(Violation::Required);
        }
        match kind {
            FieldKind::Email if !self.email.is_match(value) => Err(Violation::Email),
            FieldKind::Tel if !self.is_phone(value) => Err(Violation::Phone),
            FieldKind::Date if self.is_past(value, now) => Err(Violation::PastDate),
            k if k.needs_min_length() && utf16_len(value) < self.config.min_length => {
                Err(Violation::TooShort)
            }
            _ => Ok(()),
        }
    }

    /// The inline message for a violation.
    pub fn message(&self, violation: Violation) -> &str {
        let m = &self.config.messages;
        match violation {
            Violation::Required => &m.required,
            Violation::Email => &m.email,
            Violation::Phone => &m.phone,
            Violation::PastDate => &m.future_date,
            Violation::TooShort => &self.too_short,
        }
    }

    /// Only separators and digits, and at least `phone_min_length` of them
    /// counting the separators.
    fn is_phone(&self, value: &str) -> bool {
        self.phone.is_match(value) && value.chars().count() >= self.config.phone_min_length
    }

    fn is_past(&self, value: &str, now: DateTime<FixedOffset>) -> bool {
        let Some(date) = parse_date(value) else {
            return false;
        };
        match self.config.date_policy {
            DatePolicy::Timestamp => date.instant < now,
            DatePolicy::Calendar => date.calendar < now.date_naive(),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

struct ParsedDate {
    instant: DateTime<FixedOffset>,
    calendar: NaiveDate,
}

/// Date-only values are midnight UTC; full RFC 3339 timestamps keep their
/// own offset.
fn parse_date(value: &str) -> Option<ParsedDate> {
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let instant = day.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset();
        return Some(ParsedDate {
            instant,
            calendar: day,
        });
    }
    DateTime::parse_from_rfc3339(value).ok().map(|instant| ParsedDate {
        instant,
        calendar: instant.date_naive(),
    })
}

/// `String.prototype.trim`'s notion of whitespace.
fn is_browser_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{B}'
            | '\u{C}'
            | '\r'
            | '\u{FEFF}'
            | '\u{2028}'
            | '\u{2029}'
    ) || is_space_separator(c)
}

/// Unicode category `Zs`.
fn is_space_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
