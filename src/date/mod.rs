//! Date token recognition
//!
//! Provides:
//! - [`DateFormat`]: moment-style format strings (`YYYY-MM-DD`, `MMMM Do, YYYY`)
//! - [`recognize`]: strict single-token recognition
//! - Calendar value helpers for the native picker control, which always
//!   speaks ISO `YYYY-MM-DD` whatever the document format is

mod format;

pub use format::{DateFormat, FormatItem, FormatToken};

use chrono::NaiveDate;

/// Format used when the settings do not specify one
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// `chrono` pattern of the picker control's value
pub const CALENDAR_FORMAT: &str = "%Y-%m-%d";

/// Decide whether `text` is exactly a date in `format`.
///
/// Non-matches are an expected outcome and return `None`.
pub fn recognize(text: &str, format: &DateFormat) -> Option<NaiveDate> {
    format.parse_strict(text)
}

/// Render a date as the picker control's value
pub fn calendar_value(date: NaiveDate) -> String {
    date.format(CALENDAR_FORMAT).to_string()
}

/// Parse the picker control's value. Empty or malformed values yield `None`.
pub fn parse_calendar_value(value: &str) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value.trim(), CALENDAR_FORMAT).ok()
}
