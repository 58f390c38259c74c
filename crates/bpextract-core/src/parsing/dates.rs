use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use std::fmt::Write;

/// Whether `format` is a strftime string chrono understands.
pub fn is_valid_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Parse the report's date and time columns as one timestamp.
///
/// The two parts are joined with a single space, so the input format must
/// cover both, e.g. `%d %B, %y %H:%M` for "25 June, 25 14:30".
///
/// chrono's `%B` also accepts abbreviated month names, and `%y` maps
/// 00-69 to 2000-2069 and 70-99 to 1970-1999.
pub fn parse_timestamp(date: &str, time: &str, format: &str) -> Option<NaiveDateTime> {
    let text = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&text, format).ok()
}

/// Render a timestamp, returning None if the format needs data a naive
/// timestamp does not carry (a time zone, for instance).
pub fn format_timestamp(ts: &NaiveDateTime, format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", ts.format(format)).ok()?;
    Some(out)
}
