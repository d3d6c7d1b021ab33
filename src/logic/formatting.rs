//! Formatting and display logic
//!
//! Pure functions for the optional size/date column of a listing row.

use chrono::{DateTime, Local, TimeZone};
use std::time::SystemTime;

/// Format a byte count the way the listing shows it
///
/// # Examples
/// ```
/// use filepick::logic::formatting::format_size;
///
/// assert_eq!(format_size(0), "0 b");
/// assert_eq!(format_size(512), "512 b");
/// assert_eq!(format_size(1536), "1.50 k");
/// assert_eq!(format_size(5 * 1024 * 1024), "5.00 M");
/// ```
pub fn format_size(size: u64) -> String {
    const K: u64 = 1024;
    const M: u64 = K * 1024;
    const G: u64 = M * 1024;

    if size >= G {
        format!("{:.2} G", size as f64 / G as f64)
    } else if size >= M {
        format!("{:.2} M", size as f64 / M as f64)
    } else if size >= K {
        format!("{:.2} k", size as f64 / K as f64)
    } else {
        format!("{} b", size)
    }
}

/// Format a timestamp as `dd.MM.yy HH:mm`
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%d.%m.%y %H:%M").to_string()
}

/// Build the metadata string for a row: size (files only) followed by the
/// local modification time. Returns `None` when there is nothing to show.
pub fn entry_metadata(size: Option<u64>, modified: Option<SystemTime>) -> Option<String> {
    let date = modified.map(|t| format_timestamp(&DateTime::<Local>::from(t)));
    match (size.map(format_size), date) {
        (Some(size), Some(date)) => Some(format!("{} {}", size, date)),
        (Some(size), None) => Some(size),
        (None, Some(date)) => Some(date),
        (None, None) => None,
    }
}
