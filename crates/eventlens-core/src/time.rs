//! Timestamp parsing and display formatting.
//!
//! All timestamps are carried as integer milliseconds since epoch and
//! rendered as `YYYY/MM/DD HH:mm:ss.mmm`. Naive date strings (no offset) are
//! interpreted as UTC so normalization stays deterministic across machines.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Epoch values at or below this are seconds; above, milliseconds.
const MAX_EPOCH_SECONDS: i64 = 9_999_999_999;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d",
];

/// Parse a date/time string into epoch milliseconds. Accepts RFC 3339 and a
/// handful of common naive formats; returns `None` for anything else.
pub fn parse_datetime(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
        }
    }
    None
}

/// Interpret a numeric epoch as seconds or milliseconds by magnitude.
/// Spreadsheet exports carry either; anything ≤ 9 999 999 999 is seconds.
pub fn parse_epoch(value: f64) -> i64 {
    if value <= MAX_EPOCH_SECONDS as f64 {
        (value * 1000.0) as i64
    } else {
        value as i64
    }
}

/// Nanosecond decimal string (log-store export timestamps) to milliseconds,
/// floored.
pub fn nanos_str_to_millis(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok().map(|ns| ns.div_euclid(1_000_000))
}

/// Render epoch milliseconds as `YYYY/MM/DD HH:mm:ss.mmm` (UTC).
pub fn format_time_ms(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.format("%Y/%m/%d %H:%M:%S%.3f").to_string(),
        None => String::new(),
    }
}

/// Human-readable byte size, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = (bytes as f64).log(1024.0).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    // Trim trailing zeros the way a spreadsheet would: 2.00 -> 2, 1.50 -> 1.5
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s} {}", UNITS[exp])
}
