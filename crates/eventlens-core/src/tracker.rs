//! Tracker normalizer — flat spreadsheet rows into [`NormalizedEvent`]s.
//!
//! Rows are flat column-name → scalar maps; the sentinel string `"NULL"`
//! marks absence. Field resolution uses fixed alternate-name chains (first
//! non-empty wins). Flat input cannot fail per-row, so unlike the applog
//! normalizer there is no record-level error isolation here.

use crate::taxonomy::{unknown_tracker_event, TRACKER_EVENTS};
use crate::time::{format_time_ms, parse_datetime, parse_epoch};
use crate::types::{is_null_like, sort_and_index, Category, NormalizedEvent, TaggedSections};
use serde_json::{Map, Value};

/// Columns that feed dedicated `NormalizedEvent` fields and are therefore
/// excluded from `properties`.
const BASE_FIELDS: &[&str] = &[
    "event", "Event", "$event", "time", "Time", "$time", "distinct_id", "user_id", "$user_id",
];

const EVENT_FIELDS: &[&str] = &["event", "Event", "$event"];
const TIME_FIELDS: &[&str] = &["time", "Time", "$time"];
const USER_FIELDS: &[&str] = &["distinct_id", "user_id", "$user_id"];

/// Normalize a batch of flat tracker rows: map, sort chronologically (stable),
/// index 1..N.
pub fn normalize_tracker(rows: &[Map<String, Value>]) -> Vec<NormalizedEvent> {
    let mut events: Vec<NormalizedEvent> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| normalize_row(row, i + 1))
        .collect();
    sort_and_index(&mut events);
    events
}

fn normalize_row(row: &Map<String, Value>, original_index: usize) -> NormalizedEvent {
    let event = first_string(row, EVENT_FIELDS).unwrap_or_default();
    let entry = TRACKER_EVENTS
        .get(event.as_str())
        .copied()
        .unwrap_or_else(|| unknown_tracker_event(&event));

    let (timestamp, time) = resolve_time(row);
    let user_id = first_string(row, USER_FIELDS).unwrap_or_default();
    let page_path = first_string(row, &["page_name"]).unwrap_or_default();

    // Everything outside the base fields becomes a property, null-filtered.
    let mut properties = Map::new();
    for (key, value) in row {
        if BASE_FIELDS.contains(&key.as_str()) || is_null_like(value) {
            continue;
        }
        properties.insert(key.clone(), value.clone());
    }

    let has_tooltip =
        entry.has_tooltip || entry.is_pay || matches!(entry.category, Category::Ad | Category::Pay);

    NormalizedEvent {
        index: 0, // assigned by sort_and_index
        original_index,
        timestamp,
        time,
        event,
        desc: entry.desc.to_string(),
        detail: entry.detail.to_string(),
        category: entry.category,
        icon: entry.icon,
        level: None,
        user_id,
        page_path,
        properties,
        raw_data: Value::Object(row.clone()),
        fail_reason: String::new(),
        sections: TaggedSections::default(),
        response_code: None,
        response_message: None,
        error_message: None,
        has_tooltip,
    }
}

/// Time column: numbers are epoch seconds or milliseconds by magnitude;
/// strings get generic date parsing, or stay as the display time verbatim
/// with `timestamp = 0` when unparseable.
fn resolve_time(row: &Map<String, Value>) -> (i64, String) {
    for field in TIME_FIELDS {
        match row.get(*field) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_f64() {
                    let ms = parse_epoch(v);
                    return (ms, format_time_ms(ms));
                }
            }
            Some(Value::String(s)) if !s.is_empty() => {
                return match parse_datetime(s) {
                    Some(ms) => (ms, format_time_ms(ms)),
                    None => (0, s.clone()),
                };
            }
            _ => {}
        }
    }
    (0, String::new())
}

fn first_string(row: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|f| {
        row.get(*f).and_then(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    })
}
