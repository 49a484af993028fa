//! Applog normalizer — captured JSON log lines into [`NormalizedEvent`]s.
//!
//! Each record carries a `line` (JSON-encoded string or already-parsed
//! object) and an optional log-store `timestamp` (decimal nanoseconds).
//! Lines come in three shapes, classified in order: API call (`operation`),
//! published event (`eventName`), generic log (`msg`). Field extraction
//! probes several alternate nesting paths because the upstream logger wraps
//! payloads inconsistently (top level, under `args.adWatchHistory`, under
//! `event`).
//!
//! Normalization is per-record fault isolated: a record that fails to parse
//! is logged at WARN and dropped; the batch continues.

use crate::failreason::{
    error_message, extract_sections, flatten_fail_reason, response_code, response_message,
};
use crate::taxonomy::{last_path_segment, APPLOG_OPERATIONS, EVENT_NAMES, LOG_MESSAGES};
use crate::time::{format_time_ms, nanos_str_to_millis, parse_datetime, parse_epoch};
use crate::types::{is_null_like, sort_and_index, Category, NormalizedEvent, TaxonomyEntry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One captured record as delivered by the network-capture collaborator or a
/// log-store export file: the raw line plus the store's nanosecond timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedRecord {
    pub line: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CapturedRecord {
    pub fn new(line: Value) -> Self {
        Self { line, timestamp: None }
    }

    /// The line as text, for dedup keys and diagnostics.
    pub fn line_text(&self) -> String {
        match &self.line {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Normalize a batch of captured records: per-record extraction (failures
/// dropped with a warning), chronological sort, 1..N indexing.
pub fn normalize_applog(records: &[CapturedRecord]) -> Vec<NormalizedEvent> {
    let mut events = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        match normalize_record(record, i + 1) {
            Ok(event) => events.push(event),
            Err(err) => {
                tracing::warn!(original_index = i + 1, error = %err, "dropping unparseable record");
            }
        }
    }
    sort_and_index(&mut events);
    events
}

fn normalize_record(record: &CapturedRecord, original_index: usize) -> anyhow::Result<NormalizedEvent> {
    let line: Value = match &record.line {
        Value::String(s) => serde_json::from_str(s)?,
        other => other.clone(),
    };

    let (timestamp, time) = resolve_time(&line, record);

    let level = line
        .get("level")
        .and_then(Value::as_str)
        .map(str::to_uppercase)
        .filter(|s| !s.is_empty());

    let (event, desc, detail, category, icon, taxonomy_tooltip) = classify(&line);

    let user = probe_nested(&line, "user");
    let user_attributes = probe_nested(&line, "userAttributes");
    let analysis_data = probe_nested(&line, "analysisData");
    let args = line.get("args").cloned().unwrap_or(Value::Null);

    let user_id = str_at(&user, "id")
        .or_else(|| str_at(&user, "openId"))
        .unwrap_or_default();
    let page_path = str_at(&user_attributes, "path")
        .or_else(|| str_at(&analysis_data, "path"))
        .unwrap_or_default();

    let properties = build_properties(
        &line,
        &user,
        &user_attributes,
        &analysis_data,
        &args,
        level.as_deref(),
    );

    let fail_reason = properties
        .get("failReason")
        .map(flatten_fail_reason)
        .unwrap_or_default();
    let sections = extract_sections(&fail_reason);

    let has_tooltip = taxonomy_tooltip
        || matches!(category, Category::Ad | Category::Pay)
        || (level.as_deref() == Some("ERROR") && !fail_reason.is_empty());

    Ok(NormalizedEvent {
        index: 0, // assigned by sort_and_index
        original_index,
        timestamp,
        time,
        event,
        desc,
        detail,
        category,
        icon,
        level,
        user_id,
        page_path,
        properties,
        raw_data: line,
        response_code: response_code(&sections),
        response_message: response_message(&sections),
        error_message: error_message(&sections),
        sections,
        fail_reason,
        has_tooltip,
    })
}

/// `line.time` wins when present (even if unparseable — there is no fallback
/// to the store timestamp then); otherwise the store's nanosecond timestamp.
fn resolve_time(line: &Value, record: &CapturedRecord) -> (i64, String) {
    match line.get("time") {
        Some(Value::String(s)) => {
            return match parse_datetime(s) {
                Some(ms) => (ms, format_time_ms(ms)),
                None => (0, String::new()),
            };
        }
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_f64() {
                let ms = parse_epoch(v);
                return (ms, format_time_ms(ms));
            }
        }
        _ => {}
    }
    if let Some(ms) = record.timestamp.as_deref().and_then(nanos_str_to_millis) {
        return (ms, format_time_ms(ms));
    }
    (0, String::new())
}

/// Classify the line into one of the three shapes and resolve its taxonomy
/// entry, with per-shape fallbacks for unmapped identifiers.
fn classify(line: &Value) -> (String, String, String, Category, &'static str, bool) {
    if let Some(op) = line.get("operation").and_then(Value::as_str).filter(|s| !s.is_empty()) {
        return match APPLOG_OPERATIONS.get(op) {
            Some(entry) => from_entry(op, entry),
            None => (
                op.to_string(),
                last_path_segment(op).to_string(),
                format!("API: {op}"),
                Category::Api,
                "🌐",
                false,
            ),
        };
    }

    if let Some(name) = line.get("eventName").and_then(Value::as_str).filter(|s| !s.is_empty()) {
        return match EVENT_NAMES.get(name) {
            Some(entry) => from_entry(name, entry),
            None => (
                name.to_string(),
                name.to_string(),
                format!("event: {name}"),
                Category::System,
                "📤",
                false,
            ),
        };
    }

    let msg = line.get("msg").and_then(Value::as_str).unwrap_or("unknown");
    match LOG_MESSAGES.get(msg) {
        // The msg shape keeps the message itself as detail even when mapped.
        Some(entry) => (
            msg.to_string(),
            entry.desc.to_string(),
            msg.to_string(),
            entry.category,
            entry.icon,
            entry.has_tooltip,
        ),
        None => (
            msg.to_string(),
            if msg == "unknown" { "unknown message".to_string() } else { msg.to_string() },
            msg.to_string(),
            Category::System,
            "📋",
            false,
        ),
    }
}

fn from_entry(
    event: &str,
    entry: &TaxonomyEntry,
) -> (String, String, String, Category, &'static str, bool) {
    (
        event.to_string(),
        entry.desc.to_string(),
        entry.detail.to_string(),
        entry.category,
        entry.icon,
        entry.has_tooltip,
    )
}

/// Non-empty string field of an object value.
fn str_at(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Probe the alternate nesting paths for a named object: top level, under
/// `args.adWatchHistory`, under `event`. First object with any keys wins.
fn probe_nested(line: &Value, key: &str) -> Value {
    let candidates = [
        line.get(key),
        line.pointer(&format!("/args/adWatchHistory/{key}")),
        line.pointer(&format!("/event/{key}")),
    ];
    for candidate in candidates.into_iter().flatten() {
        if candidate.as_object().is_some_and(|o| !o.is_empty()) {
            return candidate.clone();
        }
    }
    Value::Object(Map::new())
}

/// The curated property allow-list. Each field resolves through its own
/// alternate-source chain; null-like values are dropped.
fn build_properties(
    line: &Value,
    user: &Value,
    attrs: &Value,
    analysis: &Value,
    args: &Value,
    level: Option<&str>,
) -> Map<String, Value> {
    let mut props = Map::new();
    let mut put = |key: &str, value: Option<Value>| {
        if let Some(v) = value {
            if !is_null_like(&v) {
                props.insert(key.to_string(), v);
            }
        }
    };

    // Request / service envelope
    put("level", level.map(|l| Value::String(l.to_string())));
    for key in [
        "code", "reason", "stack", "userAgent", "latency", "traceId", "spanId", "serviceId",
        "serviceName", "serviceVersion", "ip",
    ] {
        put(key, line.get(key).cloned());
    }

    // User identity
    put("userId", user.get("id").cloned());
    put("openId", user.get("openId").cloned());
    put("miniAppId", user.get("miniAppId").or_else(|| attrs.get("miniAppId")).cloned());
    put("miniAppName", attrs.get("miniAppName").cloned());
    put("miniAppKey", attrs.get("miniAppKey").cloned());

    // Device
    put("deviceId", attrs.get("deviceId").or_else(|| analysis.get("device_id")).cloned());
    for key in [
        "os", "osVersion", "deviceModel", "deviceManufacturer", "browser", "browserVersion",
        "networkType",
    ] {
        put(key, attrs.get(key).cloned());
    }

    // Acquisition
    put("fromType", attrs.get("fromType").cloned());
    put("linkId", attrs.get("linkId").cloned());

    // Book
    put(
        "bookId",
        attrs
            .get("bookId")
            .or_else(|| analysis.get("book_id"))
            .or_else(|| args.get("bookId"))
            .cloned(),
    );
    put("bookName", analysis.get("book_name").cloned());
    put("chapterId", attrs.get("chapterId").or_else(|| args.get("chapterId")).cloned());

    // Ad
    put("adType", analysis.get("ad_type").cloned());
    put("adId", analysis.get("ad_id").cloned());
    put("isSuccess", analysis.get("is_success").cloned());
    put(
        "failReason",
        analysis
            .get("fail_reason")
            .or_else(|| analysis.get("failReason"))
            .or_else(|| line.get("failReason"))
            .or_else(|| line.get("fail_reason"))
            .cloned(),
    );
    put("watchtime", analysis.get("watchtime").cloned());
    put("readProgress", analysis.get("read_progress").cloned());

    // Event envelope
    put("eventName", line.get("eventName").cloned());
    put("topic", line.get("topic").cloned());
    put("args", if args.is_null() { None } else { Some(args.clone()) });
    if analysis.as_object().is_some_and(|o| !o.is_empty()) {
        props.insert("analysisData".to_string(), analysis.clone());
    }

    props
}
