//! Fail-reason flattening and tagged-section extraction.
//!
//! Failure payloads arrive as arbitrarily nested values: plain strings,
//! JSON-encoded strings, or objects of objects. [`flatten_fail_reason`]
//! renders them as human-readable multi-line text. Inside that text an
//! upstream logging component embeds up to three tagged sub-documents:
//!
//! ```text
//! [method]:
//! {"op": "..."}
//! [response]:
//! {"code": 500, "message": "boom"}
//! [error]:
//! free text or a JSON object
//! ```
//!
//! Each section runs from its tag to the next tag or end of input. The tag
//! grammar is centralized here; both normalizer call sites and the detail
//! extractor consume the parsed [`TaggedSections`]. A body that fails to
//! parse as JSON is kept as plain text, never an error.

use crate::types::{SectionBody, TaggedSections};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(method|response|error)\]:").expect("tag regex is valid"));

/// Recursively flatten a failure payload into readable text.
///
/// Strings are speculatively JSON-parsed and recursed; objects render as
/// newline-joined `key: value` entries (nested objects inline their own
/// entries); arrays render index-keyed; scalars stringify. `Null` renders
/// empty.
pub fn flatten_fail_reason(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => flatten_fail_reason(&parsed),
            Err(_) => s.clone(),
        },
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", flatten_fail_reason(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{i}: {}", flatten_fail_reason(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
    }
}

/// Extract the `[method]`/`[response]`/`[error]` sections from flattened
/// fail-reason text. The first occurrence of each tag wins; text before the
/// first tag is ignored.
pub fn extract_sections(text: &str) -> TaggedSections {
    let mut sections = TaggedSections::default();
    let matches: Vec<_> = TAG_RE.find_iter(text).collect();

    for (i, m) in matches.iter().enumerate() {
        let body_end = matches.get(i + 1).map_or(text.len(), |next| next.start());
        let body = text[m.end()..body_end].trim();
        if body.is_empty() {
            continue;
        }
        let parsed = parse_body(body);
        match &text[m.start()..m.end()] {
            "[method]:" if sections.method.is_none() => sections.method = Some(parsed),
            "[response]:" if sections.response.is_none() => sections.response = Some(parsed),
            "[error]:" if sections.error.is_none() => sections.error = Some(parsed),
            _ => {}
        }
    }
    sections
}

fn parse_body(body: &str) -> SectionBody {
    match serde_json::from_str::<Value>(body) {
        Ok(v) if v.is_object() || v.is_array() => SectionBody::Json(v),
        _ => SectionBody::Text(body.to_string()),
    }
}

/// HTTP-like response code from the `[response]` section, probed at
/// `data.code`, `statusCode`, `code` in that order.
pub fn response_code(sections: &TaggedSections) -> Option<i64> {
    let v = sections.response.as_ref()?.as_json()?;
    v.pointer("/data/code")
        .or_else(|| v.get("statusCode"))
        .or_else(|| v.get("code"))
        .and_then(Value::as_i64)
}

/// Response message from the `[response]` section (`data.message`, then
/// `message`).
pub fn response_message(sections: &TaggedSections) -> Option<String> {
    let v = sections.response.as_ref()?.as_json()?;
    v.pointer("/data/message")
        .or_else(|| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Error message: the `[error]` JSON body's `message` field, or the body
/// verbatim when it is prose.
pub fn error_message(sections: &TaggedSections) -> Option<String> {
    match sections.error.as_ref()? {
        SectionBody::Json(v) => v.get("message").and_then(Value::as_str).map(str::to_string),
        SectionBody::Text(t) => Some(t.clone()),
    }
}
