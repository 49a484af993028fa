//! Core types for eventlens-core.
//!
//! This module defines the fundamental data structures shared across all
//! layers: the [`NormalizedEvent`] produced by both normalizers, the static
//! [`TaxonomyEntry`], the event [`Category`], and the structured
//! [`TaggedSections`] recovered from fail-reason text.

use serde::Serialize;
use serde_json::Value;

/// Closed set of event categories. Every taxonomy entry carries one; unmapped
/// events fall back per the normalizer rules (`Auto` for `$`-prefixed tracker
/// events, `Api` for unknown operations, otherwise `Custom`/`System`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Auto,
    Custom,
    Pay,
    Channel,
    Read,
    Search,
    Ad,
    Api,
    System,
}

impl Category {
    /// Stable lowercase key, used for filtering and serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Auto => "auto",
            Category::Custom => "custom",
            Category::Pay => "pay",
            Category::Channel => "channel",
            Category::Read => "read",
            Category::Search => "search",
            Category::Ad => "ad",
            Category::Api => "api",
            Category::System => "system",
        }
    }

    /// Human-readable label for table cells and export columns.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Auto => "Auto-collected",
            Category::Custom => "Custom",
            Category::Pay => "Payment",
            Category::Channel => "Channel",
            Category::Read => "Reading",
            Category::Search => "Search",
            Category::Ad => "Ad",
            Category::Api => "API",
            Category::System => "System",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Category::Auto),
            "custom" => Ok(Category::Custom),
            "pay" => Ok(Category::Pay),
            "channel" => Ok(Category::Channel),
            "read" => Ok(Category::Read),
            "search" => Ok(Category::Search),
            "ad" => Ok(Category::Ad),
            "api" => Ok(Category::Api),
            "system" => Ok(Category::System),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Static description of a known event or API operation.
///
/// Entries live in compile-time `phf` maps (see [`crate::taxonomy`]); all
/// fields are `'static`. Construction goes through the `const fn` helpers so
/// table literals stay one line per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub desc: &'static str,
    pub category: Category,
    pub detail: &'static str,
    pub icon: &'static str,
    /// Taxonomy-level tooltip flag; `NormalizedEvent::has_tooltip` also turns
    /// on for ad/pay categories and for errors with a fail reason.
    pub has_tooltip: bool,
    /// Payment-flow event (tracker taxonomy only).
    pub is_pay: bool,
}

impl TaxonomyEntry {
    pub const fn new(
        desc: &'static str,
        category: Category,
        detail: &'static str,
        icon: &'static str,
    ) -> Self {
        Self { desc, category, detail, icon, has_tooltip: false, is_pay: false }
    }

    pub const fn with_tooltip(mut self) -> Self {
        self.has_tooltip = true;
        self
    }

    pub const fn pay(mut self) -> Self {
        self.is_pay = true;
        self
    }
}

/// Body of one tagged section extracted from fail-reason text.
///
/// Sections that parse as JSON keep the parsed value; anything else is kept
/// verbatim (a non-JSON body is never an error).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionBody {
    Json(Value),
    Text(String),
}

impl SectionBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            SectionBody::Json(v) => Some(v),
            SectionBody::Text(_) => None,
        }
    }
}

/// The up-to-three structured sections embedded in a fail reason:
/// `[method]:`, `[response]:`, `[error]:`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaggedSections {
    pub method: Option<SectionBody>,
    pub response: Option<SectionBody>,
    pub error: Option<SectionBody>,
}

impl TaggedSections {
    pub fn is_empty(&self) -> bool {
        self.method.is_none() && self.response.is_none() && self.error.is_none()
    }
}

/// A single normalized event, one per successfully parsed input record.
///
/// `index` is assigned after the chronological sort and re-assigned on every
/// resort; `original_index` is the immutable position in the input.
/// `properties` is a curated allow-list derived from `raw_data`, never an
/// alias of it, and never contains null-like values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub index: usize,
    pub original_index: usize,
    /// Milliseconds since epoch; 0 when unparseable (sorts first ascending).
    pub timestamp: i64,
    /// `YYYY/MM/DD HH:mm:ss.mmm`, or the raw time string when unparseable,
    /// or empty when absent.
    pub time: String,
    pub event: String,
    pub desc: String,
    pub detail: String,
    pub category: Category,
    pub icon: &'static str,
    /// Uppercased log level; only the applog source carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub user_id: String,
    pub page_path: String,
    pub properties: serde_json::Map<String, Value>,
    /// Original parsed record, retained verbatim for copy/export and detail
    /// re-derivation. Never mutated after creation.
    pub raw_data: Value,
    /// Recursively flattened fail reason, empty when absent.
    pub fail_reason: String,
    #[serde(skip_serializing_if = "TaggedSections::is_empty")]
    pub sections: TaggedSections,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub has_tooltip: bool,
}

impl NormalizedEvent {
    pub fn is_error(&self) -> bool {
        self.level.as_deref() == Some("ERROR")
    }
}

/// Shared tail of both normalizers: chronological sort (stable, so ties keep
/// original order) and 1-based re-indexing.
pub(crate) fn sort_and_index(events: &mut [NormalizedEvent]) {
    events.sort_by_key(|e| e.timestamp);
    for (i, event) in events.iter_mut().enumerate() {
        event.index = i + 1;
    }
}

/// A value is null-like when it is JSON null or one of the absence-sentinel
/// strings produced by spreadsheet exports.
pub(crate) fn is_null_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "NULL" || s == "null",
        _ => false,
    }
}
