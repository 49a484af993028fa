//! Test builders — ergonomic constructors for captured records and tracker
//! rows.

use eventlens_core::CapturedRecord;
use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// LineBuilder (applog)
// ---------------------------------------------------------------------------

/// Fluent builder for applog lines wrapped in a [`CapturedRecord`].
///
/// # Example
///
/// ```rust
/// let record = LineBuilder::operation("/api.x.Book/GetBook")
///     .time("2024-01-01T00:00:00.000Z")
///     .user("u1")
///     .field("latency", "12ms")
///     .record();
/// ```
pub struct LineBuilder {
    line: Map<String, Value>,
    store_timestamp: Option<String>,
}

impl LineBuilder {
    pub fn operation(op: &str) -> Self {
        Self::with("operation", op)
    }

    pub fn event_name(name: &str) -> Self {
        Self::with("eventName", name)
    }

    pub fn msg(msg: &str) -> Self {
        Self::with("msg", msg)
    }

    fn with(key: &str, value: &str) -> Self {
        let mut line = Map::new();
        line.insert(key.to_string(), json!(value));
        Self { line, store_timestamp: None }
    }

    pub fn time(mut self, time: &str) -> Self {
        self.line.insert("time".to_string(), json!(time));
        self
    }

    pub fn store_timestamp(mut self, nanos: &str) -> Self {
        self.store_timestamp = Some(nanos.to_string());
        self
    }

    pub fn level(mut self, level: &str) -> Self {
        self.line.insert("level".to_string(), json!(level));
        self
    }

    pub fn user(mut self, id: &str) -> Self {
        self.line.insert("user".to_string(), json!({"id": id}));
        self
    }

    pub fn fail_reason(mut self, reason: &str) -> Self {
        self.line.insert("failReason".to_string(), json!(reason));
        self
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.line.insert(key.to_string(), value.into());
        self
    }

    /// Finish as a record whose line is an already-parsed object.
    pub fn record(self) -> CapturedRecord {
        CapturedRecord {
            line: Value::Object(self.line),
            timestamp: self.store_timestamp,
        }
    }

    /// Finish as a record whose line is a JSON-encoded string, the shape the
    /// capture collaborator actually delivers.
    pub fn record_as_text(self) -> CapturedRecord {
        CapturedRecord {
            line: Value::String(Value::Object(self.line).to_string()),
            timestamp: self.store_timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// RowBuilder (tracker)
// ---------------------------------------------------------------------------

/// Fluent builder for one flat tracker spreadsheet row.
pub struct RowBuilder {
    row: Map<String, Value>,
}

impl RowBuilder {
    pub fn event(name: &str) -> Self {
        let mut row = Map::new();
        row.insert("event".to_string(), json!(name));
        Self { row }
    }

    pub fn time(mut self, time: impl Into<Value>) -> Self {
        self.row.insert("time".to_string(), time.into());
        self
    }

    pub fn user(mut self, id: &str) -> Self {
        self.row.insert("distinct_id".to_string(), json!(id));
        self
    }

    pub fn column(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.row.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> Map<String, Value> {
        self.row
    }
}
