//! JSON export file loading.
//!
//! Two file shapes, one per vendor:
//!
//! - applog exports: a JSON array whose elements are either captured-record
//!   objects (`{"line": ..., "timestamp": ...}`) or bare log lines, which
//!   get wrapped as records without a store timestamp.
//! - tracker exports: a JSON array of flat row objects (one spreadsheet row
//!   each).
//!
//! Whole-file problems (wrong extension, unparseable JSON, wrong top-level
//! shape) are fatal for the import; nothing is returned partially.

use crate::error::ImportError;
use eventlens_core::CapturedRecord;
use serde_json::{Map, Value};
use std::path::Path;

fn read_array(path: &Path) -> Result<Vec<Value>, ImportError> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(ImportError::UnsupportedFormat(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)
        .map_err(|source| ImportError::Io { path: path.to_path_buf(), source })?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|source| ImportError::Json { path: path.to_path_buf(), source })?;
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(ImportError::NotAnArray(path.to_path_buf())),
    }
}

/// Load an applog export as captured records.
pub fn load_records(path: &Path) -> Result<Vec<CapturedRecord>, ImportError> {
    let items = read_array(path)?;
    let records = items
        .into_iter()
        .map(|item| match &item {
            Value::Object(obj) if obj.contains_key("line") => {
                serde_json::from_value(item.clone()).unwrap_or(CapturedRecord::new(item))
            }
            _ => CapturedRecord::new(item),
        })
        .collect::<Vec<_>>();
    tracing::debug!(path = %path.display(), count = records.len(), "loaded applog export");
    Ok(records)
}

/// Load a tracker export as flat rows.
pub fn load_rows(path: &Path) -> Result<Vec<Map<String, Value>>, ImportError> {
    let items = read_array(path)?;
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(row) => rows.push(row),
            _ => return Err(ImportError::NotAnObject { path: path.to_path_buf(), index }),
        }
    }
    tracing::debug!(path = %path.display(), count = rows.len(), "loaded tracker export");
    Ok(rows)
}
