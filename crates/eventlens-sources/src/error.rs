//! Import error taxonomy.
//!
//! Whole-file failures are fatal for that import and surfaced to the
//! caller; no partial dataset is installed. Per-record failures are handled
//! inside the normalizers and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported file format: {0} (expected .json)")]
    UnsupportedFormat(PathBuf),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a top-level JSON array in {0}")]
    NotAnArray(PathBuf),

    #[error("row {index} in {path} is not a JSON object")]
    NotAnObject { path: PathBuf, index: usize },
}
