//! eventlens-sources — input adapters for eventlens.
//!
//! Each adapter produces the raw material for one eventlens-core
//! normalizer: JSON export files loaded from disk, or live capture batches
//! merged through the async [`capture::CaptureBuffer`].

pub mod capture;
pub mod error;
pub mod file;

pub use capture::CaptureBuffer;
pub use error::ImportError;
pub use file::{load_records, load_rows};
