//! eventlens-core — analytics log normalization library.
//!
//! Heterogeneous event captures (tracker spreadsheet rows and applog JSON
//! log lines) converge on one [`NormalizedEvent`] shape, which everything
//! downstream consumes.
//!
//! # Architecture
//!
//! ```text
//! tracker rows ──► tracker ─┐
//!                           ├──► NormalizedEvent ──► engine ──► export
//! applog lines ──► applog ──┘        │
//!                                    └──► detail
//! ```
//!
//! The normalizers are pure batch functions; view state (filter, sort,
//! pagination, session colors) lives in [`engine::Session`].

pub mod applog;
pub mod colors;
pub mod config;
pub mod detail;
pub mod engine;
pub mod export;
pub mod failreason;
pub mod taxonomy;
pub mod time;
pub mod tracker;
pub mod types;

pub use applog::{normalize_applog, CapturedRecord};
pub use tracker::normalize_tracker;
pub use types::{Category, NormalizedEvent, SectionBody, TaggedSections};
