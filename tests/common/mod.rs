//! Shared test utilities for eventlens integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Builders panic on invalid input rather than returning
//! `Result`; they exist for readable assertions, not production use.

// Compiled once per harness crate; not every harness uses every helper.
#![allow(unused)]

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
