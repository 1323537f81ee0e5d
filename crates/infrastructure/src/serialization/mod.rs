//! Deterministic JSON serialization for stored variables and reports.
//!
//! Stable output keeps the variable file diffable between runs:
//! - Object keys sorted (via `BTreeMap` in the stored types)
//! - 2-space indentation
//! - Trailing newline

mod json;

pub use json::*;
