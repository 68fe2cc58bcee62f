//! **Key-based reconciliation of two record snapshots.**
//!
//! `keyed-diff` compares a *new* and an *old* snapshot of the same logical
//! list of records (rows of a grid, entries of a collection) and reports what
//! was added, modified and deleted. Records are matched by the value of a
//! single key field; whether a matched pair differs is decided by a pluggable
//! change-detector.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Record`], an insertion-ordered map of field names to
//!   JSON values, and [`RowState`], the classification every record ends up
//!   with.
//! - **[`config`]**: [`DiffOptions`] (key field, change-detector, counts to
//!   emit, split or unified output), its validation, and YAML option files.
//! - **[`diff`]**: the reconciliation engine and the two entry points,
//!   [`diff`](diff::diff) and [`diff_with_sort`](diff::diff_with_sort).
//! - **[`reports`]**: JSON and summary renderings of a result.
//! - **[`pipeline`]**: load → diff → report orchestration used by the CLI.
//!
//! ## Getting Started
//!
//! ```
//! use keyed_diff::config::{CountFields, DiffOptions};
//! use keyed_diff::model::Record;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let new: Vec<Record> = serde_json::from_value(json!([
//!         {"id": 1, "qty": 5},
//!         {"id": 3, "qty": 1}
//!     ]))?;
//!     let old: Vec<Record> = serde_json::from_value(json!([
//!         {"id": 1, "qty": 4},
//!         {"id": 2, "qty": 9}
//!     ]))?;
//!
//!     let options = DiffOptions::new().fields(CountFields::all());
//!     let result = keyed_diff::diff(&new, &old, &options)?.expect("new snapshot is not empty");
//!
//!     assert_eq!(result.added_count, Some(1));
//!     assert_eq!(result.modified_count, Some(1));
//!     assert_eq!(result.deleted_count, Some(1));
//!     Ok(())
//! }
//! ```
//!
//! ## Detecting Reordering
//!
//! [`diff_with_sort`](diff::diff_with_sort) keeps matched records that did not
//! change (key only) and reports whether the key order differs.
//!
//! ```
//! use keyed_diff::config::DiffOptions;
//! use keyed_diff::model::Record;
//! use serde_json::json;
//!
//! let new: Vec<Record> = serde_json::from_value(json!([{"id": 2}, {"id": 1}])).unwrap();
//! let old: Vec<Record> = serde_json::from_value(json!([{"id": 1}, {"id": 2}])).unwrap();
//!
//! let options = DiffOptions::new().detector_named("never");
//! let result = keyed_diff::diff_with_sort(&new, &old, &options).unwrap().unwrap();
//! assert!(result.sort_changed);
//! assert_eq!(result.lines.len(), 2);
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `keyed-diff` binary wraps the library: `keyed-diff diff new.json old.json`
//! reads two JSON arrays of objects and prints the result.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    // `new`/`old` snapshot pairs are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{BehaviorConfig, DiffConfig, OutputConfig};
pub use config::{ConfigError, CountFields, DiffOptions, Validatable};
pub use diff::{
    deletions_only, diff, diff_typed, diff_with_sort, diff_with_sort_typed, ChangeDetector,
    DiffEngine, DiffOutput, DiffResult, SortDiffResult,
};
pub use error::{ErrorContext, KeyedDiffError, Result};
pub use model::{record_key, Record, RecordKey, RowState};
pub use reports::{ReportFormat, ReportGenerator};
