//! Keyed snapshot diffing.
//!
//! Two snapshots of the same logical list are reconciled by a key field.
//! Every record ends up Added, Modified, Deleted or Unchanged, and the
//! classification is shaped into one of two result forms:
//!
//! - [`diff`]: split into `addedLines`/`deletedLines`/`modifiedLines`, or a
//!   single unified `lines` sequence tagged with `rowState`
//! - [`diff_with_sort`]: always unified, keeps key-only Unchanged rows and
//!   reports whether record order changed (`sortChanged`)
//!
//! Whether a matched pair counts as Modified is decided by a
//! [`ChangeDetector`]. Built-in detectors are looked up by name through
//! [`builtin_detector`]; any `Fn(&Record, &Record) -> Option<Record>` works
//! as a custom one.
//!
//! # Example
//!
//! ```
//! use keyed_diff::config::DiffOptions;
//! use keyed_diff::diff::diff;
//! use keyed_diff::model::Record;
//! use serde_json::json;
//!
//! let new: Vec<Record> = serde_json::from_value(json!([{"id": 1, "v": "b"}])).unwrap();
//! let old: Vec<Record> = serde_json::from_value(json!([{"id": 1, "v": "a"}])).unwrap();
//!
//! let result = diff(&new, &old, &DiffOptions::new()).unwrap().unwrap();
//! assert_eq!(result.total_changes(), 1);
//! ```

mod assemble;
mod detector;
mod engine;
mod result;

pub use assemble::{assemble, assemble_sorted};
pub use detector::{
    builtin_detector, ChangeDetector, FieldwiseDetector, NeverChangedDetector,
    WholeRecordDetector, BUILTIN_DETECTORS,
};
pub use engine::DiffEngine;
pub use result::{
    Classification, DiffCounts, DiffLines, DiffOutput, DiffResult, SortDiffResult, TaggedRecord,
    ROW_STATE_FIELD,
};

use crate::config::DiffOptions;
use crate::error::{ErrorContext, Result};
use crate::model::{to_records, Record};
use serde::Serialize;

/// Diff two snapshots.
///
/// Returns `Ok(None)` when `new` is empty. An absent old snapshot is an empty
/// slice; every new record is then reported as added.
///
/// # Errors
///
/// Returns a configuration error when the options fail validation. Nothing
/// is matched in that case.
pub fn diff(new: &[Record], old: &[Record], options: &DiffOptions) -> Result<Option<DiffResult>> {
    let resolved = options.resolve().context("resolving diff options")?;
    Ok(DiffEngine::new(&resolved).diff(new, old))
}

/// Diff two snapshots, keeping unchanged keys and reporting order changes.
///
/// The `is_split` option is ignored; the result is always unified.
///
/// # Errors
///
/// Returns a configuration error when the options fail validation.
pub fn diff_with_sort(
    new: &[Record],
    old: &[Record],
    options: &DiffOptions,
) -> Result<Option<SortDiffResult>> {
    let resolved = options.resolve().context("resolving diff options")?;
    Ok(DiffEngine::new(&resolved).diff_with_sort(new, old))
}

/// [`diff`] over any serializable record type.
///
/// # Errors
///
/// Fails when options are invalid or an item does not serialize to a JSON
/// object.
pub fn diff_typed<T: Serialize>(
    new: &[T],
    old: &[T],
    options: &DiffOptions,
) -> Result<Option<DiffResult>> {
    let resolved = options.resolve().context("resolving diff options")?;
    let new = to_records(new).context("converting new snapshot")?;
    let old = to_records(old).context("converting old snapshot")?;
    Ok(DiffEngine::new(&resolved).diff(&new, &old))
}

/// [`diff_with_sort`] over any serializable record type.
///
/// # Errors
///
/// Fails when options are invalid or an item does not serialize to a JSON
/// object.
pub fn diff_with_sort_typed<T: Serialize>(
    new: &[T],
    old: &[T],
    options: &DiffOptions,
) -> Result<Option<SortDiffResult>> {
    let resolved = options.resolve().context("resolving diff options")?;
    let new = to_records(new).context("converting new snapshot")?;
    let old = to_records(old).context("converting old snapshot")?;
    Ok(DiffEngine::new(&resolved).diff_with_sort(&new, &old))
}

/// Report every old record as deleted.
///
/// This is what [`diff`] declines to compute for an empty new snapshot.
///
/// # Errors
///
/// Returns a configuration error when the options fail validation.
pub fn deletions_only(old: &[Record], options: &DiffOptions) -> Result<DiffResult> {
    let resolved = options.resolve().context("resolving diff options")?;
    Ok(DiffEngine::new(&resolved).deletions_only(old))
}

/// Sort-aware variant of [`deletions_only`].
///
/// # Errors
///
/// Returns a configuration error when the options fail validation.
pub fn deletions_only_with_sort(old: &[Record], options: &DiffOptions) -> Result<SortDiffResult> {
    let resolved = options.resolve().context("resolving diff options")?;
    Ok(DiffEngine::new(&resolved).deletions_only_with_sort(old))
}
