//! Records, row states and conversion from typed values.

use crate::error::{KeyedDiffError, RecordErrorKind, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row of a snapshot: field name to JSON value, in insertion order.
pub type Record = IndexMap<String, Value>;

/// Classification of a record after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowState {
    /// Key present only in the new snapshot
    Added,
    /// Key present in both snapshots and the change-detector reported a difference
    Modified,
    /// Key present only in the old snapshot
    Deleted,
    /// Key present in both snapshots with no reported difference
    Unchanged,
}

impl RowState {
    /// Lowercase name, as serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Unchanged => "unchanged",
        }
    }

    /// One-character marker used by the summary report.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Modified => '~',
            Self::Deleted => '-',
            Self::Unchanged => '=',
        }
    }
}

impl std::fmt::Display for RowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a record holding only the key field.
#[must_use]
pub fn key_only(key_field: &str, key_value: Value) -> Record {
    let mut record = Record::with_capacity(1);
    record.insert(key_field.to_string(), key_value);
    record
}

/// Convert typed values into records.
///
/// Each item must serialize to a JSON object; field order follows the
/// serialization order of the type.
pub fn to_records<T: Serialize>(items: &[T]) -> Result<Vec<Record>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let value = serde_json::to_value(item).map_err(|e| {
                KeyedDiffError::record(
                    format!("item {index}"),
                    RecordErrorKind::Serialization(e.to_string()),
                )
            })?;
            match value {
                Value::Object(map) => Ok(map.into_iter().collect()),
                other => Err(KeyedDiffError::record(
                    format!("item {index}"),
                    RecordErrorKind::NotAnObject {
                        index,
                        found: json_type_name(&other),
                    },
                )),
            }
        })
        .collect()
}

/// Human-readable JSON type name for error messages.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
