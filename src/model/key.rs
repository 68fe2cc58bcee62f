//! Record keys and the single key lookup used for matching.

use super::Record;
use serde_json::Value;
use std::fmt;

/// The identity of a record within a snapshot.
///
/// Only strings and integers are usable keys. A string `"1"` and the integer
/// `1` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    /// Integer key; wide enough for every `i64` and `u64` JSON integer
    Int(i128),
    /// String key
    Str(String),
}

impl RecordKey {
    /// Interpret a JSON value as a key.
    ///
    /// Returns `None` for nulls, floats, booleans, arrays and objects.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .map(Self::Int),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for RecordKey {
    fn from(n: i64) -> Self {
        Self::Int(i128::from(n))
    }
}

/// Read the key of `record` from the field named `key_field`.
///
/// This is the only place key values are extracted; the key field name is a
/// runtime option, so no code reaches into records by a fixed field name.
#[must_use]
pub fn record_key(record: &Record, key_field: &str) -> Option<RecordKey> {
    record.get(key_field).and_then(RecordKey::from_value)
}
