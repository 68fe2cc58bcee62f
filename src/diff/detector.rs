//! Change-detectors decide whether two records sharing a key differ.
//!
//! A detector receives the new and the old record and returns either `None`
//! (no meaningful change) or the record to report as Modified. An empty
//! returned record is treated the same as `None`.

use crate::model::Record;
use serde_json::Value;
use std::sync::Arc;

/// Names accepted by [`builtin_detector`].
pub const BUILTIN_DETECTORS: &[&str] = &["fieldwise", "whole-record", "never"];

/// Trait for comparing two records that share a key.
pub trait ChangeDetector: Send + Sync {
    /// Compare `new` against `old`, returning the Modified payload if they differ.
    fn detect(&self, new: &Record, old: &Record) -> Option<Record>;

    /// Name used in logs and debug output.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> ChangeDetector for F
where
    F: Fn(&Record, &Record) -> Option<Record> + Send + Sync,
{
    fn detect(&self, new: &Record, old: &Record) -> Option<Record> {
        self(new, old)
    }
}

/// Look up a built-in detector by name.
///
/// `key_field` is needed by detectors that echo the key in their payload.
#[must_use]
pub fn builtin_detector(name: &str, key_field: &str) -> Option<Arc<dyn ChangeDetector>> {
    match name {
        "fieldwise" => Some(Arc::new(FieldwiseDetector::new(key_field))),
        "whole-record" => Some(Arc::new(WholeRecordDetector)),
        "never" => Some(Arc::new(NeverChangedDetector)),
        _ => None,
    }
}

/// Reports only the fields that changed, plus the key.
///
/// Fields removed in the new record are reported as `null`. The payload lists
/// the key first, then changed fields in new-record order, then removed fields
/// in old-record order.
#[derive(Debug, Clone)]
pub struct FieldwiseDetector {
    key_field: String,
}

impl FieldwiseDetector {
    /// Create a field-wise detector for the given key field.
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
        }
    }
}

impl ChangeDetector for FieldwiseDetector {
    fn detect(&self, new: &Record, old: &Record) -> Option<Record> {
        let changed: Vec<(&String, Value)> = new
            .iter()
            .filter(|(field, value)| old.get(*field) != Some(*value))
            .map(|(field, value)| (field, value.clone()))
            .chain(
                old.keys()
                    .filter(|field| !new.contains_key(*field))
                    .map(|field| (field, Value::Null)),
            )
            .collect();

        if changed.is_empty() {
            return None;
        }

        let mut payload = Record::with_capacity(changed.len() + 1);
        if let Some(key) = new.get(&self.key_field) {
            payload.insert(self.key_field.clone(), key.clone());
        }
        for (field, value) in changed {
            payload.insert(field.clone(), value);
        }
        Some(payload)
    }

    fn name(&self) -> &str {
        "fieldwise"
    }
}

/// Reports the complete new record whenever the two records are not equal.
///
/// Field order is not significant.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeRecordDetector;

impl ChangeDetector for WholeRecordDetector {
    fn detect(&self, new: &Record, old: &Record) -> Option<Record> {
        (new != old).then(|| new.clone())
    }

    fn name(&self) -> &str {
        "whole-record"
    }
}

/// Never reports a change; only membership and ordering are diffed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverChangedDetector;

impl ChangeDetector for NeverChangedDetector {
    fn detect(&self, _new: &Record, _old: &Record) -> Option<Record> {
        None
    }

    fn name(&self) -> &str {
        "never"
    }
}
