//! Key-based reconciliation engine.

use super::assemble::{assemble, assemble_sorted};
use super::{Classification, DiffCounts, DiffResult, SortDiffResult, TaggedRecord};
use crate::config::ResolvedOptions;
use crate::model::{key_only, record_key, Record, RecordKey, RowState};
use serde_json::Value;
use std::collections::HashSet;

/// Reconciles a new snapshot against an old one using resolved options.
///
/// Matching is a linear scan of the old snapshot per new record, so cost is
/// O(n·m); the engine is meant for modest list sizes.
pub struct DiffEngine<'a> {
    options: &'a ResolvedOptions,
}

impl<'a> DiffEngine<'a> {
    /// Create an engine over resolved options
    #[must_use]
    pub const fn new(options: &'a ResolvedOptions) -> Self {
        Self { options }
    }

    /// Classify and assemble, dropping unchanged records.
    ///
    /// Returns `None` when the new snapshot is empty.
    pub fn diff(&self, new: &[Record], old: &[Record]) -> Option<DiffResult> {
        let classification = self.reconcile(new, old, false)?;
        Some(assemble(classification, self.options))
    }

    /// Classify and assemble, keeping unchanged keys and reporting order changes.
    ///
    /// Returns `None` when the new snapshot is empty.
    pub fn diff_with_sort(&self, new: &[Record], old: &[Record]) -> Option<SortDiffResult> {
        let classification = self.reconcile(new, old, true)?;
        let sort_changed = self.sort_changed(new, old, &classification.counts);
        Some(assemble_sorted(classification, sort_changed, self.options))
    }

    /// Report every old record as deleted, for an empty new snapshot.
    pub fn deletions_only(&self, old: &[Record]) -> DiffResult {
        assemble(self.all_deleted(old), self.options)
    }

    /// Sort-aware variant of [`deletions_only`](Self::deletions_only).
    pub fn deletions_only_with_sort(&self, old: &[Record]) -> SortDiffResult {
        assemble_sorted(self.all_deleted(old), !old.is_empty(), self.options)
    }

    /// Match records by key and classify them.
    ///
    /// With `retain_unchanged`, matched records without a reported difference
    /// are kept as key-only Unchanged rows instead of being dropped.
    pub fn reconcile(
        &self,
        new: &[Record],
        old: &[Record],
        retain_unchanged: bool,
    ) -> Option<Classification> {
        if new.is_empty() {
            tracing::debug!("New snapshot is empty, nothing to diff");
            return None;
        }

        if old.is_empty() {
            tracing::debug!(added = new.len(), "Old snapshot is empty, all records added");
            return Some(Self::all_added(new));
        }

        let key_field = self.options.key.as_str();
        let mut records = Vec::with_capacity(new.len());
        let mut counts = DiffCounts::default();
        let mut visited: HashSet<RecordKey> = HashSet::new();

        for new_record in new {
            // Unkeyed or unmatched records are additions; the visited set is
            // only touched once a match exists.
            let matched = record_key(new_record, key_field)
                .and_then(|key| find_by_key(old, key_field, &key).map(|old_record| (key, old_record)));

            let Some((key, old_record)) = matched else {
                counts.added += 1;
                records.push(TaggedRecord::new(RowState::Added, new_record.clone()));
                continue;
            };

            tracing::trace!(%key, "Matched record");
            visited.insert(key);

            match self
                .options
                .detector
                .detect(new_record, old_record)
                .filter(|payload| !payload.is_empty())
            {
                Some(payload) => {
                    counts.modified += 1;
                    records.push(TaggedRecord::new(RowState::Modified, payload));
                }
                None => {
                    counts.unchanged += 1;
                    if retain_unchanged {
                        records.push(TaggedRecord::new(
                            RowState::Unchanged,
                            key_only(key_field, key_value(new_record, key_field)),
                        ));
                    }
                }
            }
        }

        for old_record in old {
            let seen = record_key(old_record, key_field).is_some_and(|key| visited.contains(&key));
            if !seen {
                counts.deleted += 1;
                records.push(TaggedRecord::new(
                    RowState::Deleted,
                    key_only(key_field, key_value(old_record, key_field)),
                ));
            }
        }

        tracing::debug!(
            added = counts.added,
            modified = counts.modified,
            deleted = counts.deleted,
            unchanged = counts.unchanged,
            detector = self.options.detector.name(),
            "Reconciled snapshots"
        );

        Some(Classification { records, counts })
    }

    /// Whether membership or key order differs between the snapshots.
    ///
    /// Any addition or deletion counts as a change. Otherwise keys are
    /// compared index by index, and snapshots of different lengths count as
    /// changed. Without additions or deletions the lengths can only differ
    /// when `old` repeats a key, so `new = [1]` against `old = [1, 1]` reports
    /// a change.
    #[must_use]
    pub fn sort_changed(&self, new: &[Record], old: &[Record], counts: &DiffCounts) -> bool {
        if counts.added > 0 || counts.deleted > 0 {
            return true;
        }
        if new.len() != old.len() {
            return true;
        }
        let key_field = self.options.key.as_str();
        new.iter()
            .zip(old)
            .any(|(n, o)| record_key(n, key_field) != record_key(o, key_field))
    }

    fn all_added(new: &[Record]) -> Classification {
        Classification {
            records: new
                .iter()
                .map(|record| TaggedRecord::new(RowState::Added, record.clone()))
                .collect(),
            counts: DiffCounts {
                added: new.len(),
                ..DiffCounts::default()
            },
        }
    }

    fn all_deleted(&self, old: &[Record]) -> Classification {
        let key_field = self.options.key.as_str();
        Classification {
            records: old
                .iter()
                .map(|record| {
                    TaggedRecord::new(
                        RowState::Deleted,
                        key_only(key_field, key_value(record, key_field)),
                    )
                })
                .collect(),
            counts: DiffCounts {
                deleted: old.len(),
                ..DiffCounts::default()
            },
        }
    }
}

/// First record in `snapshot` whose key equals `key`.
fn find_by_key<'r>(snapshot: &'r [Record], key_field: &str, key: &RecordKey) -> Option<&'r Record> {
    snapshot
        .iter()
        .find(|record| record_key(record, key_field).as_ref() == Some(key))
}

/// The raw key value of a record, `null` when the field is missing.
fn key_value(record: &Record, key_field: &str) -> Value {
    record.get(key_field).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CountFields, DiffOptions};
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    fn resolved(options: DiffOptions) -> ResolvedOptions {
        options.resolve().unwrap()
    }

    #[test]
    fn test_empty_new_returns_none() {
        let options = resolved(DiffOptions::new());
        let engine = DiffEngine::new(&options);
        assert!(engine.reconcile(&[], &records(json!([{"id": 1}])), false).is_none());
        assert!(engine.reconcile(&[], &[], true).is_none());
    }

    #[test]
    fn test_empty_old_short_circuits_without_detector() {
        let options = resolved(DiffOptions::new().detector(
            |_: &Record, _: &Record| -> Option<Record> { panic!("detector must not run") },
        ));
        let engine = DiffEngine::new(&options);
        let new = records(json!([{"id": 1}, {"id": 2}]));

        let classification = engine.reconcile(&new, &[], false).unwrap();
        assert_eq!(classification.counts().added, 2);
        assert!(classification
            .records()
            .iter()
            .all(|r| r.row_state == RowState::Added));
    }

    #[test]
    fn test_classifies_all_states_in_order() {
        let options = resolved(DiffOptions::new().detector_named("whole-record"));
        let engine = DiffEngine::new(&options);
        let new = records(json!([
            {"id": 1, "v": "same"},
            {"id": 2, "v": "changed"},
            {"id": 4, "v": "new"}
        ]));
        let old = records(json!([
            {"id": 1, "v": "same"},
            {"id": 2, "v": "orig"},
            {"id": 3, "v": "gone"}
        ]));

        let classification = engine.reconcile(&new, &old, false).unwrap();
        let states: Vec<RowState> = classification.records().iter().map(|r| r.row_state).collect();
        assert_eq!(
            states,
            vec![RowState::Modified, RowState::Added, RowState::Deleted]
        );
        assert_eq!(
            classification.counts(),
            DiffCounts {
                added: 1,
                modified: 1,
                deleted: 1,
                unchanged: 1
            }
        );
        assert_eq!(
            classification.records()[2].record,
            records(json!([{"id": 3}]))[0]
        );
    }

    #[test]
    fn test_retain_unchanged_keeps_key_only() {
        let options = resolved(DiffOptions::new());
        let engine = DiffEngine::new(&options);
        let new = records(json!([{"id": "a", "v": 1}]));
        let old = records(json!([{"id": "a", "v": 1}]));

        let classification = engine.reconcile(&new, &old, true).unwrap();
        assert_eq!(classification.records().len(), 1);
        let line = &classification.records()[0];
        assert_eq!(line.row_state, RowState::Unchanged);
        assert_eq!(line.record, records(json!([{"id": "a"}]))[0]);
    }

    #[test]
    fn test_empty_payload_counts_as_unchanged() {
        let options =
            resolved(DiffOptions::new().detector(|_: &Record, _: &Record| Some(Record::new())));
        let engine = DiffEngine::new(&options);
        let snapshot = records(json!([{"id": 1, "v": 1}]));

        let classification = engine.reconcile(&snapshot, &snapshot, false).unwrap();
        assert!(classification.records().is_empty());
        assert_eq!(classification.counts().unchanged, 1);
    }

    #[test]
    fn test_unkeyed_records() {
        let options = resolved(DiffOptions::new());
        let engine = DiffEngine::new(&options);
        let new = records(json!([{"name": "no key"}, {"id": 1}]));
        let old = records(json!([{"id": 1}, {"name": "also no key"}, {"id": 2.5}]));

        let classification = engine.reconcile(&new, &old, false).unwrap();
        let lines = classification.records();
        assert_eq!(lines[0].row_state, RowState::Added);
        assert_eq!(lines[1].row_state, RowState::Deleted);
        assert_eq!(lines[1].record["id"], Value::Null);
        assert_eq!(lines[2].row_state, RowState::Deleted);
        assert_eq!(lines[2].record["id"], json!(2.5));
    }

    #[test]
    fn test_string_and_integer_keys_do_not_match() {
        let options = resolved(DiffOptions::new().fields(CountFields::all()));
        let engine = DiffEngine::new(&options);
        let new = records(json!([{"id": "1"}]));
        let old = records(json!([{"id": 1}]));

        let counts = engine.reconcile(&new, &old, false).unwrap().counts();
        assert_eq!((counts.added, counts.deleted), (1, 1));
    }

    #[test]
    fn test_sort_changed() {
        let options = resolved(DiffOptions::new());
        let engine = DiffEngine::new(&options);
        let ab = records(json!([{"id": 1}, {"id": 2}]));
        let ba = records(json!([{"id": 2}, {"id": 1}]));
        let none = DiffCounts::default();

        assert!(!engine.sort_changed(&ab, &ab, &none));
        assert!(engine.sort_changed(&ba, &ab, &none));
        assert!(engine.sort_changed(
            &ab,
            &ab,
            &DiffCounts {
                added: 1,
                ..DiffCounts::default()
            }
        ));
    }

    #[test]
    fn test_deletions_only() {
        let options = resolved(DiffOptions::new().fields(CountFields::all()));
        let engine = DiffEngine::new(&options);
        let old = records(json!([{"id": 1, "v": "x"}, {"id": 2}]));

        let result = engine.deletions_only(&old);
        assert_eq!(result.deleted_count, Some(2));
        assert_eq!(result.lines_in_state(RowState::Deleted).len(), 2);

        let sorted = engine.deletions_only_with_sort(&old);
        assert!(sorted.sort_changed);
        assert!(!engine.deletions_only_with_sort(&[]).sort_changed);
    }

    #[test]
    fn test_sort_changed_with_repeated_old_key() {
        let options = resolved(DiffOptions::new().detector_named("never"));
        let engine = DiffEngine::new(&options);
        let new = records(json!([{"id": 1}]));
        let old = records(json!([{"id": 1}, {"id": 1}]));

        let result = engine.diff_with_sort(&new, &old).unwrap();
        assert_eq!(result.deleted_count, None);
        assert!(result.lines.iter().all(|l| l.row_state == RowState::Unchanged));
        assert!(result.sort_changed);
    }

    #[test]
    fn test_deletions_only_includes_unkeyed_records() {
        let options = resolved(DiffOptions::new().fields(CountFields::all()).is_split(false));
        let engine = DiffEngine::new(&options);
        let old = records(json!([{"id": 1}, {"name": "no key"}, {"id": true}]));

        let result = engine.deletions_only(&old);
        assert_eq!(result.deleted_count, Some(3));
        assert_eq!(
            serde_json::to_value(&result.lines).unwrap(),
            json!([
                {"id": 1, "rowState": "deleted"},
                {"id": null, "rowState": "deleted"},
                {"id": true, "rowState": "deleted"}
            ])
        );
    }
}
