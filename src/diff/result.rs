//! Diff result structures.

use crate::model::{Record, RowState};
use serde::Serialize;

/// Field name of the row-state tag.
pub const ROW_STATE_FIELD: &str = "rowState";

/// A record carrying its row state.
///
/// Serializes as the record's own fields followed by `rowState`. A
/// `rowState` field already present in the record is dropped, so the tag is
/// the only one emitted and split output never carries it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedRecord {
    #[serde(flatten)]
    pub record: Record,
    #[serde(rename = "rowState")]
    pub row_state: RowState,
}

impl TaggedRecord {
    pub fn new(row_state: RowState, mut record: Record) -> Self {
        record.shift_remove(ROW_STATE_FIELD);
        Self { record, row_state }
    }

    /// Drop the row state, keeping the record.
    #[must_use]
    pub fn into_record(self) -> Record {
        self.record
    }
}

/// Per-state tallies of a reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffCounts {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    /// Matched records with no reported difference
    pub unchanged: usize,
}

impl DiffCounts {
    /// Added + modified + deleted.
    #[must_use]
    pub const fn total_changes(&self) -> usize {
        self.added + self.modified + self.deleted
    }
}

/// Output of the reconciliation engine, before shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub(crate) records: Vec<TaggedRecord>,
    pub(crate) counts: DiffCounts,
}

impl Classification {
    /// Classified records: new-snapshot order, then trailing deletions.
    #[must_use]
    pub fn records(&self) -> &[TaggedRecord] {
        &self.records
    }

    /// Tallies for every state, whether or not they are emitted.
    #[must_use]
    pub const fn counts(&self) -> DiffCounts {
        self.counts
    }
}

/// Record sequences of a [`DiffResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiffLines {
    /// Records partitioned by row state, tags stripped
    Split {
        #[serde(rename = "addedLines")]
        added_lines: Vec<Record>,
        #[serde(rename = "deletedLines")]
        deleted_lines: Vec<Record>,
        #[serde(rename = "modifiedLines")]
        modified_lines: Vec<Record>,
    },
    /// One sequence in classification order, tags retained
    Unified { lines: Vec<TaggedRecord> },
}

impl DiffLines {
    /// True when no record is reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Split {
                added_lines,
                deleted_lines,
                modified_lines,
            } => added_lines.is_empty() && deleted_lines.is_empty() && modified_lines.is_empty(),
            Self::Unified { lines } => lines.is_empty(),
        }
    }
}

/// Result of [`diff`](super::diff).
///
/// Counts are present only when selected in the options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct DiffResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<usize>,
    #[serde(flatten)]
    pub lines: DiffLines,
}

impl DiffResult {
    /// Check if any record was added, modified or deleted
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Number of reported records.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        match &self.lines {
            DiffLines::Split {
                added_lines,
                deleted_lines,
                modified_lines,
            } => added_lines.len() + deleted_lines.len() + modified_lines.len(),
            DiffLines::Unified { lines } => lines.len(),
        }
    }

    /// Records of one state, whatever the output shape.
    #[must_use]
    pub fn lines_in_state(&self, state: RowState) -> Vec<&Record> {
        match &self.lines {
            DiffLines::Split {
                added_lines,
                deleted_lines,
                modified_lines,
            } => match state {
                RowState::Added => added_lines.iter().collect(),
                RowState::Deleted => deleted_lines.iter().collect(),
                RowState::Modified => modified_lines.iter().collect(),
                RowState::Unchanged => Vec::new(),
            },
            DiffLines::Unified { lines } => lines
                .iter()
                .filter(|line| line.row_state == state)
                .map(|line| &line.record)
                .collect(),
        }
    }
}

/// Result of [`diff_with_sort`](super::diff_with_sort).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct SortDiffResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<usize>,
    /// Whether membership or key order differs between the snapshots
    pub sort_changed: bool,
    pub lines: Vec<TaggedRecord>,
}

impl SortDiffResult {
    /// Check if anything beyond unchanged rows was reported
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.sort_changed || self.total_changes() > 0
    }

    /// Number of lines that are not Unchanged.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.row_state != RowState::Unchanged)
            .count()
    }
}

/// Either result form, or nothing when the new snapshot was empty.
///
/// Serializes as the wrapped result, or `null` for [`DiffOutput::Empty`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiffOutput {
    /// The new snapshot was empty; nothing was diffed
    Empty,
    /// Result of the plain diff
    Diff(DiffResult),
    /// Result of the sort-aware diff
    Sort(SortDiffResult),
}

impl DiffOutput {
    /// Check if any change was reported
    #[must_use]
    pub fn has_changes(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Diff(result) => result.has_changes(),
            Self::Sort(result) => result.has_changes(),
        }
    }

    /// Number of reported added, modified and deleted records
    #[must_use]
    pub fn total_changes(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Diff(result) => result.total_changes(),
            Self::Sort(result) => result.total_changes(),
        }
    }

    /// Number of reported records in one state.
    ///
    /// Unchanged records are only reported by the sort-aware diff.
    #[must_use]
    pub fn state_count(&self, state: RowState) -> usize {
        match self {
            Self::Empty => 0,
            Self::Diff(result) => result.lines_in_state(state).len(),
            Self::Sort(result) => result
                .lines
                .iter()
                .filter(|line| line.row_state == state)
                .count(),
        }
    }

    /// `sortChanged` of a sort-aware result
    #[must_use]
    pub const fn sort_changed(&self) -> Option<bool> {
        match self {
            Self::Sort(result) => Some(result.sort_changed),
            Self::Empty | Self::Diff(_) => None,
        }
    }
}
