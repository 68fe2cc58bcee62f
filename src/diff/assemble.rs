//! Shapes classified records into diff results.

use super::{Classification, DiffCounts, DiffLines, DiffResult, SortDiffResult};
use crate::config::{CountFields, ResolvedOptions};
use crate::model::RowState;

/// Build a [`DiffResult`], split or unified according to the options.
pub fn assemble(classification: Classification, options: &ResolvedOptions) -> DiffResult {
    let Classification { records, counts } = classification;
    let (modified_count, added_count, deleted_count) = selected_counts(options.fields, counts);

    let lines = if options.is_split {
        let mut added_lines = Vec::new();
        let mut deleted_lines = Vec::new();
        let mut modified_lines = Vec::new();
        for line in records {
            match line.row_state {
                RowState::Added => added_lines.push(line.into_record()),
                RowState::Deleted => deleted_lines.push(line.into_record()),
                RowState::Modified => modified_lines.push(line.into_record()),
                // Only the sort-aware diff retains unchanged rows
                RowState::Unchanged => {}
            }
        }
        DiffLines::Split {
            added_lines,
            deleted_lines,
            modified_lines,
        }
    } else {
        DiffLines::Unified { lines: records }
    };

    DiffResult {
        modified_count,
        added_count,
        deleted_count,
        lines,
    }
}

/// Build a [`SortDiffResult`]; always unified.
pub fn assemble_sorted(
    classification: Classification,
    sort_changed: bool,
    options: &ResolvedOptions,
) -> SortDiffResult {
    let Classification { records, counts } = classification;
    let (modified_count, added_count, deleted_count) = selected_counts(options.fields, counts);

    SortDiffResult {
        modified_count,
        added_count,
        deleted_count,
        sort_changed,
        lines: records,
    }
}

fn selected_counts(
    fields: CountFields,
    counts: DiffCounts,
) -> (Option<usize>, Option<usize>, Option<usize>) {
    (
        fields.modified_count.then_some(counts.modified),
        fields.added_count.then_some(counts.added),
        fields.deleted_count.then_some(counts.deleted),
    )
}
