//! Diff computation stage.
//!
//! Resolves the configured options once, then picks the diff variant: the
//! sort-aware diff when `sort` is set, deletions-only reporting when the new
//! snapshot is empty and `--report-deletions` was given, the plain diff
//! otherwise.

use crate::config::DiffConfig;
use crate::diff::{DiffEngine, DiffOutput};
use crate::model::{Record, RowState};
use anyhow::{Context, Result};

/// Run the diff between two loaded snapshots.
pub fn compute_diff(config: &DiffConfig, new: &[Record], old: &[Record]) -> Result<DiffOutput> {
    let quiet = config.behavior.quiet;
    let sort = config.options.sort;

    let resolved = config
        .options
        .to_diff_options()
        .and_then(|options| options.resolve())
        .context("Invalid diff options")?;

    if !quiet {
        tracing::info!(
            "Computing {} on key '{}'...",
            if sort { "sort-aware diff" } else { "diff" },
            resolved.key
        );
    }

    let engine = DiffEngine::new(&resolved);
    let output = if new.is_empty() && config.behavior.report_deletions {
        if !quiet {
            tracing::info!("New snapshot is empty, reporting every old record as deleted");
        }
        if sort {
            DiffOutput::Sort(engine.deletions_only_with_sort(old))
        } else {
            DiffOutput::Diff(engine.deletions_only(old))
        }
    } else if sort {
        engine
            .diff_with_sort(new, old)
            .map_or(DiffOutput::Empty, DiffOutput::Sort)
    } else {
        engine.diff(new, old).map_or(DiffOutput::Empty, DiffOutput::Diff)
    };

    if !quiet {
        match &output {
            DiffOutput::Empty => tracing::info!("New snapshot is empty, nothing to diff"),
            _ => tracing::info!(
                "Diff complete: {} added, {} modified, {} deleted",
                output.state_count(RowState::Added),
                output.state_count(RowState::Modified),
                output.state_count(RowState::Deleted)
            ),
        }
    }

    Ok(output)
}
