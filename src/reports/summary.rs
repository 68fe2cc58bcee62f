//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffOutput;
use crate::model::RowState;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn state_color(state: RowState) -> &'static str {
    match state {
        RowState::Added => "green",
        RowState::Deleted => "red",
        RowState::Modified => "yellow",
        RowState::Unchanged => "dim",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_diff_report(
        &self,
        output: &DiffOutput,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        lines.push(self.color("Snapshot Diff Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let new_name = config.new_path.as_deref().unwrap_or("new");
        let old_name = config.old_path.as_deref().unwrap_or("old");
        lines.push(format!(
            "{}  {} → {}",
            self.color("Files:", "cyan"),
            old_name,
            new_name
        ));
        if let Some(key) = &config.key {
            lines.push(format!("{}  {}", self.color("Key:", "cyan"), key));
        }

        lines.push(String::new());
        lines.push(self.color("Changes:", "bold"));

        if matches!(output, DiffOutput::Empty) {
            lines.push(format!(
                "  {}",
                self.color("New snapshot is empty, nothing to diff", "dim")
            ));
            return Ok(lines.join("\n"));
        }

        let mut any = false;
        for state in [RowState::Added, RowState::Deleted, RowState::Modified] {
            let count = output.state_count(state);
            if count > 0 {
                any = true;
                lines.push(format!(
                    "  {} {} {}",
                    self.color(&format!("{}{count}", state.symbol()), state_color(state)),
                    if count == 1 { "record" } else { "records" },
                    state
                ));
            }
        }
        if !any {
            lines.push(format!("  {}", self.color("No changes", "dim")));
        }

        if let Some(sort_changed) = output.sort_changed() {
            let unchanged = output.state_count(RowState::Unchanged);
            lines.push(format!(
                "  {} {} unchanged",
                self.color(&format!("{}{unchanged}", RowState::Unchanged.symbol()), "dim"),
                if unchanged == 1 { "record" } else { "records" }
            ));
            lines.push(String::new());
            let order = if sort_changed {
                self.color("changed", "yellow")
            } else {
                self.color("unchanged", "green")
            };
            lines.push(format!("{}  {}", self.color("Order:", "cyan"), order));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffLines, DiffResult, SortDiffResult, TaggedRecord};
    use crate::model::key_only;
    use serde_json::json;

    fn plain_output() -> DiffOutput {
        DiffOutput::Diff(DiffResult {
            modified_count: None,
            added_count: None,
            deleted_count: None,
            lines: DiffLines::Split {
                added_lines: vec![key_only("id", json!(1)), key_only("id", json!(2))],
                deleted_lines: vec![key_only("id", json!(3))],
                modified_lines: Vec::new(),
            },
        })
    }

    #[test]
    fn test_plain_summary() {
        let report = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&plain_output(), &ReportConfig::with_paths("b.json", "a.json"))
            .unwrap();
        assert!(report.contains("Files:  a.json → b.json"));
        assert!(report.contains("+2 records added"));
        assert!(report.contains("-1 record deleted"));
        assert!(!report.contains("modified"));
        assert!(!report.contains("Order:"));
        assert!(!report.contains('\x1b'));
    }

    #[test]
    fn test_sort_summary() {
        let output = DiffOutput::Sort(SortDiffResult {
            modified_count: None,
            added_count: None,
            deleted_count: None,
            sort_changed: true,
            lines: vec![
                TaggedRecord::new(RowState::Unchanged, key_only("id", json!(2))),
                TaggedRecord::new(RowState::Unchanged, key_only("id", json!(1))),
            ],
        });
        let report = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&output, &ReportConfig::default())
            .unwrap();
        assert!(report.contains("No changes"));
        assert!(report.contains("=2 records unchanged"));
        assert!(report.contains("Order:  changed"));
    }

    #[test]
    fn test_empty_summary() {
        let report = SummaryReporter::new()
            .no_color()
            .generate_diff_report(&DiffOutput::Empty, &ReportConfig::default())
            .unwrap();
        assert!(report.contains("nothing to diff"));
    }

    #[test]
    fn test_colored_summary() {
        let report = SummaryReporter::new()
            .generate_diff_report(&plain_output(), &ReportConfig::default())
            .unwrap();
        assert!(report.contains("\x1b[32m+2\x1b[0m"));
    }
}
