//! JSON report generator.
//!
//! Emits the diff result object as-is, so the report is exactly what a
//! library caller would get back.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffOutput;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        output: &DiffOutput,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(output)
        } else {
            serde_json::to_string(output)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffLines, DiffResult};
    use crate::model::key_only;
    use serde_json::json;

    fn output() -> DiffOutput {
        DiffOutput::Diff(DiffResult {
            modified_count: None,
            added_count: Some(1),
            deleted_count: None,
            lines: DiffLines::Split {
                added_lines: vec![key_only("id", json!(7))],
                deleted_lines: Vec::new(),
                modified_lines: Vec::new(),
            },
        })
    }

    #[test]
    fn test_compact_output() {
        let report = JsonReporter::new()
            .pretty(false)
            .generate_diff_report(&output(), &ReportConfig::default())
            .unwrap();
        assert_eq!(
            report,
            r#"{"addedCount":1,"addedLines":[{"id":7}],"deletedLines":[],"modifiedLines":[]}"#
        );
    }

    #[test]
    fn test_pretty_output_parses_back() {
        let report = JsonReporter::new()
            .generate_diff_report(&output(), &ReportConfig::default())
            .unwrap();
        assert!(report.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["addedLines"][0]["id"], 7);
    }
}
