//! Report output stage.

use crate::config::{DiffConfig, DEFAULT_KEY};
use crate::diff::DiffOutput;
use crate::reports::{create_reporter_with_options, ReportConfig};
use anyhow::{Context, Result};

use super::{should_use_color, write_output, OutputTarget};

/// Render a diff output in the configured format.
pub fn render_report(config: &DiffConfig, output: &DiffOutput, use_color: bool) -> Result<String> {
    let report_config = ReportConfig {
        new_path: Some(config.paths.new.to_string_lossy().to_string()),
        old_path: Some(config.paths.old.to_string_lossy().to_string()),
        key: Some(
            config
                .options
                .key
                .clone()
                .unwrap_or_else(|| DEFAULT_KEY.to_string()),
        ),
    };

    let reporter = create_reporter_with_options(
        config.output.format,
        use_color,
        config.output.compact,
    );
    reporter
        .generate_diff_report(output, &report_config)
        .with_context(|| format!("Failed to generate {} report", config.output.format))
}

/// Output a diff report to the configured destination.
///
/// Color is only used for terminal stdout.
pub fn output_report(config: &DiffConfig, output: &DiffOutput) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color) && output_target.is_terminal();

    let report = render_report(config, output, use_color)?;
    write_output(&report, &output_target, config.behavior.quiet)
}
