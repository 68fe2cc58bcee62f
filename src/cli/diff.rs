//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two snapshot files.

use crate::config::DiffConfig;
use crate::diff::DiffOutput;
use crate::pipeline::{
    compute_diff, exit_codes, load_snapshot, output_report, PipelineError, STDIN_PATH,
};
use anyhow::Result;
use std::path::Path;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let stdin = Path::new(STDIN_PATH);
    if config.paths.new == stdin && config.paths.old == stdin {
        anyhow::bail!("Only one snapshot can be read from stdin");
    }

    let new = load_snapshot(&config.paths.new, quiet).map_err(|source| {
        PipelineError::ParseFailed {
            path: config.paths.new.display().to_string(),
            source,
        }
    })?;
    let old = load_snapshot(&config.paths.old, quiet).map_err(|source| {
        PipelineError::ParseFailed {
            path: config.paths.old.display().to_string(),
            source,
        }
    })?;

    if !quiet {
        tracing::info!(
            "Loaded {} records from new snapshot, {} from old snapshot",
            new.len(),
            old.len()
        );
    }

    let output = compute_diff(&config, &new, &old)
        .map_err(|source| PipelineError::DiffFailed { source })?;

    let exit_code = determine_exit_code(&config, &output);

    output_report(&config, &output).map_err(|source| PipelineError::ReportFailed { source })?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on the diff output and config flags.
fn determine_exit_code(config: &DiffConfig, output: &DiffOutput) -> i32 {
    if config.behavior.fail_on_change && output.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptionsFile;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn config(new: &NamedTempFile, old: &NamedTempFile, out: &Path) -> DiffConfig {
        DiffConfig::builder(new.path(), old.path())
            .output_file(Some(out.to_path_buf()))
            .quiet(true)
            .build()
    }

    #[test]
    fn test_run_diff_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("diff.json");
        let new = snapshot(r#"[{"id": 1, "v": "b"}]"#);
        let old = snapshot(r#"[{"id": 1, "v": "a"}]"#);

        assert_eq!(run_diff(config(&new, &old, &out)).unwrap(), exit_codes::SUCCESS);

        let failing = DiffConfig {
            behavior: crate::config::BehaviorConfig {
                fail_on_change: true,
                quiet: true,
                report_deletions: false,
            },
            ..config(&new, &old, &out)
        };
        assert_eq!(run_diff(failing).unwrap(), exit_codes::CHANGES_DETECTED);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["modifiedLines"][0]["v"], "b");
    }

    #[test]
    fn test_run_diff_identical_snapshots_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("diff.json");
        let new = snapshot(r#"[{"id": 1}]"#);
        let old = snapshot(r#"[{"id": 1}]"#);
        let mut config = config(&new, &old, &out);
        config.options = OptionsFile {
            sort: true,
            ..OptionsFile::default()
        };
        config.behavior.fail_on_change = true;

        assert_eq!(run_diff(config).unwrap(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_run_diff_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("diff.json");
        let new = snapshot(r#"{"id": 1}"#);
        let old = snapshot("[]");

        let err = run_diff(config(&new, &old, &out)).unwrap_err();
        assert!(err.to_string().starts_with("Parse failed for"));
    }

    #[test]
    fn test_run_diff_rejects_double_stdin() {
        let config = DiffConfig::builder("-", "-").quiet(true).build();
        assert!(run_diff(config).is_err());
    }
}
