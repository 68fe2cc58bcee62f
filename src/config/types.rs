//! Configuration types for keyed-diff operations.
//!
//! [`DiffOptions`] is what library callers pass to the diff entry points.
//! [`OptionsFile`] is its serializable counterpart for YAML option files and
//! CLI flags, and [`DiffConfig`] bundles everything the `diff` command needs.

use super::defaults::{
    ADDED_COUNT, DEFAULT_DETECTOR, DEFAULT_IS_SPLIT, DEFAULT_KEY, DELETED_COUNT, MODIFIED_COUNT,
};
use super::validation::{ConfigError, Validatable};
use crate::diff::{builtin_detector, ChangeDetector};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Change-detector references
// ============================================================================

/// How the caller names the change-detector to use.
#[derive(Clone)]
pub enum DetectorRef {
    /// One of the built-in detectors, looked up by name at resolution time
    Named(String),
    /// A caller-supplied detector
    Custom(Arc<dyn ChangeDetector>),
}

impl fmt::Debug for DetectorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Custom(detector) => f.debug_tuple("Custom").field(&detector.name()).finish(),
        }
    }
}

// ============================================================================
// Count field selection
// ============================================================================

/// Which counts appear in a diff result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CountFields {
    /// Emit `modifiedCount`
    pub modified_count: bool,
    /// Emit `addedCount`
    pub added_count: bool,
    /// Emit `deletedCount`
    pub deleted_count: bool,
}

impl CountFields {
    /// No counts.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            modified_count: false,
            added_count: false,
            deleted_count: false,
        }
    }

    /// All three counts.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            modified_count: true,
            added_count: true,
            deleted_count: true,
        }
    }

    /// Parse a list of count names such as `["addedCount", "deletedCount"]`.
    ///
    /// Snake-case spellings (`added_count`) are accepted as well.
    pub fn from_names<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::none();
        for name in names {
            match name.as_ref().trim() {
                MODIFIED_COUNT | "modified_count" => fields.modified_count = true,
                ADDED_COUNT | "added_count" => fields.added_count = true,
                DELETED_COUNT | "deleted_count" => fields.deleted_count = true,
                other => {
                    return Err(ConfigError::new(
                        "fields",
                        format!(
                            "Unknown count field '{}'. Valid options: {}, {}, {}",
                            other, MODIFIED_COUNT, ADDED_COUNT, DELETED_COUNT
                        ),
                    ))
                }
            }
        }
        Ok(fields)
    }

    /// Names of the selected counts, in result order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.modified_count, MODIFIED_COUNT),
            (self.added_count, ADDED_COUNT),
            (self.deleted_count, DELETED_COUNT),
        ]
        .into_iter()
        .filter_map(|(selected, name)| selected.then_some(name))
        .collect()
    }

    /// True when no count is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.modified_count && !self.added_count && !self.deleted_count
    }
}

// ============================================================================
// Caller options
// ============================================================================

/// Options accepted by [`diff`](crate::diff::diff) and
/// [`diff_with_sort`](crate::diff::diff_with_sort).
///
/// Every field is optional; unset fields take their defaults during
/// [`resolve`](DiffOptions::resolve).
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct DiffOptions {
    /// Field used to match records across snapshots (default `"id"`)
    pub key: Option<String>,
    /// Change-detector (default: field-wise comparison)
    pub get_changed_item: Option<DetectorRef>,
    /// Counts to include in the result (default: none)
    pub fields: Option<CountFields>,
    /// Split output by row state (default `true`, ignored by the sort-aware diff)
    pub is_split: Option<bool>,
}

impl DiffOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key field.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Use a caller-supplied change-detector.
    pub fn detector(mut self, detector: impl ChangeDetector + 'static) -> Self {
        self.get_changed_item = Some(DetectorRef::Custom(Arc::new(detector)));
        self
    }

    /// Use a built-in change-detector by name.
    pub fn detector_named(mut self, name: impl Into<String>) -> Self {
        self.get_changed_item = Some(DetectorRef::Named(name.into()));
        self
    }

    /// Select which counts are emitted.
    pub const fn fields(mut self, fields: CountFields) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Choose split or unified output.
    pub const fn is_split(mut self, is_split: bool) -> Self {
        self.is_split = Some(is_split);
        self
    }

    /// Fill unset options from defaults and validate the result.
    ///
    /// Fails with the first validation error; nothing is matched until this
    /// succeeds.
    pub fn resolve(&self) -> Result<ResolvedOptions, ConfigError> {
        if let Some(error) = self.validate().into_iter().next() {
            return Err(error);
        }

        let key = self.key.clone().unwrap_or_else(|| DEFAULT_KEY.to_string());
        let detector = match &self.get_changed_item {
            Some(DetectorRef::Custom(detector)) => Arc::clone(detector),
            Some(DetectorRef::Named(name)) => builtin_detector(name, &key)
                .ok_or_else(|| unknown_detector_error(name))?,
            None => builtin_detector(DEFAULT_DETECTOR, &key)
                .ok_or_else(|| unknown_detector_error(DEFAULT_DETECTOR))?,
        };

        let resolved = ResolvedOptions {
            key,
            detector,
            fields: self.fields.unwrap_or_default(),
            is_split: self.is_split.unwrap_or(DEFAULT_IS_SPLIT),
        };
        tracing::debug!(
            key = %resolved.key,
            detector = resolved.detector.name(),
            fields = ?resolved.fields.names(),
            is_split = resolved.is_split,
            "Resolved diff options"
        );
        Ok(resolved)
    }
}

pub(super) fn unknown_detector_error(name: &str) -> ConfigError {
    ConfigError::new(
        "get_changed_item",
        format!(
            "'{}' is not a callable change-detector. Valid options: {}",
            name,
            crate::diff::BUILTIN_DETECTORS.join(", ")
        ),
    )
}

/// Options with every default applied, ready for the engine.
#[derive(Clone)]
pub struct ResolvedOptions {
    /// Key field name, never empty
    pub key: String,
    /// Change-detector invoked for every matched pair
    pub detector: Arc<dyn ChangeDetector>,
    /// Counts to include in the result
    pub fields: CountFields,
    /// Split output by row state
    pub is_split: bool,
}

impl fmt::Debug for ResolvedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOptions")
            .field("key", &self.key)
            .field("detector", &self.detector.name())
            .field("fields", &self.fields)
            .field("is_split", &self.is_split)
            .finish()
    }
}

// ============================================================================
// Option files
// ============================================================================

/// Diff options as written in a `.keyed-diff.yaml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OptionsFile {
    /// Field used to match records across snapshots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Built-in change-detector: fieldwise, whole-record or never
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detector: Option<String>,
    /// Counts to include: addedCount, modifiedCount, deletedCount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// Split output into addedLines/deletedLines/modifiedLines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_split: Option<bool>,
    /// Use the sort-aware diff
    pub sort: bool,
}

impl OptionsFile {
    /// Convert into library options, validating count names.
    pub fn to_diff_options(&self) -> Result<DiffOptions, ConfigError> {
        let fields = self
            .fields
            .as_ref()
            .map(CountFields::from_names)
            .transpose()?;
        Ok(DiffOptions {
            key: self.key.clone(),
            get_changed_item: self.detector.clone().map(DetectorRef::Named),
            fields,
            is_split: self.is_split,
        })
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for the `diff` command
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Snapshot paths to compare
    pub paths: DiffPaths,
    /// Diff options (file settings merged with CLI flags)
    pub options: OptionsFile,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl DiffConfig {
    /// Start building a diff configuration for two snapshot files.
    pub fn builder(new: impl Into<PathBuf>, old: impl Into<PathBuf>) -> DiffConfigBuilder {
        DiffConfigBuilder {
            config: Self {
                paths: DiffPaths {
                    new: new.into(),
                    old: old.into(),
                },
                options: OptionsFile::default(),
                output: OutputConfig::default(),
                behavior: BehaviorConfig::default(),
            },
        }
    }
}

/// Paths for a diff operation. `-` reads the snapshot from stdin.
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the new snapshot
    pub new: PathBuf,
    /// Path to the old snapshot
    pub old: PathBuf,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (stdout if not specified)
    pub file: Option<PathBuf>,
    /// Emit single-line JSON
    pub compact: bool,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes are detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Report every old record as deleted when the new snapshot is empty
    pub report_deletions: bool,
}

/// Builder for [`DiffConfig`].
#[derive(Debug)]
#[must_use]
pub struct DiffConfigBuilder {
    config: DiffConfig,
}

impl DiffConfigBuilder {
    /// Set the diff options.
    pub fn options(mut self, options: OptionsFile) -> Self {
        self.config.options = options;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Emit single-line JSON.
    pub const fn compact(mut self, compact: bool) -> Self {
        self.config.output.compact = compact;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Report deletions when the new snapshot is empty.
    pub const fn report_deletions(mut self, report: bool) -> Self {
        self.config.behavior.report_deletions = report;
        self
    }

    /// Build the `DiffConfig`.
    #[must_use]
    pub fn build(self) -> DiffConfig {
        self.config
    }
}
