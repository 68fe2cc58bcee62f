//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// The diff result as JSON
    #[default]
    Json,
    /// Brief summary output
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Context passed to report generators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Where the new snapshot was read from
    pub new_path: Option<String>,
    /// Where the old snapshot was read from
    pub old_path: Option<String>,
    /// Key field records were matched on
    pub key: Option<String>,
}

impl ReportConfig {
    /// Config carrying the snapshot paths
    pub fn with_paths(new_path: impl Into<String>, old_path: impl Into<String>) -> Self {
        Self {
            new_path: Some(new_path.into()),
            old_path: Some(old_path.into()),
            key: None,
        }
    }
}
