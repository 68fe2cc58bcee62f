//! Option resolution for keyed-diff.
//!
//! This module turns caller options into concrete engine settings:
//! - [`DiffOptions`] with every field optional, filled from defaults by
//!   [`DiffOptions::resolve`]
//! - Validation through the [`Validatable`] trait, reported as [`ConfigError`]
//! - YAML option files with discovery and CLI merging ([`file`])
//!
//! # Quick Start
//!
//! ```rust
//! use keyed_diff::config::{CountFields, DiffOptions};
//!
//! let resolved = DiffOptions::new()
//!     .key("sku")
//!     .fields(CountFields::all())
//!     .is_split(false)
//!     .resolve()
//!     .expect("valid options");
//!
//! assert_eq!(resolved.key, "sku");
//! ```
//!
//! # Option File
//!
//! Place a `.keyed-diff.yaml` file in your project root or `~/.config/keyed-diff/`:
//!
//! ```yaml
//! key: sku
//! detector: whole-record
//! fields: [addedCount, deletedCount]
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ADDED_COUNT, DEFAULT_DETECTOR, DEFAULT_IS_SPLIT, DEFAULT_KEY, DELETED_COUNT, MODIFIED_COUNT,
};
pub use types::{
    BehaviorConfig, CountFields, DetectorRef, DiffConfig, DiffConfigBuilder, DiffOptions,
    DiffPaths, OptionsFile, OutputConfig, ResolvedOptions,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the option file format.
///
/// Editors can use it to validate and autocomplete `.keyed-diff.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(OptionsFile);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
