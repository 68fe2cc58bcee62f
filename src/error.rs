//! Unified error types for keyed-diff.
//!
//! The reconciliation core itself never fails; errors come from option
//! resolution and from the surfaces that feed records into it (snapshot
//! parsing, typed-record conversion, file access).

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for keyed-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum KeyedDiffError {
    /// Options failed validation before any matching took place
    #[error("Invalid configuration: {context}")]
    Config {
        context: String,
        #[source]
        source: ConfigError,
    },

    /// A snapshot could not be parsed into records
    #[error("Failed to parse snapshot: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// A typed value could not be converted into a record
    #[error("Record conversion failed: {context}")]
    Record {
        context: String,
        #[source]
        source: RecordErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific snapshot parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Snapshot root must be a JSON array, found {found}")]
    NotAnArray { found: &'static str },

    #[error("Snapshot entry {index} must be a JSON object, found {found}")]
    NotAnObject { index: usize, found: &'static str },
}

/// Specific record conversion error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecordErrorKind {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Item {index} does not serialize to an object (got {found})")]
    NotAnObject { index: usize, found: &'static str },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for keyed-diff operations
pub type Result<T> = std::result::Result<T, KeyedDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl KeyedDiffError {
    /// Create a config error with context
    pub fn config(context: impl Into<String>, source: ConfigError) -> Self {
        Self::Config {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a record conversion error with context
    pub fn record(context: impl Into<String>, source: RecordErrorKind) -> Self {
        Self::Record {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for KeyedDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for KeyedDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<ConfigError> for KeyedDiffError {
    fn from(err: ConfigError) -> Self {
        Self::config(String::new(), err)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost-first, so an error raised deep in
/// the snapshot parser reads like `"loading new snapshot: entry 3: ..."`.
///
/// # Example
///
/// ```ignore
/// use keyed_diff::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<Vec<Record>> {
///     let content = std::fs::read_to_string(path)
///         .context("reading snapshot file")?;
///
///     parse_snapshot_str(&content)
///         .with_context(|| format!("parsing snapshot from {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<KeyedDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: KeyedDiffError, new_ctx: &str) -> KeyedDiffError {
    match err {
        KeyedDiffError::Config {
            context: existing,
            source,
        } => KeyedDiffError::Config {
            context: chain_context(new_ctx, &existing),
            source,
        },
        KeyedDiffError::Parse {
            context: existing,
            source,
        } => KeyedDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        KeyedDiffError::Record {
            context: existing,
            source,
        } => KeyedDiffError::Record {
            context: chain_context(new_ctx, &existing),
            source,
        },
        KeyedDiffError::Io {
            path,
            message,
            source,
        } => KeyedDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KeyedDiffError::parse(
            "new snapshot",
            ParseErrorKind::NotAnArray { found: "object" },
        );
        let display = err.to_string();
        assert!(
            display.contains("parse") && display.contains("new snapshot"),
            "Error message should mention parsing and context: {}",
            display
        );

        let err = KeyedDiffError::config(
            "resolving options",
            ConfigError::new("key", "must be a non-empty string"),
        );
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = KeyedDiffError::io("/path/to/new.json", io_err);

        assert!(err.to_string().contains("/path/to/new.json"));
    }

    #[test]
    fn test_config_error_source_is_preserved() {
        let err: KeyedDiffError = ConfigError::new("key", "must be a non-empty string").into();
        let source = std::error::Error::source(&err).expect("config error has a source");
        assert_eq!(source.to_string(), "key: must be a non-empty string");
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(KeyedDiffError::parse(
                "entry 3",
                ParseErrorKind::NotAnObject {
                    index: 3,
                    found: "string",
                },
            ))
        }

        fn middle() -> Result<()> {
            inner().context("parsing snapshot")
        }

        fn outer() -> Result<()> {
            middle().context("loading new snapshot")
        }

        match outer() {
            Err(KeyedDiffError::Parse { context, .. }) => {
                assert_eq!(context, "loading new snapshot: parsing snapshot: entry 3");
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> =
            Err(ConfigError::new("fields", "unknown count field").into());
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
        assert_eq!(
            chain_context("outer", "middle: inner"),
            "outer: middle: inner"
        );
    }
}
