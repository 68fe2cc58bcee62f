//! Configuration validation for keyed-diff.
//!
//! Provides the validation trait and its implementations for caller options
//! and option files.

use super::types::{unknown_detector_error, CountFields, DetectorRef, DiffOptions, OptionsFile};
use crate::diff::BUILTIN_DETECTORS;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The option that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    /// Create a new configuration error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

fn validate_key(key: Option<&str>, errors: &mut Vec<ConfigError>) {
    if key.is_some_and(str::is_empty) {
        errors.push(ConfigError::new("key", "must be a non-empty string"));
    }
}

fn validate_detector_name(name: &str, errors: &mut Vec<ConfigError>) {
    if !BUILTIN_DETECTORS.contains(&name) {
        errors.push(unknown_detector_error(name));
    }
}

impl Validatable for DiffOptions {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        validate_key(self.key.as_deref(), &mut errors);

        // Custom detectors are callable by construction
        if let Some(DetectorRef::Named(name)) = &self.get_changed_item {
            validate_detector_name(name, &mut errors);
        }

        errors
    }
}

impl Validatable for OptionsFile {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        validate_key(self.key.as_deref(), &mut errors);

        if let Some(ref detector) = self.detector {
            validate_detector_name(detector, &mut errors);
        }

        if let Some(ref fields) = self.fields {
            if let Err(e) = CountFields::from_names(fields) {
                errors.push(e);
            }
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
