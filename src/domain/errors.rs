//! Domain error types
//!
//! This module defines the error hierarchy for Carebook. Every fault carries a
//! machine-readable kind (see [`CarebookError::kind`]) and a human-readable
//! detail. Errors never expose third-party types.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Main Carebook error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum CarebookError {
    /// One or more record fields violate the schema
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// The requested patient identifier does not exist
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// The patient identifier already exists
    #[error("Patient already exists: {0}")]
    Conflict(String),

    /// A query argument is outside its enumerated set
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing store could not be read or written
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Persisted content violates the record schema
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CarebookError {
    /// Machine-readable kind of the error
    pub fn kind(&self) -> &'static str {
        match self {
            CarebookError::Validation(_) => "validation_error",
            CarebookError::NotFound(_) => "not_found",
            CarebookError::Conflict(_) => "conflict",
            CarebookError::InvalidArgument(_) => "invalid_argument",
            CarebookError::StoreUnavailable(_) => "store_unavailable",
            CarebookError::CorruptData(_) => "corrupt_data",
            CarebookError::Configuration(_) => "configuration_error",
            CarebookError::Serialization(_) => "serialization_error",
        }
    }
}

/// A single field-level constraint violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,

    /// What is wrong with it
    pub message: String,
}

impl FieldError {
    /// Creates a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Aggregate of every field that failed validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Creates an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation for `field`
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Appends every violation from `other`
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    /// Returns true when no violation was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field-level errors in the order they were found
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns true when `field` has at least one violation
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CarebookError {
    fn from(err: serde_json::Error) -> Self {
        CarebookError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CarebookError {
    fn from(err: toml::de::Error) -> Self {
        CarebookError::Configuration(format!("TOML parse error: {err}"))
    }
}
