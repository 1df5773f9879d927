//! # Error Types
//!
//! Structured error types for calc_core. The footing formulas themselves
//! never fail; errors come from the layers around them: table construction,
//! input validation requested by a caller, phase 8 height counts, project
//! files and configuration.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_floors(floors: u32) -> CalcResult<()> {
//!     if floors == 0 {
//!         return Err(CalcError::invalid_input(
//!             "floors",
//!             floors.to_string(),
//!             "Building must have at least one floor",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Serializes as `{"type": "...", "details": {...}}` so API consumers can
/// branch on the variant without parsing the message.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A lookup table is malformed (missing fallback entry, bad coefficient)
    #[error("Invalid {table} table: {reason}")]
    InvalidTable { table: String, reason: String },

    /// Number of individual footing heights does not match the footing count
    #[error("Footing count mismatch: {expected} footings declared, {actual} heights given")]
    CountMismatch { expected: u32, actual: usize },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Configuration could not be located or applied
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidTable error
    pub fn invalid_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidTable {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidTable { .. } => "INVALID_TABLE",
            CalcError::CountMismatch { .. } => "COUNT_MISMATCH",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("slab_area_m2", "-5", "Slab area must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("soil_type").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::invalid_table("soil", "no 'other' entry").error_code(), "INVALID_TABLE");
        assert_eq!(
            CalcError::CountMismatch { expected: 3, actual: 2 }.error_code(),
            "COUNT_MISMATCH"
        );
    }

    #[test]
    fn test_count_mismatch_message() {
        let error = CalcError::CountMismatch { expected: 3, actual: 2 };
        assert_eq!(
            error.to_string(),
            "Footing count mismatch: 3 footings declared, 2 heights given"
        );
    }

    #[test]
    fn test_version_mismatch_code() {
        let error = CalcError::VersionMismatch {
            file_version: "2.0.0".to_string(),
            expected_version: "0.1.0".to_string(),
        };
        assert_eq!(error.error_code(), "VERSION_MISMATCH");
        assert!(error.to_string().contains("2.0.0"));
    }

    #[test]
    fn test_only_locks_are_recoverable() {
        assert!(CalcError::file_locked("a.ftg", "someone", "now").is_recoverable());
        assert!(!CalcError::config("missing").is_recoverable());
    }
}
