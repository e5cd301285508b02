//! # Error Types
//!
//! Structured error types for jet_core. Errors carry enough context for a
//! caller (CLI, HTTP adapter, test harness) to tell the user which field was
//! wrong and why, and to pick a presentation (e.g. HTTP 400 for validation).
//!
//! ## Taxonomy
//!
//! - **Validation**: [`JetError::InvalidInput`], [`JetError::MissingField`],
//!   [`JetError::UnknownEngine`]. Raw input failed a sanity check.
//! - **Computation**: [`JetError::Computation`]. An internal invariant was
//!   violated (e.g. a zero reference density). Signals a bug, not user error.
//! - **Logbook I/O**: file, lock, serialization and schema version errors.
//!
//! Advisory conditions are not errors; they are attached to a successful
//! result as warnings.
//!
//! ## Example
//!
//! ```rust
//! use jet_core::errors::{JetError, JetResult};
//!
//! fn validate_humidity(humidity_pct: f64) -> JetResult<()> {
//!     if !(0.0..=100.0).contains(&humidity_pct) {
//!         return Err(JetError::InvalidInput {
//!             field: "humidity_pct".to_string(),
//!             value: humidity_pct.to_string(),
//!             reason: "Relative humidity must be between 0 and 100 %".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_humidity(101.0).unwrap_err().is_validation());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for jet_core operations
pub type JetResult<T> = Result<T, JetError>;

/// Structured error type for jetting operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum JetError {
    /// An input value is invalid (out of range, non-numeric, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Engine profile name not recognised
    #[error("Unknown engine profile: {name}")]
    UnknownEngine { name: String },

    /// An internal invariant of the physical model was violated
    #[error("Computation failed in {stage}: {reason}")]
    Computation { stage: String, reason: String },

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

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Logbook schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// No logbook entry with the given id
    #[error("Logbook entry not found: {id}")]
    EntryNotFound { id: String },
}

impl JetError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        JetError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        JetError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownEngine error
    pub fn unknown_engine(name: impl Into<String>) -> Self {
        JetError::UnknownEngine { name: name.into() }
    }

    /// Create a Computation error
    pub fn computation(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        JetError::Computation {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        JetError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        JetError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// True for errors caused by bad caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            JetError::InvalidInput { .. } | JetError::MissingField { .. } | JetError::UnknownEngine { .. }
        )
    }

    /// True for violated internal invariants of the physical model.
    pub fn is_computation(&self) -> bool {
        matches!(self, JetError::Computation { .. })
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, JetError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            JetError::InvalidInput { .. } => "INVALID_INPUT",
            JetError::MissingField { .. } => "MISSING_FIELD",
            JetError::UnknownEngine { .. } => "UNKNOWN_ENGINE",
            JetError::Computation { .. } => "COMPUTATION_ERROR",
            JetError::FileError { .. } => "FILE_ERROR",
            JetError::FileLocked { .. } => "FILE_LOCKED",
            JetError::SerializationError { .. } => "SERIALIZATION_ERROR",
            JetError::VersionMismatch { .. } => "VERSION_MISMATCH",
            JetError::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
        }
    }
}
