//! # Error Types
//!
//! Structured error types for cost_core. Errors serialize to JSON so that
//! HTTP handlers, report renderers and the CLI can all surface the same
//! structured payload.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_length(length_ft: f64) -> EstimateResult<()> {
//!     if length_ft <= 0.0 {
//!         return Err(EstimateError::invalid_input(
//!             "length",
//!             length_ft.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-5.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cost_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation and storage operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input value is invalid (non-positive dimension, unknown enum value, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Total cost is zero or non-finite, so ratios against it are undefined
    #[error("Degenerate aggregate: total cost is {total_cost}, cannot compute {metric}")]
    DegenerateAggregate { total_cost: f64, metric: String },

    /// Square footage is zero or non-finite
    #[error("Degenerate geometry: square footage is {square_footage}, cannot compute {metric}")]
    DegenerateGeometry { square_footage: f64, metric: String },

    /// Material not found in the reference catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// No stored project with this identifier
    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    /// Stored calculations differ from a fresh recomputation
    #[error("Cached calculations for project {id} diverge from recomputation at '{field}'")]
    CacheMismatch { id: String, field: String },

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

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DegenerateAggregate error
    pub fn degenerate_aggregate(total_cost: f64, metric: impl Into<String>) -> Self {
        EstimateError::DegenerateAggregate {
            total_cost,
            metric: metric.into(),
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate_geometry(square_footage: f64, metric: impl Into<String>) -> Self {
        EstimateError::DegenerateGeometry {
            square_footage,
            metric: metric.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        EstimateError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a ProjectNotFound error
    pub fn project_not_found(id: impl ToString) -> Self {
        EstimateError::ProjectNotFound { id: id.to_string() }
    }

    /// Create a CacheMismatch error
    pub fn cache_mismatch(id: impl ToString, field: impl Into<String>) -> Self {
        EstimateError::CacheMismatch {
            id: id.to_string(),
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        EstimateError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EstimateError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::DegenerateAggregate { .. } => "DEGENERATE_AGGREGATE",
            EstimateError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            EstimateError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            EstimateError::ProjectNotFound { .. } => "PROJECT_NOT_FOUND",
            EstimateError::CacheMismatch { .. } => "CACHE_MISMATCH",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::FileLocked { .. } => "FILE_LOCKED",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(e: serde_json::Error) -> Self {
        EstimateError::SerializationError {
            reason: e.to_string(),
        }
    }
}
