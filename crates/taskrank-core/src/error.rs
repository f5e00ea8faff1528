//! Core error types for taskrank-core.
//!
//! Scoring itself never fails; errors come from persisting weights,
//! loading configuration and validating raw task input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskrank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Weight persistence errors
    #[error("Weight store error: {0}")]
    Weights(#[from] WeightStoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] BatchValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// The data directory could not be determined or created
    #[error("Failed to access data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while persisting the weight record.
///
/// Loading never produces one of these; a missing or corrupt record
/// falls back to the default weights.
#[derive(Error, Debug)]
pub enum WeightStoreError {
    /// Failed to write the record
    #[error("Failed to write weights to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to take the lock guarding the record
    #[error("Failed to lock weights at {path}: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the record
    #[error("Failed to encode weights: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Required field missing or blank
    #[error("Missing required field '{0}'")]
    MissingField(String),
}

/// All validation failures for one task in a batch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TaskValidationError {
    /// Position of the task in the submitted batch.
    pub index: usize,
    pub errors: Vec<String>,
}

/// A rejected batch: every task that failed, with its position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} task(s) failed validation", .errors.len())]
pub struct BatchValidationError {
    pub errors: Vec<TaskValidationError>,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
