//! Core error types for chronogate-core.
//!
//! The governance engine itself never fails for well-typed input. Errors only
//! arise at the boundary: parsing clock times, dates and profile values, and
//! loading or saving configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for chronogate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
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

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Clock time not in `HH:MM` form or out of range
    #[error("Invalid clock time '{0}': expected HH:MM with hours 0-47 and minutes 0-59")]
    InvalidClockTime(String),

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be later than start ({start})")]
    InvalidTimeRange { start: String, end: String },

    /// Calendar date not in `YYYY-MM-DD` form
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Unknown enumeration value
    #[error("Unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownValue {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
