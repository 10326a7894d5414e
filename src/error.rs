//! Error types for conkytext operations.
//!
//! This module defines [`ConkyError`], the error type used by engine
//! construction, configuration loading and the CLI, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - Template evaluation never returns an error; failures degrade to
//!   display sentinels (`""`, `"0"`, `"0B"`) or verbatim passthrough
//! - Use `ConkyError` for construction and loading failures
//! - Use `anyhow::Error` (via `ConkyError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for conkytext operations.
#[derive(Debug, Error)]
pub enum ConkyError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Failed to parse a metric snapshot file.
    #[error("Failed to parse metric snapshot at {path}: {message}")]
    SnapshotParseError { path: PathBuf, message: String },

    /// Template slot outside `template0`..`template9`.
    #[error("Invalid template slot {slot}: expected 0-9")]
    InvalidTemplateSlot { slot: usize },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for conkytext operations.
pub type Result<T> = std::result::Result<T, ConkyError>;
