//! Error types for installer operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the installer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Per-package install failures and optional import failures are NOT errors;
//!   they are recorded in reports and surfaced as warnings
//! - Use `SetupError` for conditions that end the run with a failure exit code
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No usable Python interpreter could be located.
    #[error("No Python interpreter found (tried: {candidates})")]
    InterpreterNotFound { candidates: String },

    /// The interpreter ran but its version could not be determined.
    #[error("Could not determine Python version: {message}")]
    RuntimeProbeFailed { message: String },

    /// The runtime is older than the minimum supported version.
    #[error("Python {minimum} or higher is required (found {found})")]
    UnsupportedRuntime { found: String, minimum: String },

    /// Both the primary and the minimal manifest failed to install.
    #[error("Installing {primary} and {minimal} both failed: {message}")]
    ManifestInstallFailed {
        primary: String,
        minimal: String,
        message: String,
    },

    /// One or more critical modules cannot be imported after installation.
    #[error("Critical modules failed to install: {}", modules.join(", "))]
    CriticalModulesMissing { modules: Vec<String> },

    /// External command could not be started (missing binary, no permission).
    #[error("Could not run {command}: {reason}")]
    SpawnFailed { command: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, SetupError>;
