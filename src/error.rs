//! Error types for slsctl operations.
//!
//! This module defines [`SlsError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The classifier never surfaces these to its callers: failures become
//!   the `Error` status or a `false` return at its public boundary
//! - Settings, installer and CLI code propagate `SlsError` with `?`
//! - Use `anyhow::Error` (via `SlsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for slsctl operations.
#[derive(Debug, Error)]
pub enum SlsError {
    /// A configuration file was not found at its expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The configuration parsed, but is not a YAML mapping.
    #[error("Invalid config format at {path}: expected a YAML mapping")]
    InvalidConfigFormat { path: PathBuf },

    /// The invoking user's home directory could not be determined.
    #[error("Could not determine the home directory")]
    HomeNotFound,

    /// The installer directory or its setup script is missing.
    #[error("SLSsteam installation files not found in {path}")]
    InstallerUnavailable { path: PathBuf },

    /// A shell command could not be started or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error wrapper.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for slsctl operations.
pub type Result<T> = std::result::Result<T, SlsError>;
