//! Error handling for the ScreenRec core layer.
//!
//! This module defines the error types shared by the core crate using the
//! `thiserror` crate. The main error type is [`CoreError`], which wraps the
//! more specific [`ConfigError`] and [`LoggingError`].
//!
//! # Examples
//!
//! ```rust
//! use screenrec_core::error::{CoreError, ConfigError};
//!
//! fn check_widths(widths: &[u32]) -> Result<(), CoreError> {
//!     if widths.iter().all(|w| *w == 0) && !widths.is_empty() {
//!         return Err(ConfigError::ValidationError("all widths are zero".to_string()).into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_widths(&[0, 0]).is_err());
//! assert!(check_widths(&[1080]).is_ok());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the ScreenRec core layer.
///
/// This enum represents all errors that can occur in the core layer. It is
/// usually produced by wrapping one of the more specific error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while setting up the logging system.
    #[error("Logging Initialization Failed: {0}")]
    Logging(#[from] LoggingError),

    /// Filesystem operations such as creating the log directory.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a configuration file failed for a reason other than absence.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Parsed configuration values are out of range or inconsistent.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A required base directory (XDG config or state home) could not be determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging-related operations.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Setting up the global subscriber failed.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),

    /// The configured level could not be turned into a log filter.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),
}
