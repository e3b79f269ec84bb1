//! Configuration loading.
//!
//! [`ConfigLoader`] locates `config.toml`, parses it into a [`CoreConfig`] and validates
//! the result. A missing file is not an error: the defaults are used instead.
//!
//! ## Validation
//!
//! - Log level and format are checked and normalised to lower case.
//! - A relative log file path is resolved against the application state directory and
//!   its parent directory is created.
//! - Candidate capture widths drop zero entries, are sorted largest first and deduplicated.
//!
//! ```rust,ignore
//! use screenrec_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("Logging level: {}", config.logging.level),
//!     Err(e) => {
//!         screenrec_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration loading failed: {}", e);
//!     }
//! }
//! ```

use std::path::Path;

use tracing::debug;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as sr_fs;
use crate::utils::paths::{get_app_config_file, get_app_state_dir};

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 2] = ["text", "json"];

/// Namespace for loading and validating [`CoreConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `config.toml` from the application config directory.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DirectoryUnavailable`] if the config directory cannot be resolved.
    /// - [`ConfigError::ReadError`] for I/O failures other than a missing file.
    /// - [`ConfigError::ParseError`] for malformed TOML or unknown fields.
    /// - [`ConfigError::ValidationError`] or [`CoreError::Filesystem`] from validation.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let config_path = get_app_config_file()?;
        Self::load_from_path(&config_path)
    }

    /// Loads and validates the configuration stored at `path`.
    ///
    /// A missing file yields the validated defaults.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let content = sr_fs::read_optional_to_string(path).map_err(|e| {
            CoreError::Config(ConfigError::ReadError { path: path.to_path_buf(), source: e })
        })?;
        match content {
            Some(content) => {
                debug!("Loading configuration from {:?}", path);
                Self::load_from_str(&content)
            }
            None => {
                debug!("No configuration file at {:?}, using defaults", path);
                let mut config = CoreConfig::default();
                Self::validate_config(&mut config)?;
                Ok(config)
            }
        }
    }

    /// Parses and validates a TOML document. Blank input yields the defaults.
    pub fn load_from_str(content: &str) -> Result<CoreConfig, CoreError> {
        let mut config: CoreConfig = if content.trim().is_empty() {
            CoreConfig::default()
        } else {
            toml::from_str(content).map_err(ConfigError::ParseError)?
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let needs_state_dir = config
            .logging
            .file_path
            .as_ref()
            .map_or(false, |p| p.is_relative());
        if needs_state_dir {
            let state_dir = get_app_state_dir()?;
            Self::validate_config_with_state_dir(config, &state_dir)
        } else {
            Self::validate_config_with_state_dir(config, Path::new(""))
        }
    }

    /// Validation with an explicit base for relative log paths.
    fn validate_config_with_state_dir(config: &mut CoreConfig, state_dir: &Path) -> Result<(), CoreError> {
        let level = config.logging.level.to_lowercase();
        if !VALID_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                config.logging.level
            ))
            .into());
        }
        config.logging.level = level;

        let format = config.logging.format.to_lowercase();
        if !VALID_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log format: '{}'. Must be one of text, json.",
                config.logging.format
            ))
            .into());
        }
        config.logging.format = format;

        if let Some(log_path) = config.logging.file_path.take() {
            let resolved = if log_path.is_absolute() { log_path } else { state_dir.join(log_path) };
            sr_fs::ensure_parent_dir_exists(&resolved)?;
            config.logging.file_path = Some(resolved);
        }

        let widths = &mut config.capture.candidate_widths;
        widths.retain(|w| *w > 0);
        widths.sort_unstable_by(|a, b| b.cmp(a));
        widths.dedup();

        Ok(())
    }
}
