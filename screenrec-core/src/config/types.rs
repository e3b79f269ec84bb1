//! Configuration data structures.
//!
//! [`CoreConfig`] is the root of `config.toml`. Every section and field is defaulted
//! through [`super::defaults`], and unknown fields are rejected with
//! `#[serde(deny_unknown_fields)]` so typos surface as parse errors instead of being
//! silently ignored.

use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the logging subsystem, consumed by [`crate::logging::init_logging`].
///
/// # Examples
///
/// ```
/// use screenrec_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let log_config: LoggingConfig = toml::from_str(r#"
/// level = "debug"
/// file_path = "/var/log/screenrec.log"
/// format = "json"
/// "#).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/screenrec.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths resolve against the application state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Settings for capture sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureConfig {
    /// Capture widths considered when a resolution is first chosen for a device.
    ///
    /// After validation the list contains no zeros, is sorted largest first, and has
    /// no duplicates.
    #[serde(default = "defaults::default_candidate_widths")]
    pub candidate_widths: Vec<u32>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        defaults::default_capture_config()
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use screenrec_core::config::CoreConfig;
///
/// let config: CoreConfig = toml::from_str(r#"
/// [logging]
/// level = "warn"
///
/// [capture]
/// candidate_widths = [1080, 720]
/// "#).unwrap();
/// assert_eq!(config.logging.level, "warn");
/// assert_eq!(config.logging.format, "text");
/// assert_eq!(config.capture.candidate_widths, vec![1080, 720]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_capture_config")]
    pub capture: CaptureConfig,
}
