//! Default configuration values.
//!
//! These functions back the `#[serde(default = "...")]` attributes on the configuration
//! structs so a partially written `config.toml` still yields a complete [`CoreConfig`].
//!
//! [`CoreConfig`]: super::CoreConfig

use super::types::{CaptureConfig, LoggingConfig};
use std::path::PathBuf;

/// Capture widths offered on first run, largest first.
pub const DEFAULT_CANDIDATE_WIDTHS: [u32; 7] = [2160, 1440, 1080, 720, 480, 360, 240];

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

/// File logging is disabled unless configured.
pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_candidate_widths() -> Vec<u32> {
    DEFAULT_CANDIDATE_WIDTHS.to_vec()
}

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(crate) fn default_capture_config() -> CaptureConfig {
    CaptureConfig { candidate_widths: default_candidate_widths() }
}
