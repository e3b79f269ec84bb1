//! Application directory resolution.
//!
//! Resolves the per-user configuration and state directories for ScreenRec using the
//! `directories-next` crate. On Linux these follow the XDG Base Directory layout:
//!
//! - [`get_app_config_dir()`]: e.g. `~/.config/screenrec`
//! - [`get_app_state_dir()`]: e.g. `~/.local/state/screenrec`
//!
//! Both return [`CoreError::Config(ConfigError::DirectoryUnavailable)`] when the home
//! directory cannot be determined.

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "ScreenRec";
const APPLICATION: &str = "ScreenRec";
const STATE_SUBDIR: &str = "screenrec";

/// File name of the core configuration inside the application config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable { dir_type: dir_type.to_string() })
    })
}

/// Returns the application-specific configuration directory.
///
/// # Errors
/// Returns [`CoreError::Config(ConfigError::DirectoryUnavailable)`] if the base
/// configuration directory cannot be determined.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    Ok(project_dirs("App Config")?.config_dir().to_path_buf())
}

/// Returns the application-specific state directory, used for log files.
///
/// Resolves to `$XDG_STATE_HOME/screenrec` when that variable is set and non-empty,
/// otherwise `~/.local/state/screenrec`.
///
/// # Errors
/// Returns [`CoreError::Config(ConfigError::DirectoryUnavailable)`] if the home
/// directory cannot be determined.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    let base = match std::env::var("XDG_STATE_HOME") {
        Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
        _ => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".local/state"))
            .ok_or_else(|| {
                CoreError::Config(ConfigError::DirectoryUnavailable { dir_type: "App State".to_string() })
            })?,
    };
    Ok(base.join(STATE_SUBDIR))
}

/// Returns the full path of the core configuration file.
pub fn get_app_config_file() -> Result<PathBuf, CoreError> {
    Ok(get_app_config_dir()?.join(CONFIG_FILE_NAME))
}
