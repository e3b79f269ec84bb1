//! Configuration management for the ScreenRec core.
//!
//! - [`types`]: the schema ([`CoreConfig`], [`LoggingConfig`], [`CaptureConfig`]).
//! - [`defaults`]: default values used when `config.toml` is missing or incomplete.
//! - [`loader`]: [`ConfigLoader`], which reads, parses and validates the file.
//!
//! ## Loading process
//!
//! 1. `ConfigLoader::load()` resolves `config.toml` in the application config directory.
//! 2. A missing file yields the default `CoreConfig`.
//! 3. Present content is parsed as TOML; failures map to [`crate::error::ConfigError::ParseError`].
//! 4. The result is validated and normalised; failures map to
//!    [`crate::error::ConfigError::ValidationError`].

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CaptureConfig, CoreConfig, LoggingConfig};
