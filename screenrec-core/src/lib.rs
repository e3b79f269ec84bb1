//! # ScreenRec Core Library (`screenrec-core`)
//!
//! `screenrec-core` is the foundational library underneath the ScreenRec preference layer.
//! It carries everything the preference facade in `screenrec-domain` needs that is not
//! itself preference logic:
//!
//! - **Error Handling**: A unified error system through the `CoreError` enum and its
//!   associated specific error types `ConfigError` and `LoggingError`.
//! - **Device Types**: Value types describing device state the derivation engine reads:
//!   [`DisplayMetrics`], [`Rotation`] and [`PlatformVersion`].
//! - **Configuration Management**: TOML-based loading and validation of [`CoreConfig`]
//!   through [`ConfigLoader`], including the candidate capture widths.
//! - **Logging**: Initialisation of the `tracing` ecosystem for console and file output,
//!   in text or JSON format.
//! - **Utility Functions**: Filesystem and XDG path helpers (`utils::fs`, `utils::paths`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use screenrec_core::config::ConfigLoader;
//! use screenrec_core::logging::init_logging;
//! use screenrec_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let core_config = ConfigLoader::load()?;
//!     init_logging(&core_config.logging, false)?;
//!
//!     tracing::info!("ScreenRec core initialized.");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod logging;
pub mod utils;

// Re-export key types for convenience
pub use error::{CoreError, ConfigError, LoggingError};
pub use types::{DisplayMetrics, Rotation, PlatformVersion};
pub use config::{CoreConfig, LoggingConfig, CaptureConfig, ConfigLoader};
pub use logging::{init_logging, init_minimal_logging};
pub use utils::ensure_dir_exists;
