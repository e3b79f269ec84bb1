//! Utility helpers for the core crate.
//!
//! - [`fs`]: directory creation and optional file reads mapped onto `CoreError`.
//! - [`paths`]: per-user configuration and state directories.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
