//! Logging initialisation built on the `tracing` ecosystem.
//!
//! Two entry points:
//!
//! - [`init_minimal_logging`]: stderr only, filtered by `RUST_LOG` (default `info`).
//!   Safe to call repeatedly; used before configuration is loaded and in tests.
//! - [`init_logging`]: stdout plus an optional daily-rolling file, in text or JSON,
//!   driven by a [`LoggingConfig`].

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

const FALLBACK_LOG_FILE_NAME: &str = "screenrec.log";

/// Keeps the non-blocking file writer alive so buffered lines are flushed.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Errors (a subscriber is already installed) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

fn parse_level(level: &str) -> Result<Level, LoggingError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(LoggingError::FilterError(format!("Invalid log level in config: {}", other))),
    }
}

fn level_filter(level: Level) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level.to_string()).map_err(|e| LoggingError::FilterError(e.to_string()))
}

fn is_json(format: &str) -> bool {
    format.eq_ignore_ascii_case("json")
}

/// Builds the daily-rolling file layer for `log_path`, creating its directory.
fn create_file_layer(log_path: &Path, format: &str) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    utils::fs::ensure_parent_dir_exists(log_path)?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(FALLBACK_LOG_FILE_NAME));
    let file_appender = tracing_appender::rolling::daily(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer = if is_json(format) {
        fmt::layer().json().with_writer(writer).with_ansi(false).boxed()
    } else {
        fmt::layer().with_writer(writer).with_ansi(false).boxed()
    };
    Ok((layer, guard))
}

fn create_stdout_layer(format: &str) -> BoxedLayer {
    if is_json(format) {
        fmt::layer().json().with_writer(stdout).with_ansi(false).boxed()
    } else {
        fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .boxed()
    }
}

/// Replaces the stored file writer guard, flushing the previous one.
fn store_worker_guard(new_guard: Option<WorkerGuard>) {
    match LOG_WORKER_GUARD.lock() {
        Ok(mut slot) => *slot = new_guard,
        Err(poisoned) => *poisoned.into_inner() = new_guard,
    }
}

/// Installs the global subscriber described by `config`.
///
/// # Arguments
///
/// * `config`: level, format and optional file path.
/// * `is_reload`: when `true`, an already installed subscriber is tolerated and the call
///   succeeds; when `false` it is an error.
///
/// # Errors
///
/// Returns [`CoreError::Logging`] wrapping [`LoggingError::FilterError`] for an invalid
/// level, or wrapping [`LoggingError::InitializationFailure`] when a subscriber is already
/// installed and `is_reload` is `false`. Returns [`CoreError::Filesystem`] if the log
/// directory cannot be created.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let level = parse_level(&config.level)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(create_stdout_layer(&config.format).with_filter(level_filter(level)?).boxed());

    let mut file_guard = None;
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &config.format)?;
        layers.push(file_layer.with_filter(level_filter(level)?).boxed());
        file_guard = Some(guard);
    }

    let result = Registry::default().with(layers).try_init();
    store_worker_guard(file_guard);

    match result {
        Ok(()) => Ok(()),
        Err(e) if is_reload => {
            tracing::info!("Logging reconfiguration requested while a subscriber is active: {}", e);
            Ok(())
        }
        Err(e) => Err(CoreError::Logging(LoggingError::InitializationFailure(format!(
            "Failed to set global tracing subscriber. Was it already initialized? Error: {}",
            e
        )))),
    }
}
