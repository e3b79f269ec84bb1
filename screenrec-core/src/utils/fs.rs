//! Filesystem helpers.
//!
//! Small wrappers around `std::fs` that map I/O failures onto [`CoreError`] so the
//! configuration and logging code can use `?` throughout.

use crate::error::CoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Ensures that a directory exists at `path`, creating it and any missing parents.
///
/// # Errors
///
/// Returns [`CoreError::Filesystem`] if `path` is occupied by something that is not a
/// directory, or if the directory cannot be created.
///
/// # Examples
///
/// ```no_run
/// # use screenrec_core::utils::fs::ensure_dir_exists;
/// let temp_dir = tempfile::tempdir().unwrap();
/// let dir_path = temp_dir.path().join("recordings");
/// ensure_dir_exists(&dir_path).unwrap();
/// assert!(dir_path.is_dir());
/// ```
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(CoreError::Filesystem {
            message: "Path exists but is not a directory".to_string(),
            path: path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::AlreadyExists, "Path exists but is not a directory"),
        });
    }
    fs::create_dir_all(path).map_err(|e| CoreError::Filesystem {
        message: "Failed to create directory".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}

/// Ensures the parent directory of `file_path` exists.
///
/// Paths without a parent, or whose parent is empty (a bare file name), are left alone.
pub fn ensure_parent_dir_exists(file_path: &Path) -> Result<(), CoreError> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir_exists(parent),
        _ => Ok(()),
    }
}

/// Reads a file into a string, treating a missing file as `None`.
///
/// # Errors
///
/// Any I/O failure other than `NotFound` is returned as the raw `std::io::Error` so
/// callers can wrap it with their own context.
pub fn read_optional_to_string(path: &Path) -> Result<Option<String>, std::io::Error> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_nested_directories() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a/b/c");

        ensure_dir_exists(&nested).unwrap();

        assert!(nested.is_dir());
        // A second call on an existing directory is a no-op.
        assert!(ensure_dir_exists(&nested).is_ok());
    }

    #[test]
    fn test_ensure_dir_exists_rejects_file_path() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("occupied");
        File::create(&file_path).unwrap();

        match ensure_dir_exists(&file_path) {
            Err(CoreError::Filesystem { message, path, source }) => {
                assert_eq!(message, "Path exists but is not a directory");
                assert_eq!(path, file_path);
                assert_eq!(source.kind(), ErrorKind::AlreadyExists);
            }
            other => panic!("Expected Filesystem error, got {:?}", other),
        }
    }

    #[test]
    fn test_ensure_parent_dir_exists_handles_bare_file_name() {
        assert!(ensure_parent_dir_exists(Path::new("screenrec.log")).is_ok());

        let temp_dir = tempdir().unwrap();
        let log_path = temp_dir.path().join("logs/screenrec.log");
        ensure_parent_dir_exists(&log_path).unwrap();
        assert!(temp_dir.path().join("logs").is_dir());
        assert!(!log_path.exists());
    }

    #[test]
    fn test_read_optional_to_string() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(read_optional_to_string(&missing).unwrap().is_none());

        let present = temp_dir.path().join("present.toml");
        std::fs::write(&present, "[logging]\n").unwrap();
        assert_eq!(read_optional_to_string(&present).unwrap().as_deref(), Some("[logging]\n"));

        // Reading a directory is an error other than NotFound.
        assert!(read_optional_to_string(temp_dir.path()).is_err());
    }
}
