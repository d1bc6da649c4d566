// ABOUTME: Utility functions for the slidedeck application
// ABOUTME: Provides validation, path handling and UTF-8 text I/O helpers

use crate::errors::{DeckError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DeckError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(DeckError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(DeckError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory_exists(parent),
        _ => Ok(()),
    }
}

/// Get the absolute path
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| {
        DeckError::ValidationError(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}

/// Convert Windows line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    if text.contains("\r\n") {
        text.replace("\r\n", "\n")
    } else {
        text.to_string()
    }
}

/// Read a UTF-8 text file, failing with `PathNotFoundError` if it is missing.
pub fn read_text_file(path: &Path) -> Result<String> {
    validate_file_exists(path)?;
    let content = fs::read_to_string(path).map_err(DeckError::FileReadError)?;
    Ok(normalize_line_endings(&content))
}

/// Write UTF-8 text, creating the parent directory when needed.
pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent_directory_exists(path)?;
    fs::write(path, content).map_err(DeckError::FileReadError)
}
