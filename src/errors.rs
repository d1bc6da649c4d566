// ABOUTME: Error types for the slidedeck application
// ABOUTME: Provides structured error handling for each stage of the pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Path not found: {0:?}")]
    PathNotFoundError(PathBuf),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Scaffold error: {0}")]
    ScaffoldError(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
