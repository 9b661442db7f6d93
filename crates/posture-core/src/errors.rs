use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a validator configuration
///
/// Per-file validation problems are never errors; they are reported as
/// diagnostics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown rule '{0}'")]
    UnknownRule(String),

    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },
}

/// A failure of the directory traversal itself
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("{}: not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Traversal(#[from] walkdir::Error),
}
