//! Error types for the linter

use std::path::PathBuf;

use posture_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while setting up a lint run or writing its report
///
/// Problems found in the linted files are never errors; they are reported
/// as diagnostics in the run's result.
#[derive(Debug, Error)]
pub enum LinterError {
    /// A configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was read but is not valid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration names a rule or value the validator rejects
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file already exists
    #[error("Configuration file {0} already exists")]
    ConfigExists(PathBuf),

    /// IO error occurred while writing a report or a configuration file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
