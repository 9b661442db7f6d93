pub mod config;
pub mod errors;
pub mod validation;

pub use config::{LineResolution, Severity, ValidatorConfig, DEFAULT_EXTENSION};
pub use errors::{ConfigError, WalkError};
pub use validation::{validate, Diagnostic, DiagnosticLevel, ValidationResult, Validator};
