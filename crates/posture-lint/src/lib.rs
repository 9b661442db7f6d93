//! Linter for Terraform trees declaring a `google_securityposture_posture`
//!
//! Loads an optional `.posturelint.yml`, runs the posture validator and
//! renders the diagnostics in one of several output formats. Argument
//! parsing is left to whichever binary embeds it.
//!
//! ```no_run
//! use std::path::Path;
//! use posture_lint::{Format, Linter, LinterConfig};
//!
//! let root = Path::new("infra");
//! let config = LinterConfig::with_config_file(Format::Stylish, None, root)?;
//! let passed = Linter::new(&config)?.lint_and_report(root, &mut std::io::stdout())?;
//! # let _ = passed;
//! # Ok::<(), posture_lint::LinterError>(())
//! ```

pub mod config;
pub mod error;
pub mod formatter;
pub mod validator;

pub use config::{ConfigFile, LinterConfig, RuleConfig};
pub use error::LinterError;
pub use formatter::{get_formatter, Format, OutputFormatter};
pub use validator::Linter;
