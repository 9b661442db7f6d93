//! Linter engine

use std::io::Write;
use std::path::Path;

use posture_core::{ValidationResult, Validator};

use super::config::LinterConfig;
use super::error::LinterError;
use super::formatter::get_formatter;

/// Runs the posture validator over a tree and reports the outcome
pub struct Linter {
    config: LinterConfig,
    validator: Validator,
}

impl Linter {
    /// Create a new linter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `LinterError` if the configuration file names an unknown
    /// rule, base configuration or an invalid value.
    pub fn new(config: &LinterConfig) -> Result<Self, LinterError> {
        let validator = Validator::new(config.validator_config()?);
        Ok(Self {
            config: config.clone(),
            validator,
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: LinterConfig::default(),
            validator: Validator::with_defaults(),
        }
    }

    pub fn lint(&self, root: &Path) -> ValidationResult {
        self.validator.validate_tree(root)
    }

    /// Lint `root` and write the report in the configured format
    ///
    /// Returns `true` when the run produced no error-level diagnostics.
    pub fn lint_and_report(&self, root: &Path, out: &mut dyn Write) -> Result<bool, LinterError> {
        let result = self.lint(root);
        get_formatter(self.config.format).format(&result, out)?;
        out.flush()?;

        let passed = !result.has_errors();
        let outcome = if passed { "passed" } else { "failed" };
        log::debug!("lint of {} {}", root.display(), outcome);
        Ok(passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;
    use crate::formatter::Format;
    use posture_core::ConfigError;
    use std::fs;
    use tempfile::TempDir;

    const BAD_POLICY: &str = r#"resource "google_securityposture_posture" "p" {
  posture_id = "ok"
  policy_id = "-bad"
}
"#;

    #[test]
    fn test_linter_new_rejects_unknown_rule() {
        let config_file = ConfigFile::from_yaml("rules:\n  no_such_rule: off\n").unwrap();
        let config = LinterConfig {
            format: Format::Plain,
            config_file: Some(config_file),
        };

        let err = Linter::new(&config).err().unwrap();
        assert!(matches!(err, LinterError::Config(ConfigError::UnknownRule(_))));
    }

    #[test]
    fn test_lint_and_report_fails_on_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.tf"), BAD_POLICY).unwrap();

        let mut out = Vec::new();
        let passed = Linter::with_defaults()
            .lint_and_report(dir.path(), &mut out)
            .unwrap();

        assert!(!passed);
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("Error: Invalid 'policy_id' value '-bad' found in "));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_warnings_do_not_fail_the_run() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.tf"), BAD_POLICY).unwrap();
        let config_file = ConfigFile::from_yaml("rules:\n  invalid_policy_id: warning\n").unwrap();
        let config = LinterConfig {
            format: Format::Compact,
            config_file: Some(config_file),
        };

        let linter = Linter::new(&config).unwrap();
        let mut out = Vec::new();
        let passed = linter.lint_and_report(dir.path(), &mut out).unwrap();

        assert!(passed);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains(":3: warning[invalid_policy_id]: "));
    }

    #[test]
    fn test_clean_tree_passes_with_empty_plain_report() {
        let dir = TempDir::new().unwrap();

        let mut out = Vec::new();
        let passed = Linter::with_defaults()
            .lint_and_report(dir.path(), &mut out)
            .unwrap();

        assert!(passed);
        assert!(out.is_empty());
    }
}
