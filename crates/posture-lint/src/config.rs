//! Linter configuration

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use posture_core::validation::CoreRuleId;
use posture_core::{ConfigError, LineResolution, Severity, ValidatorConfig};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::error::LinterError;
use super::formatter::Format;

/// File names searched for, in order, when no explicit path is given
pub const CONFIG_FILE_NAMES: [&str; 2] = [".posturelint.yml", ".posturelint.yaml"];

/// Name of the built-in base configuration
pub const RECOMMENDED: &str = "posture:recommended";

/// Rule configuration from YAML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RuleConfig {
    /// Simple severity level (e.g., "error", "warning", "off")
    Severity(Severity),
    /// Mapping form, `{ severity: warning }`
    Full { severity: Severity },
}

impl RuleConfig {
    pub fn severity(&self) -> Severity {
        match self {
            RuleConfig::Severity(s) => *s,
            RuleConfig::Full { severity } => *severity,
        }
    }
}

/// Configuration file structure (.posturelint.yml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base configuration to extend (only "posture:recommended" exists)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Extension of the files to validate, without the dot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_resolution: Option<LineResolution>,

    /// Rule configurations mapped by rule ID
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl ConfigFile {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, LinterError> {
        let content = fs::read_to_string(path).map_err(|source| LinterError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&content)
            .map_err(|e| LinterError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content)
    }

    /// Look for a configuration file in `dir`
    ///
    /// A missing file is not an error; a present but malformed one is.
    pub fn load_default(dir: &Path) -> Result<Option<Self>, LinterError> {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if path.is_file() {
                log::debug!("using configuration file {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Load configuration from the given path, or from `dir`'s default locations
    pub fn load(config_path: Option<&Path>, dir: &Path) -> Result<Option<Self>, LinterError> {
        match config_path {
            Some(path) => Self::from_file(path).map(Some),
            None => Self::load_default(dir),
        }
    }

    /// Apply extends to get the effective configuration
    pub fn with_extends(&self) -> Result<Self, LinterError> {
        let mut config = self.clone();

        if let Some(ref extends) = self.extends {
            if extends != RECOMMENDED {
                return Err(LinterError::InvalidConfig(format!(
                    "Unknown base configuration '{}', expected '{}'",
                    extends, RECOMMENDED
                )));
            }
            // User rules override the recommended table
            for (rule, rule_config) in Self::recommended().rules {
                config.rules.entry(rule).or_insert(rule_config);
            }
            config.extends = None;
        }

        Ok(config)
    }

    /// Get recommended configuration
    pub fn recommended() -> Self {
        let rules = CoreRuleId::iter()
            .map(|rule| (rule.to_string(), RuleConfig::Severity(Severity::Error)))
            .collect();

        Self {
            extends: None,
            extension: None,
            line_resolution: None,
            rules,
        }
    }

    /// Build the validator configuration this file describes
    pub fn to_validator_config(&self) -> Result<ValidatorConfig, LinterError> {
        let effective = self.with_extends()?;
        let mut config = ValidatorConfig::new();

        if let Some(ref extension) = effective.extension {
            let trimmed = extension.trim().trim_start_matches('.');
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "extension".to_string(),
                    value: extension.clone(),
                }
                .into());
            }
            config = config.with_extension(trimmed);
        }
        if let Some(line_resolution) = effective.line_resolution {
            config = config.with_line_resolution(line_resolution);
        }

        let rules = effective
            .rules
            .iter()
            .map(|(name, rule)| (name.as_str(), rule.severity()));
        Ok(config.with_named_rules(rules)?)
    }

    /// Write a starter configuration to `dir`, refusing to overwrite one
    pub fn init(dir: &Path) -> Result<PathBuf, LinterError> {
        let config_path = dir.join(CONFIG_FILE_NAMES[0]);
        for name in CONFIG_FILE_NAMES {
            let existing = dir.join(name);
            if existing.exists() {
                return Err(LinterError::ConfigExists(existing));
            }
        }

        let mut config = ConfigFile {
            extends: Some(RECOMMENDED.to_string()),
            extension: Some(posture_core::DEFAULT_EXTENSION.to_string()),
            line_resolution: Some(LineResolution::default()),
            rules: BTreeMap::new(),
        };
        config.rules.insert(
            CoreRuleId::InvalidPolicyId.to_string(),
            RuleConfig::Severity(Severity::Error),
        );

        let yaml = serde_yml::to_string(&config).map_err(|e| {
            LinterError::InvalidConfig(format!("Failed to serialize config: {}", e))
        })?;
        let header = "# Security posture lint configuration\n\
                      # Rule severities: error, warning, off\n";
        fs::write(&config_path, format!("{}{}", header, yaml))?;

        Ok(config_path)
    }
}

#[derive(Clone, Debug, Default)]
pub struct LinterConfig {
    pub format: Format,
    pub config_file: Option<ConfigFile>,
}

impl LinterConfig {
    /// Create a config with a configuration file loaded for `root`
    ///
    /// An explicit `config_path` must exist; otherwise `root` is searched
    /// for one of [`CONFIG_FILE_NAMES`].
    pub fn with_config_file(
        format: Format,
        config_path: Option<&Path>,
        root: &Path,
    ) -> Result<Self, LinterError> {
        let config_file = ConfigFile::load(config_path, root)?;
        Ok(Self { format, config_file })
    }

    pub fn validator_config(&self) -> Result<ValidatorConfig, LinterError> {
        match self.config_file {
            Some(ref config) => config.to_validator_config(),
            None => Ok(ValidatorConfig::default()),
        }
    }
}
