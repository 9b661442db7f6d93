//! Validator configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::errors::ConfigError;
use crate::validation::rule_id::{CoreRuleId, RuleIdentifier};
use crate::validation::types::DiagnosticLevel;

/// Extension of the files the validator inspects, without the dot
pub const DEFAULT_EXTENSION: &str = "tf";

/// Configured severity of a rule
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Off,
}

impl Severity {
    /// Diagnostic level emitted at this severity, `None` when disabled
    pub fn level(&self) -> Option<DiagnosticLevel> {
        match self {
            Severity::Error => Some(DiagnosticLevel::Error),
            Severity::Warning => Some(DiagnosticLevel::Warning),
            Severity::Off => None,
        }
    }
}

/// How violation line numbers are resolved
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LineResolution {
    /// Count newlines before the match that produced the violation
    #[default]
    Offset,
    /// Re-scan the content line by line with a literal search pattern
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub extension: String,
    pub line_resolution: LineResolution,
    rules: HashMap<CoreRuleId, Severity>,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            line_resolution: LineResolution::default(),
            rules: HashMap::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    pub fn with_line_resolution(mut self, line_resolution: LineResolution) -> Self {
        self.line_resolution = line_resolution;
        self
    }

    pub fn with_rule(mut self, rule: CoreRuleId, severity: Severity) -> Self {
        self.rules.insert(rule, severity);
        self
    }

    /// Apply a rule table keyed by rule name
    ///
    /// Unknown rule names are rejected so that typos do not silently leave a
    /// rule enabled.
    pub fn with_named_rules<'a, I>(mut self, rules: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, Severity)>,
    {
        for (name, severity) in rules {
            match RuleIdentifier::parse(name) {
                RuleIdentifier::Core(id) => {
                    self.rules.insert(id, severity);
                }
                RuleIdentifier::External(name) => return Err(ConfigError::UnknownRule(name)),
            }
        }
        Ok(self)
    }

    /// Effective severity of `rule`; unconfigured rules are errors
    pub fn severity(&self, rule: CoreRuleId) -> Severity {
        self.rules.get(&rule).copied().unwrap_or(Severity::Error)
    }

    /// Case-insensitive check of a file name against the target extension
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let suffix = format!(".{}", self.extension.to_lowercase());
        file_name.to_lowercase().ends_with(&suffix)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
