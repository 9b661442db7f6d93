//! Type-safe rule identification for posture validation checks
//!
//! Every diagnostic the validator emits carries one of these identifiers,
//! which is also the key used to configure its severity.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use super::patterns::TrackedField;

/// Checks built into the posture validator
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,      // Provides as_ref() -> &str
    Display,       // Provides to_string()
    EnumString,    // Provides from_str()
    IntoStaticStr, // Provides into() -> &'static str
    EnumIter,      // Provides iter() over all variants
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CoreRuleId {
    // File-level conditions
    UnreadableFile,
    WalkFailure,

    // Structural checks
    ResourceDeclarationCount,
    MissingPostureId,

    // Identifier format checks
    InvalidPostureId,
    InvalidPolicySetId,
    InvalidPolicyId,
}

impl CoreRuleId {
    /// Get a human-readable description of what the rule validates
    pub const fn description(&self) -> &'static str {
        use CoreRuleId::*;
        match self {
            UnreadableFile => "Reports Terraform files that could not be read",
            WalkFailure => "Reports a directory traversal that could not complete",
            ResourceDeclarationCount => {
                "Ensures each file declares exactly one google_securityposture_posture resource"
            }
            MissingPostureId => "Ensures a declared posture carries a posture_id assignment",
            InvalidPostureId => "Validates the format of posture_id values",
            InvalidPolicySetId => "Validates the format of policy_set_id values",
            InvalidPolicyId => "Validates the format of policy_id values",
        }
    }

    /// The format rule that reports violations of the given field
    pub const fn for_field(field: TrackedField) -> Self {
        match field {
            TrackedField::PostureId => CoreRuleId::InvalidPostureId,
            TrackedField::PolicySetId => CoreRuleId::InvalidPolicySetId,
            TrackedField::PolicyId => CoreRuleId::InvalidPolicyId,
        }
    }
}

/// Identifier for validation rules, supporting both built-in and external rules
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleIdentifier {
    /// Rule built into the validator
    Core(CoreRuleId),
    /// Rule named in configuration that the validator does not know about
    External(String),
}

impl RuleIdentifier {
    /// Resolve a configured rule name, falling back to an external identifier
    pub fn parse(name: &str) -> Self {
        name.parse::<CoreRuleId>()
            .map(RuleIdentifier::Core)
            .unwrap_or_else(|_| RuleIdentifier::External(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_core_rule_id_display() {
        assert_eq!(
            CoreRuleId::ResourceDeclarationCount.to_string(),
            "resource_declaration_count"
        );
        assert_eq!(
            CoreRuleId::InvalidPolicySetId.to_string(),
            "invalid_policy_set_id"
        );
    }

    #[test]
    fn test_every_rule_has_a_description() {
        for id in CoreRuleId::iter() {
            assert!(!id.description().is_empty(), "{} has no description", id);
        }
    }

    #[test]
    fn test_rule_for_field() {
        assert_eq!(
            CoreRuleId::for_field(TrackedField::PostureId),
            CoreRuleId::InvalidPostureId
        );
        assert_eq!(
            CoreRuleId::for_field(TrackedField::PolicyId),
            CoreRuleId::InvalidPolicyId
        );
    }

    #[test]
    fn test_rule_identifier_parse() {
        assert_eq!(
            RuleIdentifier::parse("missing_posture_id"),
            RuleIdentifier::Core(CoreRuleId::MissingPostureId)
        );
        assert_eq!(
            RuleIdentifier::parse("custom_rule"),
            RuleIdentifier::External("custom_rule".to_string())
        );
        assert_eq!(
            RuleIdentifier::parse("Missing_Posture_Id"),
            RuleIdentifier::External("Missing_Posture_Id".to_string())
        );
    }
}
