//! Per-field identifier format rules
//!
//! The rule table is immutable data built once on first use. Patterns are
//! case-sensitive and anchored at both ends; their source text is quoted in
//! diagnostics so operators can fix values without reading the code.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{IdentifierAssignment, TrackedField};
use super::rule_id::CoreRuleId;

/// Format rule for one tracked field
#[derive(Debug)]
pub struct FormatRule {
    pub field: TrackedField,
    pub pattern: Regex,
}

impl FormatRule {
    fn new(field: TrackedField, pattern: &str) -> Self {
        Self {
            field,
            pattern: Regex::new(pattern).expect("invalid identifier format rule"),
        }
    }

    /// The pattern source, as quoted in diagnostics
    pub fn pattern_text(&self) -> &str {
        self.pattern.as_str()
    }

    /// Rule reported when a value of this field does not match
    pub fn code(&self) -> CoreRuleId {
        CoreRuleId::for_field(self.field)
    }

    pub fn description(&self) -> &'static str {
        self.code().description()
    }

    pub fn matches(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}

lazy_static! {
    static ref FORMAT_RULES: [FormatRule; 3] = [
        FormatRule::new(TrackedField::PostureId, r"^[a-z][a-z0-9-_]{0,62}$"),
        FormatRule::new(TrackedField::PolicySetId, r"^[a-z][a-z0-9-_]{0,62}$"),
        FormatRule::new(TrackedField::PolicyId, r"^[a-zA-Z][a-zA-Z0-9-_]{0,62}$"),
    ];
}

/// The format rule applied to `field`
pub fn rule_for(field: TrackedField) -> &'static FormatRule {
    match field {
        TrackedField::PostureId => &FORMAT_RULES[0],
        TrackedField::PolicySetId => &FORMAT_RULES[1],
        TrackedField::PolicyId => &FORMAT_RULES[2],
    }
}

/// All format rules, in field check order
pub fn all_rules() -> &'static [FormatRule] {
    &FORMAT_RULES[..]
}

/// Returns the rule `assignment` violates, if any
pub fn check(assignment: &IdentifierAssignment) -> Option<&'static FormatRule> {
    let rule = rule_for(assignment.field);
    if rule.matches(&assignment.value) {
        None
    } else {
        Some(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn assignment(field: TrackedField, value: &str) -> IdentifierAssignment {
        IdentifierAssignment {
            field,
            value: value.to_string(),
            byte_offset: 0,
        }
    }

    #[test_case("my-posture" ; "hyphenated")]
    #[test_case("a" ; "single letter")]
    #[test_case("p_1-x" ; "mixed separators")]
    fn test_accepts_valid_posture_ids(value: &str) {
        assert!(check(&assignment(TrackedField::PostureId, value)).is_none());
        assert!(check(&assignment(TrackedField::PolicySetId, value)).is_none());
    }

    #[test_case("My-Posture" ; "uppercase start")]
    #[test_case("1posture" ; "digit start")]
    #[test_case("" ; "empty")]
    #[test_case("my posture" ; "whitespace")]
    #[test_case("my.posture" ; "dot")]
    #[test_case("myPosture" ; "uppercase inside")]
    fn test_rejects_invalid_posture_ids(value: &str) {
        let rule = check(&assignment(TrackedField::PostureId, value)).unwrap();
        assert_eq!(rule.field, TrackedField::PostureId);
        assert_eq!(rule.pattern_text(), "^[a-z][a-z0-9-_]{0,62}$");
    }

    #[test_case("Policy_1", true ; "uppercase start allowed")]
    #[test_case("policy-1", true ; "lowercase start")]
    #[test_case("_policy", false ; "underscore start")]
    #[test_case("-policy", false ; "hyphen start")]
    fn test_policy_id_allows_uppercase(value: &str, valid: bool) {
        let violation = check(&assignment(TrackedField::PolicyId, value));
        assert_eq!(violation.is_none(), valid);
    }

    #[test]
    fn test_length_limit_is_sixty_three_characters() {
        let longest = format!("a{}", "b".repeat(62));
        let too_long = format!("a{}", "b".repeat(63));
        assert!(check(&assignment(TrackedField::PostureId, &longest)).is_none());
        assert!(check(&assignment(TrackedField::PostureId, &too_long)).is_some());
    }

    #[test]
    fn test_rules_are_listed_in_field_order() {
        let fields: Vec<_> = all_rules().iter().map(|r| r.field).collect();
        assert_eq!(fields, TrackedField::ALL.to_vec());
    }

    #[test]
    fn test_rules_share_their_rule_description() {
        let rule = rule_for(TrackedField::PolicySetId);
        assert_eq!(rule.code(), CoreRuleId::InvalidPolicySetId);
        assert_eq!(rule.description(), "Validates the format of policy_set_id values");
    }
}
