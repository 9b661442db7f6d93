//! Validation of Terraform trees declaring a security posture
//!
//! A run walks a directory, and for every `.tf` file checks that exactly one
//! `google_securityposture_posture` resource is declared before validating
//! every `posture_id`, `policy_set_id` and `policy_id` value in the file.
//! Every problem becomes a diagnostic; only a failed traversal ends a run
//! early, and even then the diagnostics gathered so far are kept.

pub mod collector;
pub mod format_rules;
pub mod line_locator;
pub mod patterns;
pub mod rule_id;
pub mod types;
pub mod validator;
pub mod walker;

pub use collector::DiagnosticCollector;
pub use format_rules::FormatRule;
pub use line_locator::LineNumber;
pub use patterns::{
    IdentifierAssignment, ResourceDeclaration, TrackedField, TARGET_RESOURCE_TYPE,
};
pub use rule_id::{CoreRuleId, RuleIdentifier};
pub use types::{Diagnostic, DiagnosticLevel, ValidationResult};
pub use validator::{validate, Validator};
pub use walker::{ConfigurationFile, TreeWalker, WalkEvent};
