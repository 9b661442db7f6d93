//! Per-file checks and the tree-level validation entry point
//!
//! Within a file diagnostics are produced in a fixed order: declaration
//! count, posture_id presence, then format violations field by field
//! (posture_id, policy_set_id, policy_id), each in order of appearance.

use std::path::Path;

use crate::config::{LineResolution, ValidatorConfig};
use crate::errors::WalkError;

use super::collector::DiagnosticCollector;
use super::format_rules::{self, FormatRule};
use super::line_locator::{self, LineNumber};
use super::patterns::{
    self, IdentifierAssignment, ResourceDeclaration, TrackedField, TARGET_RESOURCE_TYPE,
};
use super::rule_id::CoreRuleId;
use super::types::{Diagnostic, ValidationResult};
use super::walker::{TreeWalker, WalkEvent};

/// Validate every matching file below `root` with the default configuration
///
/// Returns the diagnostic messages in emission order. An empty sequence
/// means the tree passed.
pub fn validate(root: impl AsRef<Path>) -> Vec<String> {
    Validator::with_defaults().validate_tree(root).messages()
}

pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ValidatorConfig::default())
    }

    pub fn validate_tree(&self, root: impl AsRef<Path>) -> ValidationResult {
        let root = root.as_ref();
        let mut collector = DiagnosticCollector::new(&self.config);

        log::debug!("validating Terraform files under {}", root.display());

        let walked = TreeWalker::new(&self.config).walk(root, |event| match event {
            WalkEvent::File(file) => {
                collector.file_checked();
                self.check_file(&file.text(), &file.display_path(), &mut collector);
            }
            WalkEvent::Unreadable { path, error } => {
                let path = path.display().to_string();
                let message = unreadable_file_message(&path, &error);
                collector.record(Diagnostic::error(CoreRuleId::UnreadableFile, path, message));
            }
        });

        if let Err(error) = walked {
            log::warn!("walk of {} aborted: {}", root.display(), error);
            let message = walk_failure_message(&error);
            let root = root.display().to_string();
            collector.record(Diagnostic::error(CoreRuleId::WalkFailure, root, message));
        }

        let result = collector.finish();
        log::debug!(
            "checked {} file(s): {} error(s), {} warning(s)",
            result.files_checked,
            result.error_count(),
            result.warning_count()
        );
        result
    }

    /// Validate one file's content as if it had been read from `file_path`
    pub fn validate_content(&self, content: &str, file_path: &str) -> ValidationResult {
        let mut collector = DiagnosticCollector::new(&self.config);
        collector.file_checked();
        self.check_file(content, file_path, &mut collector);
        collector.finish()
    }

    fn check_file(&self, content: &str, path: &str, collector: &mut DiagnosticCollector) {
        let declarations = patterns::find_declarations(content);
        log::debug!("{}: {} posture declaration(s)", path, declarations.len());

        if declarations.len() != 1 {
            let line = self.declaration_line(content, declarations.first());
            let message = declaration_count_message(path, declarations.len(), line);
            collector.record(
                Diagnostic::error(CoreRuleId::ResourceDeclarationCount, path, message)
                    .with_line(line),
            );
            return;
        }

        for field in TrackedField::ALL {
            let assignments = patterns::find_assignments(content, field);

            if field == TrackedField::PostureId && assignments.is_empty() {
                let line = line_locator::line_at_offset(content, declarations[0].byte_offset);
                let message = missing_posture_id_message(path);
                collector.record(
                    Diagnostic::error(CoreRuleId::MissingPostureId, path, message).with_line(line),
                );
            }

            for assignment in &assignments {
                let Some(rule) = format_rules::check(assignment) else {
                    continue;
                };
                let line = self.assignment_line(content, assignment);
                let message = invalid_identifier_message(assignment, rule, path, line);
                collector.record(
                    Diagnostic::error(CoreRuleId::for_field(field), path, message).with_line(line),
                );
            }
        }
    }

    fn declaration_line(&self, content: &str, first: Option<&ResourceDeclaration>) -> LineNumber {
        let Some(first) = first else {
            return LineNumber::Known(1);
        };

        match self.config.line_resolution {
            LineResolution::Offset => line_locator::line_at_offset(content, first.byte_offset),
            LineResolution::Search => {
                let pattern = patterns::declaration_search_pattern();
                let prefix = content.get(..first.byte_offset + 1).unwrap_or(content);
                line_locator::find_line(prefix, &pattern)
                    .or_else(|| line_locator::find_line(content, &pattern))
            }
        }
    }

    fn assignment_line(&self, content: &str, assignment: &IdentifierAssignment) -> LineNumber {
        match self.config.line_resolution {
            LineResolution::Offset => line_locator::line_at_offset(content, assignment.byte_offset),
            LineResolution::Search => {
                let pattern = assignment.field.literal_assignment_pattern(&assignment.value);
                line_locator::find_line(content, &pattern)
            }
        }
    }
}

fn unreadable_file_message(path: &str, error: &std::io::Error) -> String {
    format!("Error: Could not read Terraform file: {}. Details: {}", path, error)
}

fn walk_failure_message(error: &WalkError) -> String {
    format!("Error: Could not walk the directory: {}", error)
}

fn declaration_count_message(path: &str, found: usize, line: LineNumber) -> String {
    let mut message = format!(
        "Error: File {} must contain exactly one '{}' resource declaration. Found {}.",
        path, TARGET_RESOURCE_TYPE, found
    );
    if let LineNumber::Known(line) = line {
        message.push_str(&format!(" First occurrence (if any) near line ~{}.", line));
    }
    message
}

fn missing_posture_id_message(path: &str) -> String {
    format!(
        "Error: '{}' resource declared in {}, but no 'posture_id' assignment found in the file.",
        TARGET_RESOURCE_TYPE, path
    )
}

fn invalid_identifier_message(
    assignment: &IdentifierAssignment,
    rule: &FormatRule,
    path: &str,
    line: LineNumber,
) -> String {
    let location = match line {
        LineNumber::Known(line) => format!("{} at line ~{}", path, line),
        LineNumber::Unknown => path.to_string(),
    };
    format!(
        "Error: Invalid '{}' value '{}' found in {}. Must match '{}'.",
        assignment.field,
        assignment.value,
        location,
        rule.pattern_text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Severity;
    use crate::validation::types::DiagnosticLevel;

    const VALID: &str = r#"resource "google_securityposture_posture" "main" {
  posture_id = "my-posture"
  parent     = "organizations/123"
  policy_sets {
    policy_set_id = "set-1"
    policies {
      policy_id = "Policy_1"
    }
  }
}
"#;

    fn codes(result: &ValidationResult) -> Vec<CoreRuleId> {
        result.diagnostics.iter().map(|d| d.code).collect()
    }

    fn lines(result: &ValidationResult) -> Vec<Option<usize>> {
        result.diagnostics.iter().map(|d| d.line).collect()
    }

    fn search_validator() -> Validator {
        Validator::new(ValidatorConfig::new().with_line_resolution(LineResolution::Search))
    }

    #[test]
    fn test_valid_file_has_no_diagnostics() {
        let result = Validator::with_defaults().validate_content(VALID, "main.tf");
        assert!(result.is_empty(), "unexpected diagnostics: {:?}", result.messages());
        assert_eq!(result.files_checked, 1);
    }

    #[test]
    fn test_two_declarations_suppress_identifier_checks() {
        let content = r#"resource "google_securityposture_posture" "a" {
  posture_id = "BAD"
}

resource "google_securityposture_posture" "b" {
  posture_id = "ALSO BAD"
}
"#;
        let result = Validator::with_defaults().validate_content(content, "dup.tf");
        assert_eq!(codes(&result), vec![CoreRuleId::ResourceDeclarationCount]);
        assert_eq!(
            result.messages()[0],
            "Error: File dup.tf must contain exactly one 'google_securityposture_posture' \
             resource declaration. Found 2. First occurrence (if any) near line ~1."
        );
        assert_eq!(result.diagnostics[0].line, Some(1));
    }

    #[test]
    fn test_no_declaration_reports_line_one() {
        let content = "resource \"google_storage_bucket\" \"b\" {\n  posture_id = \"Bad\"\n}\n";
        let result = Validator::with_defaults().validate_content(content, "other.tf");
        assert_eq!(codes(&result), vec![CoreRuleId::ResourceDeclarationCount]);
        assert!(result.messages()[0].contains("Found 0. First occurrence (if any) near line ~1."));
    }

    #[test]
    fn test_uppercase_posture_id() {
        let content = VALID.replace("my-posture", "My-Posture");
        let result = Validator::with_defaults().validate_content(&content, "main.tf");
        assert_eq!(
            result.messages(),
            vec![
                "Error: Invalid 'posture_id' value 'My-Posture' found in main.tf at line ~2. \
                 Must match '^[a-z][a-z0-9-_]{0,62}$'."
            ]
        );
    }

    #[test]
    fn test_missing_posture_id_does_not_block_other_checks() {
        let content = VALID
            .replace("posture_id = \"my-posture\"", "")
            .replace("Policy_1", "9policy");
        let result = Validator::with_defaults().validate_content(&content, "main.tf");
        assert_eq!(
            codes(&result),
            vec![CoreRuleId::MissingPostureId, CoreRuleId::InvalidPolicyId]
        );
        assert_eq!(
            result.messages()[0],
            "Error: 'google_securityposture_posture' resource declared in main.tf, but no \
             'posture_id' assignment found in the file."
        );
    }

    #[test]
    fn test_violations_follow_field_order_then_appearance() {
        let content = r#"resource "google_securityposture_posture" "main" {
  policies { policy_id = "_first" }
  policy_set_id = "Set"
  posture_id = "Posture-A"
  posture_id = "Posture-B"
  policies { policy_id = "_second" }
}
"#;
        let result = Validator::with_defaults().validate_content(content, "order.tf");
        let values: Vec<_> = result.diagnostics.iter().map(|d| (d.code, d.line)).collect();
        assert_eq!(
            values,
            vec![
                (CoreRuleId::InvalidPostureId, Some(4)),
                (CoreRuleId::InvalidPostureId, Some(5)),
                (CoreRuleId::InvalidPolicySetId, Some(3)),
                (CoreRuleId::InvalidPolicyId, Some(2)),
                (CoreRuleId::InvalidPolicyId, Some(6)),
            ]
        );
    }

    #[test]
    fn test_duplicate_invalid_values_are_each_reported() {
        let content = r#"resource "google_securityposture_posture" "main" {
  posture_id = "Dup"
}
locals {
  posture_id = "Dup"
}
"#;
        let offset = Validator::with_defaults().validate_content(content, "dup.tf");
        assert_eq!(lines(&offset), vec![Some(2), Some(5)]);

        let search = search_validator().validate_content(content, "dup.tf");
        assert_eq!(lines(&search), vec![Some(2), Some(2)]);
    }

    #[test]
    fn test_search_resolution_degrades_to_unknown() {
        let content = "resource \"google_securityposture_posture\" \"main\" {\n  \
                       posture_id =\n    \"Split\"\n}\n";
        let result = search_validator().validate_content(content, "split.tf");
        assert_eq!(lines(&result), vec![None]);
        assert_eq!(
            result.messages()[0],
            "Error: Invalid 'posture_id' value 'Split' found in split.tf. \
             Must match '^[a-z][a-z0-9-_]{0,62}$'."
        );

        let offset = Validator::with_defaults().validate_content(content, "split.tf");
        assert_eq!(lines(&offset), vec![Some(2)]);
    }

    #[test]
    fn test_search_resolution_finds_declaration_line() {
        let content = "# header\n\n\
                       resource \"google_securityposture_posture\" \"a\" {}\n\
                       resource \"google_securityposture_posture\" \"b\" {}\n";
        let result = search_validator().validate_content(content, "two.tf");
        assert_eq!(lines(&result), vec![Some(3)]);
        assert!(result.messages()[0].ends_with("near line ~3."));
    }

    #[test]
    fn test_disabled_and_downgraded_rules() {
        let content = VALID.replace("Policy_1", "-policy").replace("set-1", "Set");
        let config = ValidatorConfig::new()
            .with_rule(CoreRuleId::InvalidPolicyId, Severity::Warning)
            .with_rule(CoreRuleId::InvalidPolicySetId, Severity::Off);
        let result = Validator::new(config).validate_content(&content, "main.tf");
        assert_eq!(codes(&result), vec![CoreRuleId::InvalidPolicyId]);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
        assert!(!result.has_errors());
    }
}
