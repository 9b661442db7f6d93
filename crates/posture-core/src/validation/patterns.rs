//! Extraction of posture declarations and identifier assignments
//!
//! Matching is done against the raw file content, independent of block
//! nesting. An assignment outside the posture block is still extracted:
//! recall is preferred over precision, and callers rely on that.

use lazy_static::lazy_static;
use regex::Regex;
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// The only resource type this validator inspects
pub const TARGET_RESOURCE_TYPE: &str = "google_securityposture_posture";

/// Identifier fields whose values are format-checked, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TrackedField {
    PostureId,
    PolicySetId,
    PolicyId,
}

impl TrackedField {
    pub const ALL: [TrackedField; 3] = [
        TrackedField::PostureId,
        TrackedField::PolicySetId,
        TrackedField::PolicyId,
    ];

    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Assignment shape used to extract every value of this field
    fn extractor(&self) -> &'static Regex {
        match self {
            TrackedField::PostureId => &POSTURE_ID_ASSIGNMENT,
            TrackedField::PolicySetId => &POLICY_SET_ID_ASSIGNMENT,
            TrackedField::PolicyId => &POLICY_ID_ASSIGNMENT,
        }
    }

    /// Line-search pattern that matches an assignment of exactly `value`
    pub fn literal_assignment_pattern(&self, value: &str) -> String {
        format!(r#"{}\s*=\s*"{}""#, self.name(), regex::escape(value))
    }
}

/// A `resource "google_securityposture_posture" "<label>" {` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDeclaration {
    pub resource_type: &'static str,
    pub label: String,
    pub byte_offset: usize,
}

/// A `<field> = "<value>"` assignment found somewhere in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierAssignment {
    pub field: TrackedField,
    pub value: String,
    pub byte_offset: usize,
}

// Values run to the closing quote on the same line; `\"` stays inside the value.
macro_rules! assignment_regex {
    ($field:literal) => {
        Regex::new(concat!($field, r#"\s*=\s*"((?:[^"\\\r\n]|\\.)*)""#))
            .expect(concat!("invalid ", $field, " extraction pattern"))
    };
}

lazy_static! {
    static ref DECLARATION: Regex = Regex::new(&format!(
        r#"resource "{}" "([^"]*)"\s*\{{"#,
        regex::escape(TARGET_RESOURCE_TYPE)
    ))
    .expect("invalid declaration pattern");
    static ref POSTURE_ID_ASSIGNMENT: Regex = assignment_regex!("posture_id");
    static ref POLICY_SET_ID_ASSIGNMENT: Regex = assignment_regex!("policy_set_id");
    static ref POLICY_ID_ASSIGNMENT: Regex = assignment_regex!("policy_id");
}

/// Line-search pattern for the header of a posture declaration
pub fn declaration_search_pattern() -> String {
    format!(r#"resource "{}""#, regex::escape(TARGET_RESOURCE_TYPE))
}

/// All posture declarations in `content`, in order of appearance
pub fn find_declarations(content: &str) -> Vec<ResourceDeclaration> {
    DECLARATION
        .captures_iter(content)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            Some(ResourceDeclaration {
                resource_type: TARGET_RESOURCE_TYPE,
                label: capture_text(&captures),
                byte_offset: whole.start(),
            })
        })
        .collect()
}

/// All assignments of `field` in `content`, in order of appearance
pub fn find_assignments(content: &str, field: TrackedField) -> Vec<IdentifierAssignment> {
    field
        .extractor()
        .captures_iter(content)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            Some(IdentifierAssignment {
                field,
                value: capture_text(&captures),
                byte_offset: whole.start(),
            })
        })
        .collect()
}

fn capture_text(captures: &regex::Captures) -> String {
    captures
        .get(1)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
