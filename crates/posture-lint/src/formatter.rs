//! Output formatting for validation results

use std::io::{self, Write};

use colored::Colorize;
use posture_core::validation::format_rules;
use posture_core::{Diagnostic, DiagnosticLevel, ValidationResult};
use serde_json::{json, Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Output format for lint results
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    AsRefStr,      // Provides as_ref() -> &str
    Display,       // Provides to_string()
    EnumString,    // Provides from_str()
    IntoStaticStr, // Provides into() -> &'static str
    EnumIter,      // Provides iter() over all variants
)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    /// One message per line, exactly as the validator produced them
    #[default]
    Plain,
    /// Grouped by file with a colored summary
    Stylish,
    /// Compact format (one line per issue)
    Compact,
    /// JSON format (machine-readable)
    Json,
    /// Quickfix format (vim-compatible)
    Quickfix,
}

pub trait OutputFormatter {
    fn format(&self, result: &ValidationResult, out: &mut dyn Write) -> io::Result<()>;
}

pub fn get_formatter(format: Format) -> Box<dyn OutputFormatter> {
    match format {
        Format::Plain => Box::new(PlainFormatter),
        Format::Stylish => Box::new(StylishFormatter),
        Format::Compact => Box::new(CompactFormatter),
        Format::Json => Box::new(JsonFormatter),
        Format::Quickfix => Box::new(QuickfixFormatter),
    }
}

struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format(&self, result: &ValidationResult, out: &mut dyn Write) -> io::Result<()> {
        for diagnostic in &result.diagnostics {
            writeln!(out, "{}", diagnostic.message)?;
        }
        Ok(())
    }
}

struct StylishFormatter;

impl OutputFormatter for StylishFormatter {
    fn format(&self, result: &ValidationResult, out: &mut dyn Write) -> io::Result<()> {
        if result.is_empty() {
            let message = format!("✓ No issues found in {} file(s)", result.files_checked);
            writeln!(out, "{}", message.green())?;
            return Ok(());
        }

        for (file, diagnostics) in group_by_file(&result.diagnostics) {
            writeln!(out, "{}", file.underline())?;
            for diagnostic in diagnostics {
                let level = match diagnostic.level {
                    DiagnosticLevel::Error => "error".red().bold(),
                    DiagnosticLevel::Warning => "warning".yellow().bold(),
                };
                let line = diagnostic
                    .line
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let code: &'static str = diagnostic.code.into();
                writeln!(
                    out,
                    "  {:>5}  {}  {}  {}",
                    line.dimmed(),
                    level,
                    diagnostic.message,
                    code.dimmed()
                )?;
            }
            writeln!(out)?;
        }

        let summary = format!(
            "✖ {} problem(s) ({} error(s), {} warning(s)) in {} file(s) checked",
            result.diagnostics.len(),
            result.error_count(),
            result.warning_count(),
            result.files_checked
        );
        if result.has_errors() {
            writeln!(out, "{}", summary.red().bold())
        } else {
            writeln!(out, "{}", summary.yellow().bold())
        }
    }
}

struct CompactFormatter;

impl OutputFormatter for CompactFormatter {
    fn format(&self, result: &ValidationResult, out: &mut dyn Write) -> io::Result<()> {
        for diagnostic in &result.diagnostics {
            writeln!(
                out,
                "{}: {}[{}]: {}",
                format_location(&diagnostic.file, diagnostic.line),
                diagnostic.level,
                diagnostic.code,
                diagnostic.message
            )?;
        }
        Ok(())
    }
}

struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &ValidationResult, out: &mut dyn Write) -> io::Result<()> {
        let output = json!({
            "diagnostics": result.diagnostics,
            "rules": rule_metadata(&result.diagnostics),
            "files_checked": result.files_checked,
            "error_count": result.error_count(),
            "warning_count": result.warning_count(),
        });

        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)
    }
}

/// Description of every rule that reported, plus the pattern of format rules
fn rule_metadata(diagnostics: &[Diagnostic]) -> Map<String, Value> {
    let mut rules = Map::new();
    for diagnostic in diagnostics {
        let code: &'static str = diagnostic.code.into();
        if rules.contains_key(code) {
            continue;
        }
        let format_rule = format_rules::all_rules()
            .iter()
            .find(|rule| rule.code() == diagnostic.code);
        let entry = match format_rule {
            Some(rule) => json!({
                "description": rule.description(),
                "pattern": rule.pattern_text(),
            }),
            None => json!({ "description": diagnostic.code.description() }),
        };
        rules.insert(code.to_string(), entry);
    }
    rules
}

struct QuickfixFormatter;

impl OutputFormatter for QuickfixFormatter {
    fn format(&self, result: &ValidationResult, out: &mut dyn Write) -> io::Result<()> {
        for diagnostic in &result.diagnostics {
            let kind = match diagnostic.level {
                DiagnosticLevel::Error => "E",
                DiagnosticLevel::Warning => "W",
            };
            writeln!(
                out,
                "{}:{}:1: {}: {}",
                diagnostic.file,
                diagnostic.line.unwrap_or(1),
                kind,
                diagnostic.message
            )?;
        }
        Ok(())
    }
}

fn format_location(file: &str, line: Option<usize>) -> String {
    match line {
        Some(l) => format!("{}:{}", file, l),
        None => file.to_string(),
    }
}

/// Group diagnostics by file, keeping the order in which files first appear
fn group_by_file(diagnostics: &[Diagnostic]) -> Vec<(&str, Vec<&Diagnostic>)> {
    let mut groups: Vec<(&str, Vec<&Diagnostic>)> = Vec::new();
    for diagnostic in diagnostics {
        match groups.iter_mut().find(|(file, _)| *file == diagnostic.file) {
            Some((_, group)) => group.push(diagnostic),
            None => groups.push((diagnostic.file.as_str(), vec![diagnostic])),
        }
    }
    groups
}
