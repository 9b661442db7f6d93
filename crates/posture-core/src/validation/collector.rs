//! Append-only, ordered diagnostic sequence for one validation run

use crate::config::ValidatorConfig;

use super::types::{Diagnostic, ValidationResult};

pub struct DiagnosticCollector<'a> {
    config: &'a ValidatorConfig,
    diagnostics: Vec<Diagnostic>,
    files_checked: usize,
}

impl<'a> DiagnosticCollector<'a> {
    pub fn new(config: &'a ValidatorConfig) -> Self {
        Self {
            config,
            diagnostics: Vec::new(),
            files_checked: 0,
        }
    }

    /// Append a diagnostic at its rule's configured severity
    ///
    /// Rules configured `off` are dropped here. There is no deduplication:
    /// the same condition seen twice is recorded twice.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        let Some(level) = self.config.severity(diagnostic.code).level() else {
            log::debug!("rule {} is disabled, dropping diagnostic", diagnostic.code);
            return;
        };
        self.diagnostics.push(diagnostic.with_level(level));
    }

    pub fn file_checked(&mut self) {
        self.files_checked += 1;
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            diagnostics: self.diagnostics,
            files_checked: self.files_checked,
        }
    }
}
