//! Property value checker
//!
//! Compares one child element's text against an expected value and records
//! the outcome. Only the fix path mutates the document: a differing value is
//! overwritten, an absent element is created with the expected value.

use crate::diagnostic::{CheckOutcome, Diagnostic};
use crate::document::XmlElement;
use log::debug;

/// Collects diagnostics while checking properties, fixing them if enabled.
pub struct Checker {
    fix_enabled: bool,
    scope: Option<String>,
    checks_run: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Checker {
    pub fn new(fix_enabled: bool) -> Self {
        Self {
            fix_enabled,
            scope: None,
            checks_run: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn fix_enabled(&self) -> bool {
        self.fix_enabled
    }

    /// Context prepended to subsequent diagnostics, e.g. `textbox 'Title'`.
    pub fn set_scope(&mut self, scope: Option<String>) {
        self.scope = scope;
    }

    pub fn checks_run(&self) -> usize {
        self.checks_run
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> (usize, Vec<Diagnostic>) {
        (self.checks_run, self.diagnostics)
    }

    /// Check `parent`'s child `child_name` against `expected`.
    pub fn check_child(
        &mut self,
        parent: &mut XmlElement,
        child_name: &'static str,
        expected: &str,
        label: &str,
    ) -> CheckOutcome {
        self.checks_run += 1;

        match parent.child_mut(child_name) {
            Some(element) => {
                let observed = element.text().unwrap_or("").to_string();
                if observed == expected {
                    debug!("{}: \"{}\" ok", label, observed);
                    return CheckOutcome::Pass;
                }

                let outcome = if self.fix_enabled {
                    element.set_text(expected);
                    CheckOutcome::Fixed
                } else {
                    CheckOutcome::Mismatch
                };
                let line = element.line;
                self.push(
                    Diagnostic::new(label, outcome, expected)
                        .with_observed(&observed)
                        .with_line(line),
                );
                outcome
            }
            None => {
                let outcome = if self.fix_enabled {
                    parent.push_element(XmlElement::with_text(child_name, expected));
                    CheckOutcome::Created
                } else {
                    CheckOutcome::Missing
                };
                self.push(Diagnostic::new(label, outcome, expected));
                outcome
            }
        }
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics
            .push(diagnostic.with_context(self.scope.clone()));
    }
}
