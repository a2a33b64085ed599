//! Diagnostic types for validation results

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message (applied fixes, created elements)
    Info,
    /// Warning - property deviates from the rules
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// Result of checking one property against its expected value.
///
/// `Mismatch` and `Missing` are the check-only outcomes; with fix mode on
/// they become `Fixed` (value overwritten) and `Created` (element added).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    /// Observed value equals the expected value
    Pass,
    /// Observed value differs; not fixed
    Mismatch,
    /// Observed value differed and was overwritten with the expected value
    Fixed,
    /// Property element is absent; not created
    Missing,
    /// Property element was absent and has been created with the expected value
    Created,
}

impl CheckOutcome {
    /// Whether the document was mutated to produce this outcome
    pub fn mutated(&self) -> bool {
        matches!(self, CheckOutcome::Fixed | CheckOutcome::Created)
    }

    /// Default severity for a diagnostic with this outcome
    pub fn severity(&self) -> Severity {
        match self {
            CheckOutcome::Pass => Severity::Info,
            CheckOutcome::Mismatch | CheckOutcome::Missing => Severity::Warning,
            CheckOutcome::Fixed | CheckOutcome::Created => Severity::Info,
        }
    }
}

impl std::fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckOutcome::Pass => write!(f, "pass"),
            CheckOutcome::Mismatch => write!(f, "mismatch"),
            CheckOutcome::Fixed => write!(f, "fixed"),
            CheckOutcome::Missing => write!(f, "missing"),
            CheckOutcome::Created => write!(f, "created"),
        }
    }
}

/// A single reported property deviation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable property label (e.g. "page width", "font size")
    pub label: String,
    /// Severity level
    pub severity: Severity,
    /// What happened to the property
    pub outcome: CheckOutcome,
    /// The value the rules expect
    pub expected: String,
    /// The value found in the document (None when the element is absent)
    pub observed: Option<String>,
    /// Enclosing context, e.g. the textbox name
    pub context: Option<String>,
    /// Source line of the checked element, when known
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(label: &str, outcome: CheckOutcome, expected: &str) -> Self {
        Self {
            label: label.to_string(),
            severity: outcome.severity(),
            outcome,
            expected: expected.to_string(),
            observed: None,
            context: None,
            line: None,
        }
    }

    pub fn with_observed(mut self, observed: &str) -> Self {
        self.observed = Some(observed.to_string());
        self
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Main report line for this diagnostic
    pub fn message(&self) -> String {
        let scope = match &self.context {
            Some(ctx) => format!(" in {}", ctx),
            None => String::new(),
        };
        match &self.observed {
            Some(observed) => format!(
                "expected {}{} of \"{}\", got \"{}\"",
                self.label, scope, self.expected, observed
            ),
            None => format!(
                "{}{} not found, expected \"{}\"",
                self.label, scope, self.expected
            ),
        }
    }

    /// Confirmation line emitted when the fix path ran
    pub fn confirmation(&self) -> Option<String> {
        match self.outcome {
            CheckOutcome::Fixed => Some(format!("set {} to \"{}\"", self.label, self.expected)),
            CheckOutcome::Created => Some(format!(
                "created {} with \"{}\"",
                self.label, self.expected
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("hint".parse::<Severity>(), Ok(Severity::Info));
    }

    #[test]
    fn test_outcome_severity() {
        assert_eq!(CheckOutcome::Mismatch.severity(), Severity::Warning);
        assert_eq!(CheckOutcome::Missing.severity(), Severity::Warning);
        assert_eq!(CheckOutcome::Fixed.severity(), Severity::Info);
        assert!(CheckOutcome::Fixed.mutated());
        assert!(!CheckOutcome::Mismatch.mutated());
    }

    #[test]
    fn test_mismatch_message() {
        let diag = Diagnostic::new("page width", CheckOutcome::Mismatch, "21cm")
            .with_observed("20cm")
            .with_line(12);
        assert_eq!(diag.message(), "expected page width of \"21cm\", got \"20cm\"");
        assert_eq!(diag.confirmation(), None);
        assert_eq!(diag.line, Some(12));
    }

    #[test]
    fn test_created_message() {
        let diag = Diagnostic::new("font size", CheckOutcome::Created, "7pt")
            .with_context(Some("textbox 'PageTitle'".to_string()));
        assert_eq!(
            diag.message(),
            "font size in textbox 'PageTitle' not found, expected \"7pt\""
        );
        assert_eq!(
            diag.confirmation(),
            Some("created font size with \"7pt\"".to_string())
        );
    }
}
