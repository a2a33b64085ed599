//! Human-readable text output for validation reports

use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::ValidationReport;
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show the closing statistics line
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
            Severity::Info => s.blue(),
        }
    }

    pub fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        for diagnostic in &report.diagnostics {
            output.push_str(&self.format_diagnostic(diagnostic));
        }

        if self.show_stats {
            output.push_str(&self.format_summary(report));
        }

        output
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let line_ref = match diagnostic.line {
            Some(line) => format!(" (line {})", line),
            None => String::new(),
        };
        output.push_str(&format!(
            "{}: {}{}\n",
            self.severity_str(diagnostic.severity),
            diagnostic.message(),
            line_ref
        ));

        if let Some(confirmation) = diagnostic.confirmation() {
            output.push_str(&format!(
                "   {} {}\n",
                if self.colored {
                    "+".green().to_string()
                } else {
                    "+".to_string()
                },
                confirmation
            ));
        }

        output
    }

    fn format_summary(&self, report: &ValidationReport) -> String {
        let mut counts = Vec::new();
        if report.mismatch_count > 0 {
            let s = format!(
                "{} {}",
                report.mismatch_count,
                if report.mismatch_count == 1 {
                    "mismatch"
                } else {
                    "mismatches"
                }
            );
            counts.push(if self.colored { s.yellow().to_string() } else { s });
        }
        if report.missing_count > 0 {
            let s = format!("{} missing", report.missing_count);
            counts.push(if self.colored { s.yellow().to_string() } else { s });
        }
        if report.fixed_count > 0 {
            let s = format!("{} fixed", report.fixed_count);
            counts.push(if self.colored { s.green().to_string() } else { s });
        }
        if report.created_count > 0 {
            let s = format!("{} created", report.created_count);
            counts.push(if self.colored { s.green().to_string() } else { s });
        }

        let mut output = format!(
            "\n{} {} checked",
            report.checks_run,
            if report.checks_run == 1 {
                "property"
            } else {
                "properties"
            }
        );
        if counts.is_empty() {
            output.push_str(": all good");
        } else {
            output.push_str(&format!(": {}", counts.join(", ")));
        }
        output.push('\n');
        output.push_str(&format!(
            "Finished in {:.2}s\n",
            report.duration.as_secs_f64()
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::CheckOutcome;

    #[test]
    fn test_format_mismatch() {
        let formatter = TextFormatter::new().without_color();
        let diag = Diagnostic::new("page width", CheckOutcome::Mismatch, "21cm")
            .with_observed("20cm")
            .with_line(12);

        let output = formatter.format_diagnostic(&diag);
        assert!(output.contains("warning"));
        assert!(output.contains("expected page width of \"21cm\", got \"20cm\""));
        assert!(output.contains("(line 12)"));
        assert!(!output.contains("+"));
    }

    #[test]
    fn test_format_fixed_adds_confirmation() {
        let formatter = TextFormatter::new().without_color();
        let diag = Diagnostic::new("page width", CheckOutcome::Fixed, "21cm")
            .with_observed("20cm");

        let output = formatter.format_diagnostic(&diag);
        assert!(output.contains("+ set page width to \"21cm\""));
    }

    #[test]
    fn test_format_report_summary() {
        let formatter = TextFormatter::new().without_color();
        let report = ValidationReport {
            diagnostics: vec![Diagnostic::new(
                "font size",
                CheckOutcome::Mismatch,
                "8pt",
            )
            .with_observed("9pt")],
            checks_run: 11,
            mismatch_count: 1,
            ..Default::default()
        };

        let output = formatter.format(&report);
        assert!(output.contains("11 properties checked: 1 mismatch"));
        assert!(output.contains("Finished in"));
    }

    #[test]
    fn test_clean_report_summary() {
        let formatter = TextFormatter::new().without_color();
        let report = ValidationReport {
            checks_run: 11,
            ..Default::default()
        };
        assert!(formatter.format(&report).contains("11 properties checked: all good"));
    }
}
