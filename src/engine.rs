//! Document driver
//!
//! Orchestrates one validation run: refuse deprecated-namespace documents,
//! parse, run the visitors in a fixed order, and persist the result when fix
//! mode is on. The traversal order (body width, header, body, page geometry,
//! footer) only affects diagnostic ordering; every check is independent and
//! idempotent.

use crate::checker::Checker;
use crate::diagnostic::{CheckOutcome, Diagnostic};
use crate::document::{ParseError, XmlDocument, NAMESPACE_2008};
use crate::profile::PageSize;
use crate::rdl::{self, StructureError};
use crate::visitors;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Error aborting a validation run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("detected 2008 report definition namespace; upgrade the file to the 2016 schema")]
    SchemaTooOld,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one validation run
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All diagnostics, in traversal order
    pub diagnostics: Vec<Diagnostic>,

    /// Properties checked
    pub checks_run: usize,

    /// Values that differ and were not fixed
    pub mismatch_count: usize,

    /// Absent elements that were not created
    pub missing_count: usize,

    /// Values overwritten by the fix path
    pub fixed_count: usize,

    /// Elements created by the fix path
    pub created_count: usize,

    /// Processing duration
    #[serde(skip)]
    pub duration: Duration,
}

impl ValidationReport {
    fn from_checker(checker: Checker) -> Self {
        let (checks_run, diagnostics) = checker.into_diagnostics();
        let mut report = Self {
            checks_run,
            ..Default::default()
        };
        for diagnostic in &diagnostics {
            match diagnostic.outcome {
                CheckOutcome::Mismatch => report.mismatch_count += 1,
                CheckOutcome::Missing => report.missing_count += 1,
                CheckOutcome::Fixed => report.fixed_count += 1,
                CheckOutcome::Created => report.created_count += 1,
                CheckOutcome::Pass => {}
            }
        }
        report.diagnostics = diagnostics;
        report
    }

    /// Whether any property deviated from the rules
    pub fn has_findings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Whether the document already satisfied every rule
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of findings the fix path repaired
    pub fn fixes_applied(&self) -> usize {
        self.fixed_count + self.created_count
    }
}

/// The validation driver
pub struct Engine {
    page_size: PageSize,
    fix: bool,
}

impl Engine {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            fix: false,
        }
    }

    /// Enable fix mode: mismatched values are overwritten and absent
    /// property elements are created.
    pub fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    pub fn fix_enabled(&self) -> bool {
        self.fix
    }

    /// Validate a document given as raw XML text.
    ///
    /// Returns the report together with the (possibly mutated) document so
    /// the caller decides about persistence.
    pub fn run(&self, source: &str) -> Result<(ValidationReport, XmlDocument), RunError> {
        let start = Instant::now();

        // The deprecated namespace is refused wherever it appears, before
        // any visitor runs.
        if source.contains(NAMESPACE_2008) {
            return Err(RunError::SchemaTooOld);
        }

        let mut document = XmlDocument::parse(source)?;
        let mut checker = Checker::new(self.fix);

        let section = rdl::report_section_mut(document.root_mut())?;
        visitors::check_body_width(section, self.page_size, &mut checker);
        {
            let header = rdl::page_header_mut(section)?;
            visitors::check_header(header, &mut checker)?;
        }
        {
            let body = rdl::body_mut(section)?;
            visitors::visit_body(body, &mut checker)?;
        }
        {
            let page = rdl::page_mut(section)?;
            visitors::check_page(page, self.page_size, &mut checker);
        }
        {
            let footer = rdl::page_footer_mut(section)?;
            visitors::check_footer(footer, &mut checker)?;
        }

        let mut report = ValidationReport::from_checker(checker);
        report.duration = start.elapsed();
        Ok((report, document))
    }

    /// Validate a file, writing the repaired document to `output` if given.
    pub fn run_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<ValidationReport, RunError> {
        info!("reading report file {}", input.display());
        let source = fs::read_to_string(input)?;

        let (report, document) = self.run(&source)?;

        if let Some(path) = output {
            info!("writing report file {}", path.display());
            fs::write(path, document.to_xml())?;
        }

        Ok(report)
    }
}
