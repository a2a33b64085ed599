//! rdlint - style linter for SSRS report definition files
//!
//! Validates and optionally repairs layout and typography properties of
//! report definition (RDL) documents against a page-size profile: page
//! dimensions, margins, interactive area, header/footer heights, and font
//! face/size per document part.
//!
//! # Architecture
//!
//! ```text
//! CLI -> Engine -> visitors -> Checker -> Diagnostics
//!                    |
//!              rdl accessors
//!                    |
//!               XmlDocument
//! ```
//!
//! The engine refuses documents still on the 2008 schema namespace, parses
//! the input into an owned tree, runs one visitor per structural element
//! kind in a fixed order, and serializes the repaired document when fix
//! mode is on. Every expected value is a pure function of the page-size
//! profile, so runs are deterministic and fixes are idempotent.

pub mod checker;
pub mod diagnostic;
pub mod document;
pub mod engine;
pub mod output;
pub mod profile;
pub mod rdl;
pub mod visitors;

// Re-export main types
pub use checker::Checker;
pub use diagnostic::{CheckOutcome, Diagnostic, Severity};
pub use document::{ParseError, XmlChild, XmlDocument, XmlElement};
pub use engine::{Engine, RunError, ValidationReport};
pub use output::TextFormatter;
pub use profile::{Dim, DocumentPart, PageSize};
pub use rdl::{ReportItemKind, StructureError};
