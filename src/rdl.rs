//! Typed accessors over the report definition structure
//!
//! One function per structural path, so visitors never spell out raw
//! element paths. Absence of a spine element is a structural error: nothing
//! downstream of it can be checked meaningfully.

use crate::document::XmlElement;
use thiserror::Error;

/// Error navigating the report definition spine
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("required element <{element}> is missing under <{parent}>")]
    Missing {
        element: &'static str,
        parent: String,
    },
}

/// Closed classification of a report item, derived once per child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportItemKind {
    Textbox,
    Tablix,
    Other,
}

/// Classify a report item by its tag name.
pub fn classify(item: &XmlElement) -> ReportItemKind {
    match item.local_name() {
        "Textbox" => ReportItemKind::Textbox,
        "Tablix" => ReportItemKind::Tablix,
        _ => ReportItemKind::Other,
    }
}

/// Fetch a required child element, failing with a structural error.
pub fn require_mut<'a>(
    parent: &'a mut XmlElement,
    name: &'static str,
) -> Result<&'a mut XmlElement, StructureError> {
    let parent_name = parent.name.clone();
    parent.child_mut(name).ok_or(StructureError::Missing {
        element: name,
        parent: parent_name,
    })
}

/// The single report section under the document root.
pub fn report_section_mut(root: &mut XmlElement) -> Result<&mut XmlElement, StructureError> {
    let sections = require_mut(root, "ReportSections")?;
    require_mut(sections, "ReportSection")
}

pub fn body_mut(section: &mut XmlElement) -> Result<&mut XmlElement, StructureError> {
    require_mut(section, "Body")
}

pub fn page_mut(section: &mut XmlElement) -> Result<&mut XmlElement, StructureError> {
    require_mut(section, "Page")
}

pub fn page_header_mut(section: &mut XmlElement) -> Result<&mut XmlElement, StructureError> {
    require_mut(page_mut(section)?, "PageHeader")
}

pub fn page_footer_mut(section: &mut XmlElement) -> Result<&mut XmlElement, StructureError> {
    require_mut(page_mut(section)?, "PageFooter")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::XmlDocument;

    fn doc(source: &str) -> XmlDocument {
        XmlDocument::parse(source).unwrap()
    }

    #[test]
    fn test_classify() {
        let d = doc("<ReportItems><Textbox Name=\"a\" /><Tablix Name=\"b\" /><Line Name=\"c\" /></ReportItems>");
        let kinds: Vec<_> = d.root().child_elements().map(classify).collect();
        assert_eq!(
            kinds,
            vec![
                ReportItemKind::Textbox,
                ReportItemKind::Tablix,
                ReportItemKind::Other
            ]
        );
    }

    #[test]
    fn test_report_section_navigation() {
        let mut d = doc("<Report><ReportSections><ReportSection><Body /><Page><PageHeader /><PageFooter /></Page></ReportSection></ReportSections></Report>");
        let section = report_section_mut(d.root_mut()).unwrap();
        assert!(body_mut(section).is_ok());
        assert!(page_header_mut(section).is_ok());
        assert!(page_footer_mut(section).is_ok());
    }

    #[test]
    fn test_missing_spine_element() {
        let mut d = doc("<Report><ReportSections /></Report>");
        let err = report_section_mut(d.root_mut()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "required element <ReportSection> is missing under <ReportSections>"
        );
    }

    #[test]
    fn test_missing_header() {
        let mut d = doc(
            "<Report><ReportSections><ReportSection><Page /></ReportSection></ReportSections></Report>",
        );
        let section = report_section_mut(d.root_mut()).unwrap();
        assert!(page_header_mut(section).is_err());
    }
}
