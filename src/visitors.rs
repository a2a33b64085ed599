//! Element visitors
//!
//! One visitor per structural element kind. Each extracts the properties
//! relevant to that kind and delegates the compare/fix step to the
//! [`Checker`](crate::checker::Checker). Tablix visitation descends into
//! nested textboxes; textbox visitation descends into paragraph text runs.

use crate::checker::Checker;
use crate::document::XmlElement;
use crate::profile::{
    self, DocumentPart, PageSize, FONT_FACE, REPORT_NAME_MARKER,
};
use crate::rdl::{self, ReportItemKind, StructureError};
use log::{debug, info};

/// Check the report section's body width against page width minus margins.
pub fn check_body_width(section: &mut XmlElement, size: PageSize, checker: &mut Checker) {
    info!("processing report body width");
    let expected = profile::expected_body_width(size).to_string();
    checker.check_child(section, "Width", &expected, "body width");
}

/// Check page dimensions, margins and the interactive area.
pub fn check_page(page: &mut XmlElement, size: PageSize, checker: &mut Checker) {
    info!("processing page size");

    let height = profile::expected_page_height(size).to_string();
    let width = profile::expected_page_width(size).to_string();
    let left = profile::expected_left_margin(size).to_string();
    let right = profile::expected_right_margin(size).to_string();
    let top = profile::expected_top_margin(size).to_string();
    let bottom = profile::expected_bottom_margin(size).to_string();
    let interactive_height = profile::expected_interactive_height(size).to_string();
    let interactive_width = profile::expected_interactive_width(size).to_string();

    checker.check_child(page, "PageHeight", &height, "page height");
    checker.check_child(page, "PageWidth", &width, "page width");
    checker.check_child(page, "LeftMargin", &left, "left margin");
    checker.check_child(page, "RightMargin", &right, "right margin");
    checker.check_child(page, "TopMargin", &top, "top margin");
    checker.check_child(page, "BottomMargin", &bottom, "bottom margin");
    checker.check_child(page, "InteractiveHeight", &interactive_height, "interactive height");
    checker.check_child(page, "InteractiveWidth", &interactive_width, "interactive width");
}

/// Check the page header's height and its textboxes.
pub fn check_header(header: &mut XmlElement, checker: &mut Checker) -> Result<(), StructureError> {
    info!("processing report header");
    let expected = profile::expected_header_height().to_string();
    checker.check_child(header, "Height", &expected, "header height");
    visit_report_items(header, DocumentPart::Header, checker)
}

/// Check the page footer's height and its textboxes.
pub fn check_footer(footer: &mut XmlElement, checker: &mut Checker) -> Result<(), StructureError> {
    info!("processing report footer");
    let expected = profile::expected_footer_height().to_string();
    checker.check_child(footer, "Height", &expected, "footer height");
    visit_report_items(footer, DocumentPart::Footer, checker)
}

/// Visit the body's direct report items: textboxes and tablix tables.
pub fn visit_body(body: &mut XmlElement, checker: &mut Checker) -> Result<(), StructureError> {
    info!("processing report body");
    if let Some(items) = body.child_mut("ReportItems") {
        for item in items.child_elements_mut() {
            match rdl::classify(item) {
                ReportItemKind::Textbox => visit_textbox(item, DocumentPart::Body, checker)?,
                ReportItemKind::Tablix => visit_tablix(item, checker)?,
                ReportItemKind::Other => {}
            }
        }
    }
    Ok(())
}

/// Visit a container's report items, dispatching textboxes with `part`.
///
/// A section with no `ReportItems` element is simply empty.
fn visit_report_items(
    container: &mut XmlElement,
    part: DocumentPart,
    checker: &mut Checker,
) -> Result<(), StructureError> {
    if let Some(items) = container.child_mut("ReportItems") {
        for item in items.child_elements_mut() {
            if rdl::classify(item) == ReportItemKind::Textbox {
                visit_textbox(item, part, checker)?;
            }
        }
    }
    Ok(())
}

/// Descend a tablix: rows, cells, cell contents, nested textboxes.
///
/// Tablix cell text is treated as body text.
pub fn visit_tablix(tablix: &mut XmlElement, checker: &mut Checker) -> Result<(), StructureError> {
    debug!(
        "processing tablix {}",
        tablix.attr("Name").unwrap_or("<unnamed>")
    );

    let body = rdl::require_mut(tablix, "TablixBody")?;
    let rows = rdl::require_mut(body, "TablixRows")?;
    for row in rows.child_elements_mut() {
        if row.local_name() != "TablixRow" {
            continue;
        }
        let cells = rdl::require_mut(row, "TablixCells")?;
        for cell in cells.child_elements_mut() {
            if cell.local_name() != "TablixCell" {
                continue;
            }
            if let Some(contents) = cell.child_mut("CellContents") {
                for item in contents.child_elements_mut() {
                    if rdl::classify(item) == ReportItemKind::Textbox {
                        visit_textbox(item, DocumentPart::Body, checker)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Check font face and size on every text run of a textbox.
///
/// A run whose value is bound to the report's display name gets the title
/// font size regardless of the ambient document part.
pub fn visit_textbox(
    textbox: &mut XmlElement,
    part: DocumentPart,
    checker: &mut Checker,
) -> Result<(), StructureError> {
    let name = textbox.attr("Name").unwrap_or("<unnamed>").to_string();
    debug!("processing textbox {}", name);
    checker.set_scope(Some(format!("textbox '{}'", name)));

    let paragraphs = rdl::require_mut(textbox, "Paragraphs")?;
    for paragraph in paragraphs.child_elements_mut() {
        if paragraph.local_name() != "Paragraph" {
            continue;
        }
        let runs = rdl::require_mut(paragraph, "TextRuns")?;
        let run = rdl::require_mut(runs, "TextRun")?;

        let is_report_name = run
            .child("Value")
            .and_then(|value| value.text())
            .is_some_and(|text| text.contains(REPORT_NAME_MARKER));
        let size_part = if is_report_name {
            DocumentPart::Title
        } else {
            part
        };
        let expected_size = profile::expected_font_size(size_part);

        let style = rdl::require_mut(run, "Style")?;
        checker.check_child(style, "FontFamily", FONT_FACE, "font face");
        checker.check_child(style, "FontSize", expected_size, "font size");
    }

    checker.set_scope(None);
    Ok(())
}
