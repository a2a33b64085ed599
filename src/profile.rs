//! Page-size profiles and the expected-value rules derived from them
//!
//! Every expected value is a pure function of the page size (and, for font
//! sizes, the document part). Values are recomputed on each query.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Font family every text run is expected to use.
pub const FONT_FACE: &str = "Verdana";

/// Substring that marks a text run as bound to the report's display name.
pub const REPORT_NAME_MARKER: &str = "ReportName.Value";

/// A physical length, stored as whole millimetres.
///
/// All page geometry in the rule set is millimetre-exact, so integer
/// arithmetic keeps derived values (interactive area, body width) free of
/// floating-point formatting drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dim(i32);

impl Dim {
    pub const fn from_mm(mm: i32) -> Self {
        Self(mm)
    }

    pub const fn mm(self) -> i32 {
        self.0
    }
}

impl Add for Dim {
    type Output = Dim;

    fn add(self, rhs: Dim) -> Dim {
        Dim(self.0 + rhs.0)
    }
}

impl Sub for Dim {
    type Output = Dim;

    fn sub(self, rhs: Dim) -> Dim {
        Dim(self.0 - rhs.0)
    }
}

impl fmt::Display for Dim {
    /// Renders as centimetres with the unit suffix: `21cm`, `29.7cm`, `0.7cm`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 10;
        let frac = (self.0 % 10).abs();
        if frac == 0 {
            write!(f, "{}cm", whole)
        } else {
            write!(f, "{}.{}cm", whole, frac)
        }
    }
}

/// Supported page-size profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    A4Landscape,
    A3Landscape,
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => write!(f, "a4"),
            PageSize::A4Landscape => write!(f, "a4_landscape"),
            PageSize::A3Landscape => write!(f, "a3_landscape"),
        }
    }
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "a4_landscape" => Ok(PageSize::A4Landscape),
            "a3_landscape" => Ok(PageSize::A3Landscape),
            _ => Err(format!(
                "unknown page size '{}' (expected a4, a4_landscape or a3_landscape)",
                s
            )),
        }
    }
}

/// Document part a textbox belongs to; selects the expected font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentPart {
    Header,
    Footer,
    Body,
    Title,
}

impl fmt::Display for DocumentPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentPart::Header => write!(f, "header"),
            DocumentPart::Footer => write!(f, "footer"),
            DocumentPart::Body => write!(f, "body"),
            DocumentPart::Title => write!(f, "title"),
        }
    }
}

pub fn expected_page_height(size: PageSize) -> Dim {
    match size {
        PageSize::A4 => Dim::from_mm(297),
        PageSize::A4Landscape => Dim::from_mm(210),
        PageSize::A3Landscape => Dim::from_mm(297),
    }
}

pub fn expected_page_width(size: PageSize) -> Dim {
    match size {
        PageSize::A4 => Dim::from_mm(210),
        PageSize::A4Landscape => Dim::from_mm(297),
        PageSize::A3Landscape => Dim::from_mm(420),
    }
}

pub fn expected_left_margin(size: PageSize) -> Dim {
    match size {
        PageSize::A4 => Dim::from_mm(15),
        _ => Dim::from_mm(5),
    }
}

pub fn expected_right_margin(_size: PageSize) -> Dim {
    Dim::from_mm(5)
}

pub fn expected_top_margin(size: PageSize) -> Dim {
    match size {
        PageSize::A4 => Dim::from_mm(5),
        _ => Dim::from_mm(15),
    }
}

pub fn expected_bottom_margin(_size: PageSize) -> Dim {
    Dim::from_mm(5)
}

/// Interactive height is the page height plus both vertical margins.
pub fn expected_interactive_height(size: PageSize) -> Dim {
    expected_page_height(size) + expected_top_margin(size) + expected_bottom_margin(size)
}

/// Interactive width is the page width plus both horizontal margins.
pub fn expected_interactive_width(size: PageSize) -> Dim {
    expected_page_width(size) + expected_left_margin(size) + expected_right_margin(size)
}

/// Body width is the page width minus both horizontal margins.
pub fn expected_body_width(size: PageSize) -> Dim {
    expected_page_width(size) - expected_left_margin(size) - expected_right_margin(size)
}

pub fn expected_header_height() -> Dim {
    Dim::from_mm(20)
}

pub fn expected_footer_height() -> Dim {
    Dim::from_mm(7)
}

/// Expected font size for a document part.
pub fn expected_font_size(part: DocumentPart) -> &'static str {
    match part {
        DocumentPart::Header | DocumentPart::Footer => "7pt",
        DocumentPart::Title => "10pt",
        DocumentPart::Body => "8pt",
    }
}
