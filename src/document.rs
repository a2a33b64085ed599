//! Owned XML document tree
//!
//! Parses report definition XML into an owned, mutable tree and serializes
//! it back with an XML declaration and two-space indentation. Namespace
//! declarations travel as ordinary attributes and element names keep their
//! prefixes, so the input's prefix conventions survive a round trip.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Report definition namespace this tool validates.
pub const NAMESPACE_2016: &str =
    "http://schemas.microsoft.com/sqlserver/reporting/2016/01/reportdefinition";

/// Deprecated report definition namespace; documents using it are refused.
pub const NAMESPACE_2008: &str =
    "http://schemas.microsoft.com/sqlserver/reporting/2008/01/reportdefinition";

/// Companion namespace written by the report designer, prefixed `rd`.
pub const DESIGNER_NAMESPACE: &str =
    "http://schemas.microsoft.com/SQLServer/reporting/reportdesigner";

/// Error during parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML parse error at line {line}: {message}")]
    Xml { line: usize, message: String },

    #[error("document has no root element")]
    NoRoot,
}

/// Child slot of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlChild {
    Element(XmlElement),
    Text(String),
    Comment(String),
}

/// An element in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name as written, prefix included (e.g. `rd:ReportID`)
    pub name: String,
    /// Attributes in document order
    pub attrs: Vec<(String, String)>,
    pub children: Vec<XmlChild>,
    /// Source line (1-based); 0 for elements created by the fix path
    pub line: usize,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
            line: 0,
        }
    }

    /// New element whose only child is a text node.
    pub fn with_text(name: &str, text: &str) -> Self {
        let mut element = Self::new(name);
        element.children.push(XmlChild::Text(text.to_string()));
        element
    }

    /// Tag name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|el| el.local_name() == name)
    }

    /// Mutable access to the first child element with the given local name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.child_elements_mut().find(|el| el.local_name() == name)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(el) => Some(el),
            _ => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|child| match child {
            XmlChild::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Text content: the first text child, if any.
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match child {
            XmlChild::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// Replace the element's text content, adding a text node if none exists.
    pub fn set_text(&mut self, value: &str) {
        for child in &mut self.children {
            if let XmlChild::Text(t) = child {
                *t = value.to_string();
                return;
            }
        }
        self.children.push(XmlChild::Text(value.to_string()));
    }

    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlChild::Element(element));
    }
}

/// A parsed report definition document
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let root = parse_tree(source)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// Serialize with an XML declaration and two-space indentation.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        write_element(&mut out, &self.root, 0);
        out
    }
}

fn parse_tree(source: &str) -> Result<XmlElement, ParseError> {
    let mut reader = Reader::from_reader(source.as_bytes());
    reader.config_mut().trim_text(true);

    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect();
    let line_of = |pos: u64| -> usize {
        let pos = pos as usize;
        line_starts.partition_point(|&start| start <= pos)
    };

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let line = line_of(reader.buffer_position());
                stack.push(element_from_event(&e, line));
            }

            Ok(Event::Empty(e)) => {
                let line = line_of(reader.buffer_position());
                let element = element_from_event(&e, line);
                attach(&mut stack, &mut root, element, line)?;
            }

            Ok(Event::End(_)) => {
                let line = line_of(reader.buffer_position());
                let element = stack.pop().ok_or_else(|| ParseError::Xml {
                    line,
                    message: "unexpected closing tag".to_string(),
                })?;
                attach(&mut stack, &mut root, element, line)?;
            }

            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| ParseError::Xml {
                    line: line_of(reader.buffer_position()),
                    message: err.to_string(),
                })?;
                if !text.is_empty() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlChild::Text(text.into_owned()));
                    }
                }
            }

            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e).to_string();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlChild::Text(text));
                }
            }

            Ok(Event::Comment(e)) => {
                let text = String::from_utf8_lossy(&e).to_string();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlChild::Comment(text));
                }
            }

            Ok(Event::Eof) => break,

            Err(err) => {
                return Err(ParseError::Xml {
                    line: line_of(reader.buffer_position()),
                    message: err.to_string(),
                });
            }

            _ => {}
        }

        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Xml {
            line: line_starts.len(),
            message: "unexpected end of document".to_string(),
        });
    }

    root.ok_or(ParseError::NoRoot)
}

fn element_from_event(e: &quick_xml::events::BytesStart<'_>, line: usize) -> XmlElement {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut element = XmlElement::new(&name);
    element.line = line;

    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string());
        element.attrs.push((key, value));
    }

    element
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
    line: usize,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlChild::Element(element));
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(ParseError::Xml {
                    line,
                    message: "multiple root elements".to_string(),
                });
            }
            *root = Some(element);
            Ok(())
        }
    }
}

fn write_element(out: &mut String, element: &XmlElement, depth: usize) {
    let pad = "  ".repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str(" />\n");
        return;
    }

    // Text-only elements stay on one line: <PageWidth>21cm</PageWidth>
    if let [XmlChild::Text(text)] = element.children.as_slice() {
        out.push('>');
        out.push_str(&escape_text(text));
        out.push_str("</");
        out.push_str(&element.name);
        out.push_str(">\n");
        return;
    }

    out.push_str(">\n");
    for child in &element.children {
        match child {
            XmlChild::Element(el) => write_element(out, el, depth + 1),
            XmlChild::Text(text) => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(&escape_text(text));
                out.push('\n');
            }
            XmlChild::Comment(text) => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->\n");
            }
        }
    }
    out.push_str(&pad);
    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}

/// Escape special characters in attribute values
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape special characters in text content
fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = XmlDocument::parse(r#"<Report><Width>19cm</Width></Report>"#).unwrap();
        assert_eq!(doc.root().name, "Report");
        assert_eq!(doc.root().child("Width").and_then(|e| e.text()), Some("19cm"));
    }

    #[test]
    fn test_parse_preserves_attribute_order() {
        let doc = XmlDocument::parse(
            r#"<Report xmlns="http://example/a" xmlns:rd="http://example/b" />"#,
        )
        .unwrap();
        assert_eq!(doc.root().attrs[0].0, "xmlns");
        assert_eq!(doc.root().attrs[1].0, "xmlns:rd");
    }

    #[test]
    fn test_parse_tracks_lines() {
        let doc = XmlDocument::parse("<Report>\n  <Page>\n    <PageWidth>21cm</PageWidth>\n  </Page>\n</Report>").unwrap();
        let page = doc.root().child("Page").unwrap();
        let width = page.child("PageWidth").unwrap();
        assert_eq!(width.line, 3);
    }

    #[test]
    fn test_local_name_strips_prefix() {
        let doc =
            XmlDocument::parse(r#"<Report><rd:ReportID>abc</rd:ReportID></Report>"#).unwrap();
        let id = doc.root().child("ReportID").unwrap();
        assert_eq!(id.name, "rd:ReportID");
        assert_eq!(id.local_name(), "ReportID");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(XmlDocument::parse("<Report><Open></Report>").is_err());
        assert!(XmlDocument::parse("").is_err());
    }

    #[test]
    fn test_set_text_replaces_value() {
        let mut doc = XmlDocument::parse(r#"<Report><Width>20cm</Width></Report>"#).unwrap();
        doc.root_mut().child_mut("Width").unwrap().set_text("19cm");
        assert_eq!(doc.root().child("Width").and_then(|e| e.text()), Some("19cm"));
    }

    #[test]
    fn test_set_text_on_empty_element() {
        let mut element = XmlElement::new("FontSize");
        element.set_text("7pt");
        assert_eq!(element.text(), Some("7pt"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let source = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Report xmlns=\"http://example/ns\">\n  <Page>\n    <PageWidth>21cm</PageWidth>\n  </Page>\n</Report>\n";
        let doc = XmlDocument::parse(source).unwrap();
        assert_eq!(doc.to_xml(), source);
    }

    #[test]
    fn test_serialize_escapes() {
        let mut root = XmlElement::new("Report");
        let mut value = XmlElement::with_text("Value", "a < b & c");
        value.attrs.push(("Name".to_string(), "say \"hi\"".to_string()));
        root.push_element(value);
        let doc = XmlDocument { root };
        let xml = doc.to_xml();
        assert!(xml.contains("a &lt; b &amp; c"));
        assert!(xml.contains("say &quot;hi&quot;"));
    }

    #[test]
    fn test_serialize_empty_element_self_closes() {
        let doc = XmlDocument::parse("<Report><PageBreak></PageBreak></Report>").unwrap();
        assert!(doc.to_xml().contains("<PageBreak />"));
    }

    #[test]
    fn test_escaped_text_round_trips() {
        let doc = XmlDocument::parse("<Report><Value>a &amp; b</Value></Report>").unwrap();
        assert_eq!(doc.root().child("Value").and_then(|e| e.text()), Some("a & b"));
        assert!(doc.to_xml().contains("<Value>a &amp; b</Value>"));
    }

    #[test]
    fn test_comments_survive() {
        let doc = XmlDocument::parse("<Report><!-- generated --><Width>19cm</Width></Report>")
            .unwrap();
        assert!(doc.to_xml().contains("<!-- generated -->"));
    }
}
