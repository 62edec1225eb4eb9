//! Minimal owned element tree over `quick_xml` events.
//!
//! The export is small enough to hold in memory, and a tree keeps the field
//! lookups in `export.rs` declarative. Qualified names (`wp:post_name`) are
//! kept verbatim; namespaces are not resolved.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated text and CDATA directly inside this element.
    pub text: String,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let attributes = start
            .attributes()
            .flatten()
            .map(|attr| {
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                let value = attr
                    .unescape_value()
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
                (key, value)
            })
            .collect();
        Self {
            name,
            attributes,
            ..Self::default()
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given qualified name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of a direct child, empty when the child is missing.
    pub fn child_text(&self, name: &str) -> &str {
        self.child(name).map_or("", |c| c.text.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("xml syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("document has no root element")]
    Empty,
}

/// Parse a whole document and return its root element.
pub fn parse_document(xml: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    // Synthetic document node at the bottom of the stack.
    let mut stack: Vec<XmlElement> = vec![XmlElement::default()];

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|err| XmlError::Syntax {
            position: reader.buffer_position() as u64,
            message: err.to_string(),
        })?;
        match event {
            Event::Start(ref e) => stack.push(XmlElement::from_start(e)),
            Event::Empty(ref e) => {
                let element = XmlElement::from_start(e);
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(element);
                }
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some(done) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(done);
                        }
                    }
                }
            }
            Event::Text(ref t) => {
                let text = t
                    .unescape()
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(t).into_owned());
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(ref c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(c));
                }
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    if stack.len() > 1 {
        let open = stack.last().map(|e| e.name.clone()).unwrap_or_default();
        return Err(XmlError::Unclosed(open));
    }
    let document = stack.pop().unwrap_or_default();
    document.children.into_iter().next().ok_or(XmlError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdata_and_entities_become_text() {
        let root = parse_document(
            "<rss><item><title>A &amp; B</title><body><![CDATA[<p>x</p>]]></body></item></rss>",
        )
        .unwrap();
        let item = root.child("item").unwrap();
        assert_eq!(item.child_text("title"), "A & B");
        assert_eq!(item.child_text("body"), "<p>x</p>");
        assert_eq!(item.child_text("missing"), "");
    }

    #[test]
    fn prefixed_names_and_attributes_are_kept() {
        let root =
            parse_document(r#"<rss><wp:tag domain="post_tag" nicename="x"/></rss>"#).unwrap();
        let tag = root.child("wp:tag").unwrap();
        assert_eq!(tag.attr("domain"), Some("post_tag"));
    }

    #[test]
    fn unclosed_and_empty_documents_fail() {
        assert_eq!(parse_document(""), Err(XmlError::Empty));
        assert!(parse_document("<rss><channel>").is_err());
    }

    #[test]
    fn mismatched_end_tag_is_a_syntax_error() {
        assert!(matches!(
            parse_document("<rss><a></b></rss>"),
            Err(XmlError::Syntax { .. })
        ));
    }
}
