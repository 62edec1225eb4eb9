//! Post body as a parsed HTML fragment plus explicit rewrite passes.
//!
//! The tree itself is never mutated. Passes record their decisions in
//! [`Rewrites`] and [`BodyDocument::serialize`] applies them while writing the
//! HTML back out.

use std::collections::{HashMap, HashSet};

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

pub use ego_tree::NodeId;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// An `<img src>` found in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub node: NodeId,
    pub src: String,
}

/// Decisions made by the rewrite passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrites {
    removed: HashSet<NodeId>,
    sources: HashMap<NodeId, String>,
}

impl Rewrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&mut self, node: NodeId) {
        self.removed.insert(node);
    }

    pub fn is_removed(&self, node: NodeId) -> bool {
        self.removed.contains(&node)
    }

    pub fn set_src(&mut self, node: NodeId, src: impl Into<String>) {
        self.sources.insert(node, src.into());
    }

    pub fn revert_src(&mut self, node: NodeId) {
        self.sources.remove(&node);
    }

    pub fn src_for(&self, node: NodeId) -> Option<&str> {
        self.sources.get(&node).map(String::as_str)
    }
}

pub struct BodyDocument {
    html: Html,
}

impl BodyDocument {
    pub fn parse(content_html: &str) -> Self {
        Self {
            html: Html::parse_fragment(content_html),
        }
    }

    /// Every `<img>` with a non-blank `src`, in document order, skipping removed nodes.
    pub fn images(&self, rewrites: &Rewrites) -> Vec<ImageRef> {
        let Ok(selector) = Selector::parse("img") else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .filter(|img| !rewrites.is_removed(img.id()))
            .filter_map(|img| {
                let src = img.value().attr("src").map(str::trim)?;
                (!src.is_empty()).then(|| ImageRef {
                    node: img.id(),
                    src: src.to_string(),
                })
            })
            .collect()
    }

    /// Removes the first image of the body.
    pub fn strip_hero_image(&self, rewrites: &mut Rewrites) -> Option<NodeId> {
        let Ok(selector) = Selector::parse("img") else {
            return None;
        };
        let hero = self.html.select(&selector).next()?.id();
        rewrites.remove(hero);
        Some(hero)
    }

    /// Serialize the fragment back to HTML with `rewrites` applied.
    pub fn serialize(&self, rewrites: &Rewrites) -> String {
        let mut out = String::new();
        for child in self.html.root_element().children() {
            write_node(child, rewrites, false, &mut out);
        }
        out
    }
}

fn write_node(node: NodeRef<'_, Node>, rewrites: &Rewrites, raw_text: bool, out: &mut String) {
    match node.value() {
        Node::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&html_escape::encode_text(&**text));
            }
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                write_element(element, rewrites, out);
            }
        }
        _ => {
            for child in node.children() {
                write_node(child, rewrites, raw_text, out);
            }
        }
    }
}

fn write_element(element: ElementRef<'_>, rewrites: &Rewrites, out: &mut String) {
    if rewrites.is_removed(element.id()) {
        return;
    }
    let name = element.value().name();
    out.push('<');
    out.push_str(name);
    for (key, value) in element.value().attrs() {
        let value = match (key, rewrites.src_for(element.id())) {
            ("src", Some(rewritten)) => rewritten,
            _ => value,
        };
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    let raw_text = RAW_TEXT_ELEMENTS.contains(&name);
    for child in element.children() {
        write_node(child, rewrites, raw_text, out);
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
