//! WordPress eXtended RSS (WXR) export parsing.

use pressmark_core::{AuthorTable, MetaPairs, RawItem, RawTerm, TermDomain};
use pressmark_logging::{press_debug, press_warn};

use crate::xml::{parse_document, XmlElement, XmlError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedExportError {
    #[error("export is not well-formed xml: {0}")]
    Xml(#[from] XmlError),
    #[error("export has no <channel> element under <{root}>")]
    MissingChannel { root: String },
}

/// The parsed export: items in document order plus the author table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportDocument {
    pub authors: AuthorTable,
    pub items: Vec<RawItem>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
enum AuthorSectionError {
    #[error("author #{index} has no {field}")]
    MissingField { index: usize, field: &'static str },
}

pub fn parse_export(xml: &str) -> Result<ExportDocument, MalformedExportError> {
    let root = parse_document(xml)?;
    let channel = root
        .child("channel")
        .ok_or_else(|| MalformedExportError::MissingChannel {
            root: root.name.clone(),
        })?;

    // Author metadata is optional: one bad record empties the table instead
    // of failing the import.
    let authors = match parse_authors(channel) {
        Ok(authors) => authors,
        Err(err) => {
            press_warn!("Ignoring author table: {}", err);
            AuthorTable::new()
        }
    };

    let items: Vec<RawItem> = channel.children_named("item").map(parse_item).collect();
    press_debug!(
        "Parsed export: {} items, {} authors",
        items.len(),
        authors.len()
    );
    Ok(ExportDocument { authors, items })
}

fn parse_authors(channel: &XmlElement) -> Result<AuthorTable, AuthorSectionError> {
    let mut table = AuthorTable::new();
    for (index, author) in channel.children_named("wp:author").enumerate() {
        let login = author
            .child("wp:author_login")
            .ok_or(AuthorSectionError::MissingField {
                index,
                field: "wp:author_login",
            })?;
        let display = author
            .child("wp:author_display_name")
            .ok_or(AuthorSectionError::MissingField {
                index,
                field: "wp:author_display_name",
            })?;
        table.insert(&login.text, &display.text);
    }
    Ok(table)
}

fn parse_item(node: &XmlElement) -> RawItem {
    let terms = node
        .children_named("category")
        .map(|c| RawTerm {
            domain: TermDomain::from_attr(c.attr("domain").unwrap_or_default()),
            label: c.text.trim().to_string(),
        })
        .collect();

    let meta: MetaPairs = node
        .children_named("wp:postmeta")
        .map(|m| (m.child_text("wp:meta_key"), m.child_text("wp:meta_value")))
        .collect();

    RawItem {
        title: node.child_text("title").to_string(),
        post_name: node.child_text("wp:post_name").to_string(),
        status: node.child_text("wp:status").to_string(),
        post_type: node.child("wp:post_type").map(|t| t.text.trim().to_string()),
        post_date: node.child_text("wp:post_date").to_string(),
        post_date_gmt: node.child_text("wp:post_date_gmt").to_string(),
        pub_date: node.child_text("pubDate").to_string(),
        creator: node.child_text("dc:creator").to_string(),
        excerpt_html: node.child_text("excerpt:encoded").to_string(),
        content_html: node.child_text("content:encoded").to_string(),
        terms,
        meta,
    }
}
