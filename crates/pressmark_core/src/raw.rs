use crate::MetaPairs;

/// Taxonomy domain of a `<category>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermDomain {
    Category,
    Tag,
    Other(String),
}

impl TermDomain {
    pub fn from_attr(domain: &str) -> Self {
        match domain {
            "category" => TermDomain::Category,
            "post_tag" => TermDomain::Tag,
            other => TermDomain::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTerm {
    pub domain: TermDomain,
    pub label: String,
}

/// One `<item>` exactly as read from the export; missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub post_name: String,
    pub status: String,
    /// `None` when the export carries no `wp:post_type` element at all.
    pub post_type: Option<String>,
    pub post_date: String,
    pub post_date_gmt: String,
    pub pub_date: String,
    pub creator: String,
    pub excerpt_html: String,
    pub content_html: String,
    pub terms: Vec<RawTerm>,
    pub meta: MetaPairs,
}

impl RawItem {
    /// Title used in diagnostics before the item model exists.
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            "(untitled)"
        } else {
            title
        }
    }

    pub fn labels_in(&self, domain: &TermDomain) -> impl Iterator<Item = &str> + '_ {
        let domain = domain.clone();
        self.terms
            .iter()
            .filter(move |t| t.domain == domain)
            .map(|t| t.label.as_str())
    }
}
