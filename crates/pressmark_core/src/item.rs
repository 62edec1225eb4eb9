use chrono::{DateTime, NaiveDateTime};
use scraper::Html;

use crate::raw::{RawItem, TermDomain};
use crate::{sluggify, MetaPairs};

pub const PUBLISH_STATUS: &str = "publish";
pub const DRAFTS_DIR: &str = "_drafts";
pub const UNCATEGORIZED: &str = "uncategorized";
pub const FILE_EXTENSION: &str = "markdown";

const WP_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ItemModelError {
    #[error("item has no post type")]
    MissingPostType,
    #[error("post type {0:?} is not a safe directory name")]
    InvalidPostType(String),
    #[error("neither slug nor title yields a usable permalink")]
    EmptySlug,
    #[error("slug {0:?} contains path separators")]
    UnsafeSlug(String),
    #[error("published item has no parsable date (post_date {0:?})")]
    InvalidPublishDate(String),
}

/// One content entry with every identity field derived at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostItem {
    title: String,
    permalink_slug: String,
    status: String,
    post_type: String,
    published_at: Option<NaiveDateTime>,
    file_name: String,
    directory_name: String,
    excerpt: Option<String>,
    categories: Vec<String>,
    tags: Vec<String>,
    meta: MetaPairs,
    author_login: String,
}

impl PostItem {
    pub fn from_raw(raw: &RawItem) -> Result<Self, ItemModelError> {
        let post_type = validate_post_type(raw.post_type.as_deref())?;
        let title = raw.title.trim().to_string();
        let permalink_slug = permalink_slug(&raw.post_name, &title)?;
        let status = raw.status.trim().to_string();
        let is_published = status == PUBLISH_STATUS;
        let published_at = if is_published {
            Some(parse_publish_date(raw)?)
        } else {
            None
        };

        Ok(Self {
            file_name: file_name_for(&permalink_slug, published_at.as_ref()),
            directory_name: directory_for(&post_type, is_published),
            excerpt: plain_excerpt(&raw.excerpt_html),
            categories: category_slugs(raw.labels_in(&TermDomain::Category)),
            tags: unique_tags(raw.labels_in(&TermDomain::Tag)),
            meta: raw.meta.clone(),
            author_login: raw.creator.trim().to_string(),
            title,
            permalink_slug,
            status,
            post_type,
            published_at,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn permalink_slug(&self) -> &str {
        &self.permalink_slug
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn post_type(&self) -> &str {
        &self.post_type
    }

    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    pub fn published_at(&self) -> Option<&NaiveDateTime> {
        self.published_at.as_ref()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    /// `{directory_name}/{file_name}` relative to the site root.
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.directory_name, self.file_name)
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn meta(&self) -> &MetaPairs {
        &self.meta
    }

    pub fn author_login(&self) -> &str {
        &self.author_login
    }
}

/// `YYYY-MM-DD-{slug}.markdown` when a publish date exists, `{slug}.markdown` otherwise.
pub fn file_name_for(slug: &str, published_at: Option<&NaiveDateTime>) -> String {
    match published_at {
        Some(at) => format!("{}-{slug}.{FILE_EXTENSION}", at.format("%Y-%m-%d")),
        None => format!("{slug}.{FILE_EXTENSION}"),
    }
}

/// Unpublished posts go to `_drafts`; everything else to `_{post_type}s`.
pub fn directory_for(post_type: &str, is_published: bool) -> String {
    if !is_published && post_type == "post" {
        DRAFTS_DIR.to_string()
    } else {
        format!("_{post_type}s")
    }
}

fn validate_post_type(raw: Option<&str>) -> Result<String, ItemModelError> {
    let post_type = raw.map(str::trim).unwrap_or_default();
    if post_type.is_empty() {
        return Err(ItemModelError::MissingPostType);
    }
    let safe = post_type
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !safe {
        return Err(ItemModelError::InvalidPostType(post_type.to_string()));
    }
    Ok(post_type.to_string())
}

fn permalink_slug(post_name: &str, title: &str) -> Result<String, ItemModelError> {
    let explicit = post_name.trim();
    if !explicit.is_empty() {
        if explicit.contains(&['/', '\\'][..]) || explicit.contains("..") {
            return Err(ItemModelError::UnsafeSlug(explicit.to_string()));
        }
        return Ok(explicit.to_string());
    }
    let derived = sluggify(title);
    if derived.is_empty() {
        Err(ItemModelError::EmptySlug)
    } else {
        Ok(derived)
    }
}

// post_date is local time; drafts and some exports carry 0000-00-00 there, so
// fall back to the GMT column and then to the RSS pubDate.
fn parse_publish_date(raw: &RawItem) -> Result<NaiveDateTime, ItemModelError> {
    [&raw.post_date, &raw.post_date_gmt]
        .into_iter()
        .find_map(|value| NaiveDateTime::parse_from_str(value.trim(), WP_DATE_FORMAT).ok())
        .or_else(|| {
            DateTime::parse_from_rfc2822(raw.pub_date.trim())
                .ok()
                .map(|dt| dt.naive_local())
        })
        .ok_or_else(|| ItemModelError::InvalidPublishDate(raw.post_date.clone()))
}

fn plain_excerpt(excerpt_html: &str) -> Option<String> {
    if excerpt_html.trim().is_empty() {
        return None;
    }
    let fragment = Html::parse_fragment(excerpt_html);
    let text: String = fragment.root_element().text().collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn category_slugs<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    for slug in labels.map(sluggify) {
        if slug.is_empty() || slug == UNCATEGORIZED || slugs.contains(&slug) {
            continue;
        }
        slugs.push(slug);
    }
    slugs
}

fn unique_tags<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for label in labels {
        if !tags.iter().any(|t| t == label) {
            tags.push(label.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmt_column_backs_up_zero_local_date() {
        let raw = RawItem {
            post_date: "0000-00-00 00:00:00".into(),
            post_date_gmt: "2021-07-01 08:30:00".into(),
            ..RawItem::default()
        };
        let at = parse_publish_date(&raw).unwrap();
        assert_eq!(at.format("%Y-%m-%d").to_string(), "2021-07-01");
    }

    #[test]
    fn rss_pub_date_is_last_resort() {
        let raw = RawItem {
            pub_date: "Thu, 05 Mar 2020 10:00:00 +0000".into(),
            ..RawItem::default()
        };
        let at = parse_publish_date(&raw).unwrap();
        assert_eq!(at.format(WP_DATE_FORMAT).to_string(), "2020-03-05 10:00:00");
    }

    #[test]
    fn excerpt_markup_is_stripped() {
        assert_eq!(
            plain_excerpt("<p>Short <em>summary</em></p>").as_deref(),
            Some("Short summary")
        );
        assert_eq!(plain_excerpt("<p> </p>"), None);
        assert_eq!(plain_excerpt(""), None);
    }

    #[test]
    fn post_type_must_be_path_safe() {
        assert_eq!(
            validate_post_type(Some("../etc")),
            Err(ItemModelError::InvalidPostType("../etc".into()))
        );
        assert_eq!(validate_post_type(None), Err(ItemModelError::MissingPostType));
        assert_eq!(validate_post_type(Some(" page ")).as_deref(), Ok("page"));
    }
}
