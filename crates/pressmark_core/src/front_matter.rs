use serde::Serialize;

use crate::{AuthorTable, MetaPairs, PostItem, SeoOverride};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header block of one generated file.
///
/// Field order is the emitted key order. The fixed keys are always present
/// (absent values render as `null`); `excerpt` and `meta` are omitted when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub layout: String,
    pub title: String,
    pub page_title: String,
    pub page_description: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub post_type: String,
    pub published: bool,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaPairs>,
}

impl FrontMatter {
    pub fn build(item: &PostItem, authors: &AuthorTable, include_meta: bool) -> Self {
        let mut page_title = item.title().to_string();
        let mut page_description = None;
        for field in SeoOverride::ALL {
            let Some(value) = item.meta().seo_override(field) else {
                continue;
            };
            match field {
                SeoOverride::Title => page_title = value.to_string(),
                SeoOverride::Description => page_description = Some(value.to_string()),
            }
        }

        Self {
            layout: item.post_type().to_string(),
            title: item.title().to_string(),
            page_title,
            page_description,
            date: item
                .published_at()
                .map(|at| at.format(DATE_FORMAT).to_string()),
            post_type: item.post_type().to_string(),
            published: item.is_published(),
            categories: item.categories().to_vec(),
            tags: item.tags().to_vec(),
            author: authors.display_name(item.author_login()).map(str::to_string),
            excerpt: item.excerpt().map(str::to_string),
            meta: include_meta.then(|| item.meta().clone()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
