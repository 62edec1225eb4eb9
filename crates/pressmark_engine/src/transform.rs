use pressmark_core::AssetStatus;

use crate::assets::{AssetResolver, SITE_BASEURL};
use crate::autop::autop;
use crate::body::{BodyDocument, Rewrites};
use crate::convert::{finish_markdown, Converter};

// Stands in for the Liquid tag while the converter runs; it percent-encodes
// the spaces inside `{{ site.baseurl }}` otherwise.
const BASEURL_TOKEN: &str = "pressmarksitebaseurltoken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedBody {
    pub markdown: String,
    pub assets: Vec<AssetStatus>,
}

/// HTML body → markdown body: hero strip, asset rewrite, serialize,
/// auto-paragraph, convert, clean up.
pub struct ContentTransformer {
    assets: AssetResolver,
    converter: Box<dyn Converter>,
    strip_hero_image: bool,
}

impl ContentTransformer {
    pub fn new(assets: AssetResolver, converter: Box<dyn Converter>, strip_hero_image: bool) -> Self {
        Self {
            assets,
            converter,
            strip_hero_image,
        }
    }

    pub async fn transform(&self, title: &str, content_html: &str) -> TransformedBody {
        let document = BodyDocument::parse(content_html);
        let mut rewrites = Rewrites::new();
        if self.strip_hero_image {
            document.strip_hero_image(&mut rewrites);
        }

        let images = document.images(&rewrites);
        let assets = self.assets.resolve(title, &images, &mut rewrites).await;

        let html = autop(&document.serialize(&rewrites)).replace(SITE_BASEURL, BASEURL_TOKEN);
        let markdown = self
            .converter
            .to_markdown(&html)
            .replace(BASEURL_TOKEN, SITE_BASEURL);
        TransformedBody {
            markdown: finish_markdown(&markdown),
            assets,
        }
    }
}
