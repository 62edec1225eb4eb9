//! Embedded media: rewrite each `<img src>` to the site-local copy and keep the
//! local cache filled.

use std::path::PathBuf;
use std::sync::Arc;

use pressmark_core::{AssetStatus, ImportOptions};
use pressmark_logging::{press_debug, press_info, press_warn};
use url::Url;

use crate::body::{ImageRef, Rewrites};
use crate::fetch::Fetcher;
use crate::persist::AtomicFileWriter;
use crate::AssetFetchError;

pub(crate) const SITE_BASEURL: &str = "{{ site.baseurl }}";
const CACHE_HIT_NOTE: &str = "Already in cache. Clean assets folder if you want a redownload.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSettings {
    pub assets_dir: PathBuf,
    pub assets_folder: String,
    pub fetch_images: bool,
    pub strict: bool,
}

impl AssetSettings {
    pub fn from_options(options: &ImportOptions) -> Self {
        Self {
            assets_dir: options.assets_dir(),
            assets_folder: options.assets_folder.clone(),
            fetch_images: options.fetch_images(),
            strict: options.strict_assets,
        }
    }
}

/// Base filename of an asset URL. `None` when nothing usable remains.
pub fn asset_basename(src: &str) -> Option<String> {
    let candidate = match Url::parse(src) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string(),
        Err(_) => {
            let tail = src.rsplit('/').next().unwrap_or(src);
            let end = tail.find(&['?', '#'][..]).unwrap_or(tail.len());
            tail[..end].to_string()
        }
    };
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate == "." || candidate == ".." || candidate.contains('\\') {
        return None;
    }
    Some(candidate.to_string())
}

/// `{{ site.baseurl }}/{folder}/{basename}`
pub fn site_path(assets_folder: &str, basename: &str) -> String {
    format!("{SITE_BASEURL}/{assets_folder}/{basename}")
}

pub struct AssetResolver {
    settings: AssetSettings,
    fetcher: Arc<dyn Fetcher>,
    cache: AtomicFileWriter,
}

impl AssetResolver {
    pub fn new(settings: AssetSettings, fetcher: Arc<dyn Fetcher>) -> Self {
        let cache = AtomicFileWriter::new(settings.assets_dir.clone());
        Self {
            settings,
            fetcher,
            cache,
        }
    }

    /// Rewrites every reference in `images` and fetches what the cache lacks.
    /// Download failures are logged and reported, never raised.
    pub async fn resolve(
        &self,
        title: &str,
        images: &[ImageRef],
        rewrites: &mut Rewrites,
    ) -> Vec<AssetStatus> {
        if images.is_empty() {
            return Vec::new();
        }
        if self.settings.fetch_images {
            press_info!("Downloading images for {title}");
        }

        let mut statuses = Vec::with_capacity(images.len());
        for image in images {
            let Some(basename) = asset_basename(&image.src) else {
                press_debug!("No file name in {}; leaving it untouched", image.src);
                continue;
            };
            rewrites.set_src(image.node, site_path(&self.settings.assets_folder, &basename));

            if !self.settings.fetch_images {
                statuses.push(AssetStatus::Skipped);
                continue;
            }

            press_info!("{}", image.src);
            let status = match self.store(&image.src, &basename).await {
                Ok(status) => status,
                Err(err) => {
                    press_warn!("Error: {err}");
                    if self.settings.strict {
                        rewrites.revert_src(image.node);
                    }
                    AssetStatus::Failed
                }
            };
            statuses.push(status);
        }
        statuses
    }

    async fn store(&self, src: &str, basename: &str) -> Result<AssetStatus, AssetFetchError> {
        if self.cache.dir().join(basename).exists() {
            press_info!("{CACHE_HIT_NOTE}");
            return Ok(AssetStatus::Cached);
        }
        let output = self.fetcher.fetch(src).await?;
        self.cache.write_bytes(basename, &output.bytes)?;
        press_info!("OK!");
        Ok(AssetStatus::Downloaded)
    }
}
