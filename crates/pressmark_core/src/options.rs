//! Import options recognized by the pipeline.

use std::path::PathBuf;

pub const DEFAULT_SOURCE: &str = "wordpress.xml";
pub const DEFAULT_ASSETS_FOLDER: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Export file to read.
    pub source: PathBuf,
    /// Site root; item directories and the assets folder are created below it.
    pub output_dir: PathBuf,
    /// Rewrite image references but never download them.
    pub no_fetch_images: bool,
    /// Folder name used both as the local cache dir and the site path prefix.
    pub assets_folder: String,
    /// Embed the full `wp:postmeta` mapping under `meta`.
    pub include_meta: bool,
    /// Remove the first image of each body before anything else sees it.
    pub strip_hero_image: bool,
    /// Restore the original image URL when its download fails.
    pub strict_assets: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            output_dir: PathBuf::from("."),
            no_fetch_images: false,
            assets_folder: DEFAULT_ASSETS_FOLDER.to_string(),
            include_meta: false,
            strip_hero_image: true,
            strict_assets: false,
        }
    }
}

impl ImportOptions {
    pub fn fetch_images(&self) -> bool {
        !self.no_fetch_images
    }

    /// Local cache directory for downloaded assets.
    pub fn assets_dir(&self) -> PathBuf {
        self.output_dir.join(&self.assets_folder)
    }
}
