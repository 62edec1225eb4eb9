//! Batch driver: export file in, one document per item out.

use std::path::PathBuf;
use std::sync::Arc;

use pressmark_core::{
    AuthorTable, FrontMatter, ImportOptions, ImportReport, ItemFailure, ItemModelError, PostItem,
    RawItem,
};
use pressmark_logging::{press_debug, press_error, press_info};

use crate::assets::{AssetResolver, AssetSettings};
use crate::convert::{Converter, Html2MdConverter};
use crate::decode::{decode_export, DecodeError};
use crate::export::{parse_export, ExportDocument, MalformedExportError};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::frontmatter::{build_markdown_document, FrontMatterError};
use crate::persist::{ensure_output_dir, PersistError};
use crate::transform::ContentTransformer;
use crate::writer::OutputWriter;

/// Errors that stop the whole run.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Malformed(#[from] MalformedExportError),
    #[error("could not prepare assets folder: {0}")]
    AssetsDir(PersistError),
}

#[derive(Debug, thiserror::Error)]
pub enum ItemErrorKind {
    #[error(transparent)]
    Model(#[from] ItemModelError),
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),
    #[error(transparent)]
    Write(#[from] PersistError),
}

/// One item could not be imported; the batch carries on.
#[derive(Debug, thiserror::Error)]
#[error("{title}: {kind}")]
pub struct ItemTransformError {
    pub title: String,
    pub file_name: Option<String>,
    pub kind: ItemErrorKind,
}

impl From<ItemTransformError> for ItemFailure {
    fn from(err: ItemTransformError) -> Self {
        ItemFailure {
            title: err.title,
            file_name: err.file_name,
            detail: err.kind.to_string(),
        }
    }
}

pub struct Importer {
    options: ImportOptions,
    transformer: ContentTransformer,
    writer: OutputWriter,
}

impl Importer {
    pub fn new(options: ImportOptions, fetch_settings: FetchSettings) -> Self {
        Self::with_parts(
            options,
            Arc::new(ReqwestFetcher::new(fetch_settings)),
            Box::new(Html2MdConverter),
        )
    }

    pub fn with_parts(
        options: ImportOptions,
        fetcher: Arc<dyn Fetcher>,
        converter: Box<dyn Converter>,
    ) -> Self {
        let assets = AssetResolver::new(AssetSettings::from_options(&options), fetcher);
        let transformer = ContentTransformer::new(assets, converter, options.strip_hero_image);
        let writer = OutputWriter::new(options.output_dir.clone());
        Self {
            options,
            transformer,
            writer,
        }
    }

    /// Read, decode and parse the configured export, then import every item.
    pub async fn run(&self) -> Result<ImportReport, ImportError> {
        let source = &self.options.source;
        let bytes = std::fs::read(source).map_err(|source_err| ImportError::Read {
            path: source.clone(),
            source: source_err,
        })?;
        let decoded = decode_export(&bytes)?;
        press_debug!(
            "Decoded {} ({} bytes) as {}",
            source.display(),
            bytes.len(),
            decoded.encoding_label
        );
        let document = parse_export(&decoded.xml)?;

        if self.options.fetch_images() {
            ensure_output_dir(&self.options.assets_dir()).map_err(ImportError::AssetsDir)?;
        }

        Ok(self.import_document(&document).await)
    }

    /// Items are handled in document order; a failing item is reported and skipped.
    pub async fn import_document(&self, document: &ExportDocument) -> ImportReport {
        let mut report = ImportReport::new();
        for raw in &document.items {
            match self.import_item(raw, &document.authors, &mut report).await {
                Ok(item) => {
                    press_debug!("Wrote {}", item.relative_path());
                    report.record_success(item.post_type());
                }
                Err(err) => {
                    let failure = ItemFailure::from(err);
                    press_error!("{failure}");
                    report.record_failure(failure);
                }
            }
        }
        for line in report.summary_lines() {
            press_info!("{line}");
        }
        report
    }

    async fn import_item(
        &self,
        raw: &RawItem,
        authors: &AuthorTable,
        report: &mut ImportReport,
    ) -> Result<PostItem, ItemTransformError> {
        let item = PostItem::from_raw(raw).map_err(|err| ItemTransformError {
            title: raw.display_title().to_string(),
            file_name: None,
            kind: err.into(),
        })?;
        let fail = |kind: ItemErrorKind| ItemTransformError {
            title: item.title().to_string(),
            file_name: Some(item.file_name().to_string()),
            kind,
        };

        let body = self
            .transformer
            .transform(item.title(), &raw.content_html)
            .await;
        let front_matter = FrontMatter::build(&item, authors, self.options.include_meta);
        let document = build_markdown_document(&front_matter, &body.markdown)
            .map_err(|err| fail(err.into()))?;
        self.writer
            .write(&item, &document)
            .map_err(|err| fail(err.into()))?;

        for status in &body.assets {
            report.record_asset(*status);
        }
        Ok(item)
    }
}
