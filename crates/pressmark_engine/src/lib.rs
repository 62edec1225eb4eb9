//! Pressmark engine: export decoding, body rewriting, asset fetching and output.
mod assets;
mod autop;
mod body;
mod convert;
mod decode;
mod export;
mod fetch;
mod frontmatter;
mod importer;
mod persist;
mod transform;
mod types;
mod writer;
mod xml;

pub use assets::{asset_basename, site_path, AssetResolver, AssetSettings};
pub use autop::autop;
pub use body::{BodyDocument, ImageRef, NodeId, Rewrites};
pub use convert::{finish_markdown, Converter, Html2MdConverter};
pub use decode::{decode_export, DecodeError, DecodedExport};
pub use export::{parse_export, ExportDocument, MalformedExportError};
pub use fetch::{is_safe_redirect, FetchSettings, Fetcher, ReqwestFetcher};
pub use frontmatter::{build_markdown_document, FrontMatterError};
pub use importer::{ImportError, Importer, ItemErrorKind, ItemTransformError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use transform::{ContentTransformer, TransformedBody};
pub use types::{AssetFetchError, FailureKind, FetchError, FetchMetadata, FetchOutput};
pub use writer::OutputWriter;
pub use xml::{parse_document, XmlElement, XmlError};
