//! Pressmark core: the pure item model for WordPress export imports.
//!
//! Nothing here touches the filesystem or network; the engine crate feeds raw
//! items in and writes the derived results out.
mod authors;
mod front_matter;
mod item;
mod meta;
mod options;
mod raw;
mod report;
mod slug;

pub use authors::AuthorTable;
pub use front_matter::FrontMatter;
pub use item::{
    directory_for, file_name_for, ItemModelError, PostItem, DRAFTS_DIR, FILE_EXTENSION,
    PUBLISH_STATUS, UNCATEGORIZED,
};
pub use meta::{MetaPairs, SeoOverride};
pub use options::{ImportOptions, DEFAULT_ASSETS_FOLDER, DEFAULT_SOURCE};
pub use raw::{RawItem, RawTerm, TermDomain};
pub use report::{AssetStatus, AssetTally, ImportReport, ItemFailure, TypeCount};
pub use slug::sluggify;
