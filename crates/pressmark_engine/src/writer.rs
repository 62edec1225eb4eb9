use std::path::PathBuf;

use pressmark_core::PostItem;

use crate::persist::{AtomicFileWriter, PersistError};

/// Places documents at `{root}/{directoryName}/{fileName}`, replacing any
/// previous file.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn write(&self, item: &PostItem, document: &str) -> Result<PathBuf, PersistError> {
        AtomicFileWriter::new(self.root.join(item.directory_name())).write(item.file_name(), document)
    }
}
