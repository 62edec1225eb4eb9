//! Batch report: per-type import counts, per-item failures and asset statistics.

use serde::Serialize;

/// Diagnostic for an item that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub title: String,
    /// Derived filename, when derivation got that far.
    pub file_name: Option<String>,
    pub detail: String,
}

impl std::fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Couldn't import post! Title: {} Name/Slug: {} Error: {}",
            self.title,
            self.file_name.as_deref().unwrap_or("-"),
            self.detail
        )
    }
}

/// Outcome of handling one embedded asset reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Downloaded,
    Cached,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssetTally {
    pub downloaded: usize,
    pub cached: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl AssetTally {
    pub fn record(&mut self, status: AssetStatus) {
        match status {
            AssetStatus::Downloaded => self.downloaded += 1,
            AssetStatus::Cached => self.cached += 1,
            AssetStatus::Skipped => self.skipped += 1,
            AssetStatus::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.cached + self.skipped + self.failed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub post_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// In order of each type's first successful import.
    pub imported: Vec<TypeCount>,
    pub failures: Vec<ItemFailure>,
    pub assets: AssetTally,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, post_type: &str) {
        match self.imported.iter_mut().find(|c| c.post_type == post_type) {
            Some(entry) => entry.count += 1,
            None => self.imported.push(TypeCount {
                post_type: post_type.to_string(),
                count: 1,
            }),
        }
    }

    pub fn record_failure(&mut self, failure: ItemFailure) {
        self.failures.push(failure);
    }

    pub fn record_asset(&mut self, status: AssetStatus) {
        self.assets.record(status);
    }

    pub fn count_for(&self, post_type: &str) -> usize {
        self.imported
            .iter()
            .find(|c| c.post_type == post_type)
            .map_or(0, |c| c.count)
    }

    pub fn total_imported(&self) -> usize {
        self.imported.iter().map(|c| c.count).sum()
    }

    /// One `Imported N {type}s` line per type.
    pub fn summary_lines(&self) -> Vec<String> {
        self.imported
            .iter()
            .map(|c| format!("Imported {} {}s", c.count, c.post_type))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
