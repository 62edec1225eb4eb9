use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered key/value metadata attached to one item (`wp:postmeta`).
///
/// Inserting an existing key replaces its value in place, so the first
/// position is kept and the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaPairs {
    entries: Vec<(String, String)>,
}

impl MetaPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value of a recognized SEO override, ignoring blank values.
    pub fn seo_override(&self, field: SeoOverride) -> Option<&str> {
        self.get(field.meta_key()).filter(|v| !v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetaPairs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut pairs = MetaPairs::new();
        for (k, v) in iter {
            pairs.insert(k, v);
        }
        pairs
    }
}

impl Serialize for MetaPairs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Front-matter fields that item metadata may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeoOverride {
    /// Replaces `page_title`.
    Title,
    /// Fills `page_description`.
    Description,
}

impl SeoOverride {
    pub const ALL: [SeoOverride; 2] = [SeoOverride::Title, SeoOverride::Description];

    /// Metadata key written by the Yoast SEO plugin.
    pub fn meta_key(self) -> &'static str {
        match self {
            SeoOverride::Title => "_yoast_wpseo_title",
            SeoOverride::Description => "_yoast_wpseo_metadesc",
        }
    }
}
