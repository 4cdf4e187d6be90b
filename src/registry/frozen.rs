use crate::registry::PageRecord;
use std::collections::HashMap;

/// Read-only mapping from normalized URL to generated filename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlToFilenameIndex {
    entries: HashMap<String, String>,
}

impl UrlToFilenameIndex {
    pub fn get(&self, normalized_url: &str) -> Option<&str> {
        self.entries.get(normalized_url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for UrlToFilenameIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Immutable registry handed from the crawl phase to the link rewrite phase
///
/// There is no way to add records to a frozen registry.
#[derive(Debug, Clone, Default)]
pub struct FrozenRegistry {
    records: HashMap<String, PageRecord>,
    index: UrlToFilenameIndex,
}

impl FrozenRegistry {
    pub(crate) fn from_parts(
        records: HashMap<String, PageRecord>,
        filenames: HashMap<String, String>,
    ) -> Self {
        Self {
            records,
            index: UrlToFilenameIndex { entries: filenames },
        }
    }

    /// Freezes a registry snapshot, deriving the index from the records
    pub fn from_snapshot(records: HashMap<String, PageRecord>) -> Self {
        let index = records
            .iter()
            .map(|(key, record)| (key.clone(), record.generated_filename.clone()))
            .collect();

        Self { records, index }
    }

    pub fn index(&self) -> &UrlToFilenameIndex {
        &self.index
    }

    pub fn get(&self, normalized_url: &str) -> Option<&PageRecord> {
        self.records.get(normalized_url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all records ordered by normalized URL
    pub fn records_sorted(&self) -> Vec<&PageRecord> {
        let mut records: Vec<&PageRecord> = self.records.values().collect();
        records.sort_by(|a, b| a.normalized_url.cmp(&b.normalized_url));
        records
    }
}
