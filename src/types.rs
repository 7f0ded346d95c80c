use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::time::Instant;

/// One playable item parsed from a playlist document.
///
/// Entries are shared as `Arc<Entry>` inside a [`Snapshot`] and never mutated;
/// a refresh builds new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub media_url: String,
    pub group: Option<String>,
    pub poster_url: Option<String>,
    pub background_url: Option<String>,
    /// 1-based position within the source document
    pub ordinal: usize,
    /// 0-based position of the source in the source list
    pub source_index: usize,
    /// `#EXTINF` attributes the parser does not interpret
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Entry {
    /// Rebuild this entry as coming from `source_index`, under a new id.
    pub fn with_source(&self, source_index: usize, id: String) -> Entry {
        Entry { id, source_index, ..self.clone() }
    }
}

/// A source that contributed nothing to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub index: usize,
    pub url: String,
    pub reason: String,
}

/// Immutable, timestamped collection of entries plus its id index.
#[derive(Debug)]
pub struct Snapshot {
    pub fetched_at: Instant,
    pub fetched_at_epoch: i64,
    pub entries: Vec<Arc<Entry>>,
    pub index: HashMap<String, Arc<Entry>>,
    pub failed_sources: Vec<SourceFailure>,
}

impl Snapshot {
    /// Build a snapshot and its index in one step.
    pub fn new(entries: Vec<Entry>, failed_sources: Vec<SourceFailure>) -> Self {
        let entries: Vec<Arc<Entry>> = entries.into_iter().map(Arc::new).collect();
        let index = entries.iter().map(|e| (e.id.clone(), Arc::clone(e))).collect();
        Self {
            fetched_at: Instant::now(),
            fetched_at_epoch: current_epoch(),
            entries,
            index,
            failed_sources,
        }
    }

    pub fn empty() -> Self { Self::new(Vec::new(), Vec::new()) }

    pub fn get(&self, id: &str) -> Option<&Arc<Entry>> { self.index.get(id) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

pub(crate) fn current_epoch() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, ordinal: usize) -> Entry {
        Entry {
            id: id.to_string(),
            title: format!("Video {ordinal}"),
            media_url: format!("http://media/{ordinal}.mp4"),
            group: None,
            poster_url: None,
            background_url: None,
            ordinal,
            source_index: 0,
            attributes: BTreeMap::new(),
        }
    }

    #[test]
    fn snapshot_index_matches_entries() {
        let snap = Snapshot::new(vec![entry("a", 1), entry("b", 2)], Vec::new());
        assert_eq!(snap.len(), 2);
        assert!(Arc::ptr_eq(snap.get("b").unwrap(), &snap.entries[1]));
        assert!(snap.get("c").is_none());
    }

    #[test]
    fn with_source_leaves_original_untouched() {
        let original = entry("1", 1);
        let moved = original.with_source(2, "vod-3-1".to_string());
        assert_eq!(original.id, "1");
        assert_eq!(original.source_index, 0);
        assert_eq!(moved.id, "vod-3-1");
        assert_eq!(moved.source_index, 2);
        assert_eq!(moved.media_url, original.media_url);
    }
}
