use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::types::Entry;

pub const RELOAD_TITLE: &str = "Reload playlist";
const MEDIA_KIND: &str = "movie";

/// Globally unique id of an entry: source position (1-based) and the entry's
/// ordinal within that source.
pub fn entry_id(prefix: &str, source_index: usize, ordinal: usize) -> String {
    format!("{}{}-{}", prefix, source_index + 1, ordinal)
}

/// Reserved id of the manual reload item.
pub fn reload_id(prefix: &str) -> String {
    format!("{prefix}reload")
}

/// Catalog/meta shape handed to the media-browsing client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub poster: String,
    pub background: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
}

/// Playable reference for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRef {
    pub url: String,
    pub title: String,
}

pub fn meta_from_entry(entry: &Entry, settings: &Settings) -> MetaPreview {
    MetaPreview {
        id: entry.id.clone(),
        kind: MEDIA_KIND.to_string(),
        name: entry.title.clone(),
        poster: entry.poster_url.clone().unwrap_or_else(|| settings.placeholder_poster.clone()),
        background: entry
            .background_url
            .clone()
            .unwrap_or_else(|| settings.placeholder_background.clone()),
        description: entry.title.clone(),
        genres: entry.group.iter().cloned().collect(),
    }
}

pub fn reload_meta(settings: &Settings) -> MetaPreview {
    MetaPreview {
        id: reload_id(&settings.id_prefix),
        kind: MEDIA_KIND.to_string(),
        name: RELOAD_TITLE.to_string(),
        poster: settings.placeholder_poster.clone(),
        background: settings.placeholder_background.clone(),
        description: "Fetch the playlist sources again".to_string(),
        genres: Vec::new(),
    }
}

pub fn stream_from_entry(entry: &Entry) -> StreamRef {
    StreamRef { url: entry.media_url.clone(), title: entry.title.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry() -> Entry {
        Entry {
            id: "vod-1-4".to_string(),
            title: "Night Drive".to_string(),
            media_url: "http://media/night.mp4".to_string(),
            group: Some("Drama".to_string()),
            poster_url: None,
            background_url: None,
            ordinal: 4,
            source_index: 0,
            attributes: BTreeMap::new(),
        }
    }

    #[test]
    fn ids_encode_source_and_ordinal() {
        assert_eq!(entry_id("vod-", 0, 1), "vod-1-1");
        assert_eq!(entry_id("vod-", 1, 1), "vod-2-1");
        assert_eq!(entry_id("", 2, 10), "3-10");
        assert_eq!(reload_id("vod-"), "vod-reload");
    }

    #[test]
    fn meta_falls_back_to_placeholders() {
        let settings = Settings::default();
        let meta = meta_from_entry(&entry(), &settings);
        assert_eq!(meta.poster, settings.placeholder_poster);
        assert_eq!(meta.background, settings.placeholder_background);
        assert_eq!(meta.genres, ["Drama"]);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["type"], "movie");
        assert_eq!(json["name"], "Night Drive");
    }

    #[test]
    fn meta_keeps_entry_poster() {
        let mut e = entry();
        e.poster_url = Some("http://img/p.png".to_string());
        let meta = meta_from_entry(&e, &Settings::default());
        assert_eq!(meta.poster, "http://img/p.png");
    }

    #[test]
    fn stream_carries_url_and_title() {
        let s = stream_from_entry(&entry());
        assert_eq!(s, StreamRef { url: "http://media/night.mp4".into(), title: "Night Drive".into() });
    }
}
