//! Lenient M3U playlist parsing.
//!
//! A document alternates `#EXTINF:` metadata lines and media reference lines.
//! The parser keeps a single pending slot: a metadata line always replaces it,
//! a media line completes it. Fragments that cannot form a complete entry are
//! skipped silently; parsing never fails.

pub mod attributes;
pub mod line;

pub use attributes::{Attributes, ExtInf};
pub use line::{classify, Line};

use crate::types::Entry;

/// Metadata waiting for its media line.
struct Pending {
    title: String,
    attributes: Attributes,
}

/// Parse one playlist document into entries with 1-based ordinals.
///
/// Entry ids use the single-source form (`"{ordinal}"`); the aggregator
/// reassigns them per source.
pub fn parse_playlist(text: &str) -> Vec<Entry> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();
    let mut pending: Option<Pending> = None;

    for raw in text.lines() {
        match classify(raw) {
            Line::Metadata(rest) => {
                let ext = ExtInf::parse(rest);
                let next_ordinal = entries.len() + 1;
                let title = ext
                    .attributes
                    .name
                    .clone()
                    .or(ext.display_name)
                    .unwrap_or_else(|| placeholder_title(next_ordinal));
                pending = Some(Pending { title, attributes: ext.attributes });
            }
            Line::Playable(url) => {
                let Some(p) = pending.take() else { continue };
                let ordinal = entries.len() + 1;
                entries.push(Entry {
                    id: ordinal.to_string(),
                    title: p.title,
                    media_url: url.to_string(),
                    group: p.attributes.group,
                    poster_url: p.attributes.logo,
                    background_url: None,
                    ordinal,
                    source_index: 0,
                    attributes: p.attributes.extra,
                });
            }
            Line::Directive | Line::Blank => {}
        }
    }
    entries
}

pub fn placeholder_title(ordinal: usize) -> String {
    format!("Video {ordinal}")
}
