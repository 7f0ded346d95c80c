pub(crate) const EXTINF_MARKER: &str = "#EXTINF:";

/// Classification of one playlist line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `#EXTINF:` line; carries everything after the marker
    Metadata(&'a str),
    /// Media reference for the pending metadata line
    Playable(&'a str),
    /// Any other `#` line (`#EXTM3U`, `#EXTVLCOPT`, comments)
    Directive,
    Blank,
}

/// Classify a line. Total over all inputs; surrounding whitespace is ignored.
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        Line::Blank
    } else if let Some(rest) = line.strip_prefix(EXTINF_MARKER) {
        Line::Metadata(rest)
    } else if line.starts_with('#') {
        Line::Directive
    } else {
        Line::Playable(line)
    }
}
