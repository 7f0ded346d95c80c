use std::collections::BTreeMap;

pub(crate) const NAME_KEY: &str = "tvg-name";
pub(crate) const LOGO_KEY: &str = "tvg-logo";
pub(crate) const GROUP_KEY: &str = "group-title";

/// Attributes of an `#EXTINF` line: the keys the parser consumes, typed,
/// and everything else in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// `tvg-name`, overrides the display name
    pub name: Option<String>,
    /// `tvg-logo`, poster image
    pub logo: Option<String>,
    /// `group-title`
    pub group: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl Attributes {
    fn insert(&mut self, key: String, value: String) {
        let slot = match key.as_str() {
            NAME_KEY => &mut self.name,
            LOGO_KEY => &mut self.logo,
            GROUP_KEY => &mut self.group,
            _ => {
                self.extra.insert(key, value);
                return;
            }
        };
        *slot = non_empty(&value);
    }
}

/// Parsed remainder of an `#EXTINF:` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtInf {
    pub attributes: Attributes,
    pub display_name: Option<String>,
}

impl ExtInf {
    /// Split `rest` into attributes and display name and extract the
    /// `key="value"` / `key='value'` pairs. Keys are lowercased; the last
    /// duplicate wins.
    pub fn parse(rest: &str) -> Self {
        let (segment, name) = split_display_name(rest);
        let mut attributes = Attributes::default();
        for (key, value) in pairs(segment) {
            attributes.insert(key, value);
        }
        Self { attributes, display_name: non_empty(name) }
    }
}

/// Split at the last comma outside a quoted attribute value into the
/// attribute segment and the display name. Without a comma the remainder is
/// the display name, unless its only commas sit inside quoted values: then it
/// is all attributes.
fn split_display_name(rest: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut prev = ' ';
    let mut last = None;
    let mut quoted_comma = false;
    for (i, c) in rest.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => quoted_comma |= c == ',',
            None if (c == '"' || c == '\'') && prev == '=' => quote = Some(c),
            None if c == ',' => last = Some(i),
            None => {}
        }
        if !c.is_whitespace() {
            prev = c;
        }
    }
    // unbalanced quotes: fall back to the plain last comma
    let comma = if quote.is_some() { rest.rfind(',') } else { last };
    match comma {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None if quoted_comma => (rest, ""),
        None => ("", rest),
    }
}

fn pairs(segment: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut rest = segment;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let key_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let key = &rest[..key_end];
        rest = &rest[key_end..];
        // bare token such as the `-1` duration
        let Some(after_eq) = rest.strip_prefix('=') else { continue };
        match after_eq.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &after_eq[1..];
                let (value, remaining) = match body.find(q) {
                    Some(end) => (&body[..end], &body[end + 1..]),
                    None => (body, ""),
                };
                if !key.is_empty() {
                    out.push((key.to_ascii_lowercase(), value.to_string()));
                }
                rest = remaining;
            }
            _ => {
                // unquoted values are not attributes
                let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                rest = &after_eq[end..];
            }
        }
    }
    out
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
