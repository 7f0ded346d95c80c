use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::sources::validate_source_url;

pub const DEFAULT_SOURCE: &str = "https://app.rcsfacility.com/1.m3u";
pub const DEFAULT_TTL_SECS: u64 = 300;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

const ENV_DEFAULT_SOURCE: &str = "VODPLAYLIST_DEFAULT_SOURCE";
const ENV_TTL_SECS: &str = "VODPLAYLIST_TTL_SECS";
const ENV_FETCH_TIMEOUT_SECS: &str = "VODPLAYLIST_FETCH_TIMEOUT_SECS";
const ENV_ID_PREFIX: &str = "VODPLAYLIST_ID_PREFIX";
const ENV_RELOAD_ITEM: &str = "VODPLAYLIST_RELOAD_ITEM";

/// Runtime settings. Layered as defaults, then TOML file, then environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Built-in first source; cannot be removed at runtime
    pub default_source: String,
    /// Snapshot freshness window
    pub ttl_secs: u64,
    /// Per-source fetch timeout
    pub fetch_timeout_secs: u64,
    pub id_prefix: String,
    /// List a manual reload item ahead of the entries
    pub reload_item: bool,
    pub placeholder_poster: String,
    pub placeholder_background: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_source: DEFAULT_SOURCE.to_string(),
            ttl_secs: DEFAULT_TTL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            id_prefix: "vod-".to_string(),
            reload_item: true,
            placeholder_poster: "https://dl.strem.io/addon-logo.png".to_string(),
            placeholder_background: "https://dl.strem.io/addon-background.jpg".to_string(),
        }
    }
}

impl Settings {
    pub fn ttl(&self) -> Duration { Duration::from_secs(self.ttl_secs) }
    pub fn fetch_timeout(&self) -> Duration { Duration::from_secs(self.fetch_timeout_secs) }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("reading {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Load settings from `path`, or from the per-user config file when it
    /// exists, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_env<F>(&mut self, get: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get(ENV_DEFAULT_SOURCE) { self.default_source = v; }
        if let Some(v) = get(ENV_TTL_SECS) { self.ttl_secs = parse_env(ENV_TTL_SECS, &v)?; }
        if let Some(v) = get(ENV_FETCH_TIMEOUT_SECS) {
            self.fetch_timeout_secs = parse_env(ENV_FETCH_TIMEOUT_SECS, &v)?;
        }
        if let Some(v) = get(ENV_ID_PREFIX) { self.id_prefix = v; }
        if let Some(v) = get(ENV_RELOAD_ITEM) { self.reload_item = parse_flag(ENV_RELOAD_ITEM, &v)?; }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate_source_url(&self.default_source)
            .map_err(|e| Error::config(format!("default_source: {e}")))?;
        if self.fetch_timeout_secs == 0 {
            return Err(Error::config("fetch_timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

/// `config.toml` in the per-user configuration directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "vodplaylist", "vodplaylist").map(|p| p.config_dir().join("config.toml"))
}

fn parse_env(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| Error::config(format!("{key}: expected seconds, got `{value}`")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::config(format!("{key}: expected a boolean, got `{value}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.ttl(), Duration::from_secs(300));
        assert_eq!(s.fetch_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = Settings::from_toml_str("ttl_secs = 600\nid_prefix = \"tv-\"\n").unwrap();
        assert_eq!(s.ttl_secs, 600);
        assert_eq!(s.id_prefix, "tv-");
        assert_eq!(s.default_source, DEFAULT_SOURCE);
        assert!(s.reload_item);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = Settings::from_toml_str("ttl_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_TTL_SECS, "42"),
            (ENV_RELOAD_ITEM, "off"),
            (ENV_DEFAULT_SOURCE, "http://lan/list.m3u"),
        ]
        .into_iter()
        .collect();
        let mut s = Settings::from_toml_str("ttl_secs = 600").unwrap();
        s.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(s.ttl_secs, 42);
        assert!(!s.reload_item);
        assert_eq!(s.default_source, "http://lan/list.m3u");
    }

    #[test]
    fn malformed_env_value_is_rejected() {
        let mut s = Settings::default();
        let err = s
            .apply_env(|k| (k == ENV_FETCH_TIMEOUT_SECS).then(|| "ten".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_FETCH_TIMEOUT_SECS));
    }

    #[test]
    fn validate_rejects_bad_default_source_and_zero_timeout() {
        let s = Settings { default_source: "ftp://nope".into(), ..Settings::default() };
        assert!(s.validate().is_err());
        let s = Settings { fetch_timeout_secs: 0, ..Settings::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vod.toml");
        std::fs::write(&path, "fetch_timeout_secs = 10\nreload_item = false\n").unwrap();
        let s = Settings::from_file(&path).unwrap();
        assert_eq!(s.fetch_timeout_secs, 10);
        assert!(!s.reload_item);
        assert!(Settings::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
