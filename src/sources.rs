use tokio::sync::RwLock;
use tracing::info;
use url::Url;

use crate::error::{Error, Result};

/// Ordered playlist locations. Index 0 is the built-in default source.
///
/// Changing the list never refreshes the cache by itself.
#[derive(Debug)]
pub struct SourceList {
    urls: RwLock<Vec<String>>,
}

impl SourceList {
    pub fn new(default_source: impl Into<String>) -> Self {
        Self { urls: RwLock::new(vec![default_source.into()]) }
    }

    pub async fn snapshot(&self) -> Vec<String> { self.urls.read().await.clone() }

    pub async fn len(&self) -> usize { self.urls.read().await.len() }

    /// Append a source and return its index. Re-adding a known URL returns
    /// the existing index.
    pub async fn add(&self, url: &str) -> Result<usize> {
        let url = validate_source_url(url)?;
        let mut urls = self.urls.write().await;
        if let Some(pos) = urls.iter().position(|u| *u == url) {
            return Ok(pos);
        }
        urls.push(url.clone());
        info!(%url, index = urls.len() - 1, "added playlist source");
        Ok(urls.len() - 1)
    }

    /// Remove the source at `index` and return its URL.
    pub async fn remove(&self, index: usize) -> Result<String> {
        if index == 0 {
            return Err(Error::DefaultSourcePinned);
        }
        let mut urls = self.urls.write().await;
        if index >= urls.len() {
            return Err(Error::SourceIndexOutOfRange(index));
        }
        let url = urls.remove(index);
        info!(%url, index, "removed playlist source");
        Ok(url)
    }
}

/// Accept absolute http(s) URLs; returns the trimmed input.
pub fn validate_source_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|e| Error::InvalidSource(trimmed.to_string(), e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(Error::InvalidSource(trimmed.to_string(), format!("unsupported scheme `{other}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_appends_and_dedupes() {
        let list = SourceList::new("http://default/list.m3u");
        assert_eq!(list.add("http://two/list.m3u").await.unwrap(), 1);
        assert_eq!(list.add(" http://three/list.m3u ").await.unwrap(), 2);
        assert_eq!(list.add("http://two/list.m3u").await.unwrap(), 1);
        assert_eq!(list.add("http://default/list.m3u").await.unwrap(), 0);
        assert_eq!(
            list.snapshot().await,
            ["http://default/list.m3u", "http://two/list.m3u", "http://three/list.m3u"]
        );
    }

    #[tokio::test]
    async fn add_rejects_invalid_urls() {
        let list = SourceList::new("http://default/list.m3u");
        assert!(matches!(list.add("not a url").await, Err(Error::InvalidSource(..))));
        assert!(matches!(list.add("file:///etc/passwd").await, Err(Error::InvalidSource(..))));
        assert_eq!(list.len().await, 1);
    }

    #[tokio::test]
    async fn remove_by_index() {
        let list = SourceList::new("http://default/list.m3u");
        list.add("http://a/1.m3u").await.unwrap();
        list.add("http://b/2.m3u").await.unwrap();
        assert_eq!(list.remove(1).await.unwrap(), "http://a/1.m3u");
        assert_eq!(list.snapshot().await, ["http://default/list.m3u", "http://b/2.m3u"]);
        assert!(matches!(list.remove(5).await, Err(Error::SourceIndexOutOfRange(5))));
        assert!(matches!(list.remove(0).await, Err(Error::DefaultSourcePinned)));
    }
}
