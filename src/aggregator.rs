use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::mapping::entry_id;
use crate::parser::parse_playlist;
use crate::types::{Entry, SourceFailure};

/// Entries merged from every source that answered, plus the ones that did not.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub entries: Vec<Entry>,
    pub failed: Vec<SourceFailure>,
}

/// Fetches all sources and merges their entries under collision-free ids.
pub struct Aggregator {
    fetcher: Arc<dyn Fetcher>,
    fetch_timeout: Duration,
    id_prefix: String,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn Fetcher>, fetch_timeout: Duration, id_prefix: impl Into<String>) -> Self {
        Self { fetcher, fetch_timeout, id_prefix: id_prefix.into() }
    }

    /// Fetch every source concurrently, each under its own timeout, and
    /// concatenate their entries in source order.
    ///
    /// A failing source only removes its own entries. Fails with
    /// [`Error::AllSourcesFailed`] when sources are configured and none answered.
    pub async fn aggregate(&self, sources: &[String]) -> Result<Aggregate> {
        let fetches = sources.iter().map(|url| self.fetch_one(url));
        let bodies = join_all(fetches).await;

        let mut out = Aggregate::default();
        for (index, (url, body)) in sources.iter().zip(bodies).enumerate() {
            match body {
                Ok(text) => {
                    let parsed = parse_playlist(&text);
                    debug!(%url, index, entries = parsed.len(), "parsed playlist source");
                    out.entries.extend(parsed.iter().map(|e| {
                        e.with_source(index, entry_id(&self.id_prefix, index, e.ordinal))
                    }));
                }
                Err(reason) => {
                    warn!(%url, index, %reason, "playlist source failed; skipping it this cycle");
                    out.failed.push(SourceFailure { index, url: url.clone(), reason });
                }
            }
        }

        if !sources.is_empty() && out.failed.len() == sources.len() {
            return Err(Error::AllSourcesFailed { count: sources.len() });
        }
        Ok(out)
    }

    async fn fetch_one(&self, url: &str) -> std::result::Result<String, String> {
        match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch_text(url, self.fetch_timeout)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(format!("{e:#}")),
            Err(_) => Err(format!("timed out after {:?}", self.fetch_timeout)),
        }
    }
}
