//! Query façade over the playlist cache.
//!
//! Serving layers hold one [`Catalog`] for the life of the process and call
//! it from request handlers. Lookups read through the cache; the reserved
//! reload id forces a refresh instead of resolving to media.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::aggregator::Aggregator;
use crate::cache::PlaylistCache;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::mapping::{meta_from_entry, reload_id, reload_meta, stream_from_entry, MetaPreview, StreamRef};
use crate::sources::SourceList;
use crate::types::{Entry, Snapshot};

/// What an incoming id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogId<'a> {
    Refresh,
    Entry(&'a str),
}

impl<'a> CatalogId<'a> {
    pub fn parse(id: &'a str, reload_id: &str) -> Self {
        if id == reload_id { Self::Refresh } else { Self::Entry(id) }
    }
}

/// One listed item: a playable entry or the manual refresh trigger.
#[derive(Debug, Clone)]
pub enum CatalogItem {
    RefreshTrigger,
    Regular(Arc<Entry>),
}

impl CatalogItem {
    pub fn entry(&self) -> Option<&Arc<Entry>> {
        match self {
            Self::Regular(e) => Some(e),
            Self::RefreshTrigger => None,
        }
    }

    pub fn to_meta(&self, settings: &Settings) -> MetaPreview {
        match self {
            Self::Regular(e) => meta_from_entry(e, settings),
            Self::RefreshTrigger => reload_meta(settings),
        }
    }
}

/// Outcome of a forced refresh triggered through the reload id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub entries: usize,
    pub failed_sources: usize,
    pub fetched_at_epoch: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Stream(StreamRef),
    Refreshed(RefreshReport),
}

pub struct Catalog {
    settings: Settings,
    sources: Arc<SourceList>,
    cache: PlaylistCache,
    reload_id: String,
}

impl Catalog {
    pub fn new(settings: Settings, fetcher: Arc<dyn Fetcher>) -> Self {
        let sources = Arc::new(SourceList::new(settings.default_source.clone()));
        let aggregator = Aggregator::new(fetcher, settings.fetch_timeout(), settings.id_prefix.clone());
        let cache = PlaylistCache::new(aggregator, Arc::clone(&sources), settings.ttl());
        let reload_id = reload_id(&settings.id_prefix);
        Self { settings, sources, cache, reload_id }
    }

    /// Catalog fetching over HTTP.
    pub fn with_http(settings: Settings) -> anyhow::Result<Self> {
        Ok(Self::new(settings, Arc::new(HttpFetcher::new()?)))
    }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn reload_id(&self) -> &str { &self.reload_id }

    /// All entries in source order, preceded by the refresh trigger when enabled.
    pub async fn list_all(&self) -> Vec<CatalogItem> {
        let snap = self.cache.get(false).await;
        let trigger = self.settings.reload_item.then_some(CatalogItem::RefreshTrigger);
        trigger
            .into_iter()
            .chain(snap.entries.iter().cloned().map(CatalogItem::Regular))
            .collect()
    }

    pub async fn list_metas(&self) -> Vec<MetaPreview> {
        self.list_all().await.iter().map(|i| i.to_meta(&self.settings)).collect()
    }

    /// Distinct group labels in first-seen order.
    pub async fn groups(&self) -> Vec<String> {
        let snap = self.cache.get(false).await;
        let mut out: Vec<String> = Vec::new();
        for g in snap.entries.iter().filter_map(|e| e.group.as_ref()) {
            if !out.contains(g) {
                out.push(g.clone());
            }
        }
        out
    }

    /// Entries of one group, in catalog order.
    pub async fn list_group(&self, label: &str) -> Vec<Arc<Entry>> {
        let snap = self.cache.get(false).await;
        snap.entries.iter().filter(|e| e.group.as_deref() == Some(label)).cloned().collect()
    }

    pub async fn get_by_id(&self, id: &str) -> Result<CatalogItem> {
        match CatalogId::parse(id, &self.reload_id) {
            CatalogId::Refresh => Ok(CatalogItem::RefreshTrigger),
            CatalogId::Entry(id) => {
                let snap = self.cache.get(false).await;
                snap.get(id).cloned().map(CatalogItem::Regular).ok_or_else(|| Error::not_found(id))
            }
        }
    }

    /// Playable reference for `id`. The reload id forces one refresh and
    /// reports it instead.
    pub async fn resolve_stream(&self, id: &str) -> Result<Resolution> {
        match CatalogId::parse(id, &self.reload_id) {
            CatalogId::Refresh => {
                let snap = self.force_refresh().await;
                Ok(Resolution::Refreshed(RefreshReport {
                    entries: snap.len(),
                    failed_sources: snap.failed_sources.len(),
                    fetched_at_epoch: snap.fetched_at_epoch,
                }))
            }
            CatalogId::Entry(id) => {
                let snap = self.cache.get(false).await;
                snap.get(id)
                    .map(|e| Resolution::Stream(stream_from_entry(e)))
                    .ok_or_else(|| Error::not_found(id))
            }
        }
    }

    pub async fn force_refresh(&self) -> Arc<Snapshot> {
        info!("manual playlist refresh requested");
        self.cache.get(true).await
    }

    /// Add a playlist URL; takes effect on the next refresh.
    pub async fn add_source(&self, url: &str) -> Result<usize> { self.sources.add(url).await }

    /// Remove a playlist URL by index; takes effect on the next refresh.
    pub async fn remove_source(&self, index: usize) -> Result<String> { self.sources.remove(index).await }

    pub async fn sources(&self) -> Vec<String> { self.sources.snapshot().await }
}
