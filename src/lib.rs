//! Playlist ingestion for video-on-demand catalogs.
//!
//! Fetches one or more M3U documents, parses them into [`Entry`] values,
//! merges them under collision-free ids and keeps the result in a TTL cache
//! behind the [`Catalog`] façade.
//!
//! ```no_run
//! use vodplaylist::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let catalog = Catalog::with_http(Settings::load(None)?)?;
//! catalog.add_source("https://example.com/extra.m3u").await?;
//! for item in catalog.list_all().await {
//!     println!("{}", item.to_meta(catalog.settings()).name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod mapping;
pub mod parser;
pub mod sources;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::catalog::{Catalog, CatalogId, CatalogItem, RefreshReport, Resolution};
    pub use crate::config::Settings;
    pub use crate::error::{Error, Result};
    pub use crate::fetch::{Fetcher, HttpFetcher};
    pub use crate::mapping::{MetaPreview, StreamRef};
    pub use crate::types::{Entry, Snapshot};
}

pub use catalog::Catalog;
pub use config::Settings;
pub use error::{Error, Result};
pub use parser::parse_playlist;
pub use types::{Entry, Snapshot};
