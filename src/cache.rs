use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::aggregator::Aggregator;
use crate::sources::SourceList;
use crate::types::Snapshot;

/// Time-bounded cache of the aggregated playlist.
///
/// Readers always see a complete snapshot: a refresh builds a new one and
/// swaps it in. At most one refresh runs at a time; callers arriving while one
/// is in flight wait for it and share its result.
pub struct PlaylistCache {
    aggregator: Aggregator,
    sources: Arc<SourceList>,
    ttl: Duration,
    current: ArcSwapOption<Snapshot>,
    refresh_lock: Mutex<()>,
    // odd while a refresh is in flight, even when idle
    generation: AtomicU64,
}

impl PlaylistCache {
    pub fn new(aggregator: Aggregator, sources: Arc<SourceList>, ttl: Duration) -> Self {
        Self {
            aggregator,
            sources,
            ttl,
            current: ArcSwapOption::empty(),
            refresh_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot, refreshing it first when forced, missing or older
    /// than the TTL. Never fails: on a total refresh failure the previous
    /// snapshot (or an empty one) is returned.
    pub async fn get(&self, force: bool) -> Arc<Snapshot> {
        if !force {
            if let Some(snap) = self.fresh() {
                return snap;
            }
        }

        let wanted = settled_generation(self.generation.load(Ordering::SeqCst));
        let _guard = self.refresh_lock.lock().await;
        if self.generation.load(Ordering::SeqCst) >= wanted {
            return self.current_or_empty();
        }
        if !force {
            if let Some(snap) = self.fresh() {
                return snap;
            }
        }
        self.refresh().await
    }

    /// Current snapshot without refreshing.
    pub fn peek(&self) -> Option<Arc<Snapshot>> { self.current.load_full() }

    pub fn ttl(&self) -> Duration { self.ttl }

    fn fresh(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full().filter(|s| s.fetched_at.elapsed() < self.ttl)
    }

    fn current_or_empty(&self) -> Arc<Snapshot> {
        self.current.load_full().unwrap_or_else(|| Arc::new(Snapshot::empty()))
    }

    async fn refresh(&self) -> Arc<Snapshot> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let sources = self.sources.snapshot().await;
        let result = self.aggregator.aggregate(&sources).await;

        let snap = match result {
            Ok(agg) => {
                let snap = Arc::new(Snapshot::new(agg.entries, agg.failed));
                info!(
                    entries = snap.len(),
                    sources = sources.len(),
                    failed = snap.failed_sources.len(),
                    "playlist refreshed"
                );
                self.current.store(Some(Arc::clone(&snap)));
                snap
            }
            Err(e) => {
                let prev = self.current.load_full();
                match &prev {
                    Some(p) => warn!(error = %e, entries = p.len(), "refresh failed; serving previous playlist"),
                    None => warn!(error = %e, "refresh failed and no playlist is cached"),
                }
                prev.unwrap_or_else(|| Arc::new(Snapshot::empty()))
            }
        };
        self.generation.fetch_add(1, Ordering::SeqCst);
        snap
    }
}

/// Generation a caller that observed `seen` must reach before it may reuse
/// the current snapshot: the end of the refresh in flight, or of the next one.
fn settled_generation(seen: u64) -> u64 {
    if seen % 2 == 1 { seen + 1 } else { seen + 2 }
}
