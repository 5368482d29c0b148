//! Time-bounded snapshot of job records backing autocomplete.
//!
//! The whole snapshot is replaced as a unit. There is no lock around the
//! check-fetch-replace sequence: two callers that both see a stale snapshot
//! both fetch, and the later write wins. The fetch is a read of the same
//! collection, so the result converges.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::config::SearchConfig;
use crate::models::job::JobRecord;
use crate::search::store::JobStore;

struct CacheEntry {
    jobs: Arc<Vec<JobRecord>>,
    fetched_at: Instant,
}

pub struct SnapshotCache {
    store: Arc<dyn JobStore>,
    freshness: Duration,
    fetch_limit: u32,
    entry: RwLock<Option<CacheEntry>>,
}

impl SnapshotCache {
    pub fn new(store: Arc<dyn JobStore>, freshness: Duration, fetch_limit: u32) -> Self {
        Self {
            store,
            freshness,
            fetch_limit,
            entry: RwLock::new(None),
        }
    }

    pub fn from_config(store: Arc<dyn JobStore>, config: &SearchConfig) -> Self {
        Self::new(store, config.cache_ttl, config.cache_fetch_limit)
    }

    /// Returns the cached records while they are younger than the freshness
    /// window, otherwise refetches up to `fetch_limit` records.
    ///
    /// A failed fetch yields an empty list and leaves the old entry (and its
    /// timestamp) in place, so the next call retries.
    pub async fn snapshot(&self) -> Arc<Vec<JobRecord>> {
        if let Some(jobs) = self.fresh() {
            debug!("Search snapshot cache hit ({} jobs)", jobs.len());
            return jobs;
        }

        match self.store.list_jobs(Some(i64::from(self.fetch_limit))).await {
            Ok(jobs) => {
                let jobs = Arc::new(jobs);
                info!("Search snapshot refreshed with {} jobs", jobs.len());
                *self.entry.write().unwrap_or_else(|e| e.into_inner()) = Some(CacheEntry {
                    jobs: Arc::clone(&jobs),
                    fetched_at: Instant::now(),
                });
                jobs
            }
            Err(e) => {
                error!("Error fetching jobs for search snapshot: {e}");
                Arc::new(Vec::new())
            }
        }
    }

    /// Drops the snapshot; the next `snapshot()` call refetches.
    pub fn reset(&self) {
        *self.entry.write().unwrap_or_else(|e| e.into_inner()) = None;
        info!("Search snapshot cache cleared");
    }

    fn fresh(&self) -> Option<Arc<Vec<JobRecord>>> {
        let guard = self.entry.read().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.freshness)
            .map(|entry| Arc::clone(&entry.jobs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::{titled, MemoryJobStore};

    const FIVE_MINUTES: Duration = Duration::from_secs(5 * 60);

    fn cache_over(store: &Arc<MemoryJobStore>) -> SnapshotCache {
        SnapshotCache::new(store.clone(), FIVE_MINUTES, 500)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_snapshot_is_served_without_refetch() {
        let store = Arc::new(MemoryJobStore::with_jobs(vec![titled("A"), titled("B")]));
        let cache = cache_over(&store);

        assert_eq!(cache.snapshot().await.len(), 2);
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.snapshot().await.len(), 2);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_snapshot_triggers_refetch() {
        let store = Arc::new(MemoryJobStore::with_jobs(vec![
            titled("A"),
            titled("B"),
            titled("C"),
        ]));
        let cache = cache_over(&store);
        assert_eq!(cache.snapshot().await.len(), 3);

        store.set_jobs(vec![titled("D")]);
        tokio::time::advance(Duration::from_secs(6 * 60)).await;

        let jobs = cache.snapshot().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title.as_deref(), Some("D"));
        assert_eq!(store.list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_is_capped_at_limit() {
        let store = Arc::new(MemoryJobStore::with_jobs(
            (0..20).map(|i| titled(&format!("Job {i}"))).collect(),
        ));
        let cache = SnapshotCache::new(store.clone(), FIVE_MINUTES, 5);

        assert_eq!(cache.snapshot().await.len(), 5);
        assert_eq!(store.last_limit(), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_returns_empty_and_retries_next_call() {
        let store = Arc::new(MemoryJobStore::with_jobs(vec![titled("A")]));
        store.set_failing(true);
        let cache = cache_over(&store);

        assert!(cache.snapshot().await.is_empty());

        store.set_failing(false);
        assert_eq!(cache.snapshot().await.len(), 1);
        assert_eq!(store.list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_keeps_stale_entry_and_timestamp() {
        let store = Arc::new(MemoryJobStore::with_jobs(vec![titled("A")]));
        let cache = cache_over(&store);
        cache.snapshot().await;

        tokio::time::advance(Duration::from_secs(6 * 60)).await;
        store.set_failing(true);
        assert!(cache.snapshot().await.is_empty());

        // Timestamp was not bumped: still stale, so this call fetches again.
        store.set_failing(false);
        assert_eq!(cache.snapshot().await.len(), 1);
        assert_eq!(store.list_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_forces_refetch() {
        let store = Arc::new(MemoryJobStore::with_jobs(vec![titled("A")]));
        let cache = cache_over(&store);
        cache.snapshot().await;

        cache.reset();
        cache.snapshot().await;
        assert_eq!(store.list_calls(), 2);
    }
}
