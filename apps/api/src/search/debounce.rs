//! Per-session debouncing of autocomplete lookups.
//!
//! Every call for a session key takes a fresh generation number. After the
//! debounce window the call only proceeds if its generation is still the
//! newest for that key; a lookup that finishes after being overtaken is
//! discarded too. Generations come from one process-wide counter so a
//! recycled key can never revive a stale ticket.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tracing::debug;

pub struct Debouncer {
    window: Duration,
    next_generation: AtomicU64,
    latest: Mutex<HashMap<String, u64>>,
}

struct Ticket<'a> {
    owner: &'a Debouncer,
    key: String,
    generation: u64,
}

impl Ticket<'_> {
    fn is_current(&self) -> bool {
        self.owner.latest_for(&self.key) == Some(self.generation)
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        let mut latest = self.owner.latest.lock().unwrap_or_else(|e| e.into_inner());
        if latest.get(&self.key) == Some(&self.generation) {
            latest.remove(&self.key);
        }
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            next_generation: AtomicU64::new(1),
            latest: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `lookup` unless a newer call for the same `key` arrives within
    /// the window or while the lookup is running; returns `None` when
    /// superseded. Calls without a key run immediately.
    pub async fn run<F, Fut, T>(&self, key: Option<&str>, lookup: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let Some(key) = key else {
            return Some(lookup().await);
        };

        let ticket = self.begin(key);
        if !self.window.is_zero() {
            tokio::time::sleep(self.window).await;
        }
        if !ticket.is_current() {
            debug!("Suggestion lookup for session {key} superseded before running");
            return None;
        }

        let out = lookup().await;
        if !ticket.is_current() {
            debug!("Suggestion lookup for session {key} superseded while running");
            return None;
        }
        Some(out)
    }

    /// Number of sessions with a pending or running lookup.
    pub fn pending_sessions(&self) -> usize {
        self.latest.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn begin(&self, key: &str) -> Ticket<'_> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        self.latest
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), generation);
        Ticket {
            owner: self,
            key: key.to_string(),
            generation,
        }
    }

    fn latest_for(&self, key: &str) -> Option<u64> {
        self.latest
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    const WINDOW: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_of_burst_runs() {
        let debouncer = Arc::new(Debouncer::new(WINDOW));
        let runs = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for term in ["b", "ba", "bac"] {
            let debouncer = debouncer.clone();
            let runs = runs.clone();
            handles.push(tokio::spawn(async move {
                debouncer
                    .run(Some("session-1"), move || async move {
                        runs.fetch_add(1, Ordering::SeqCst);
                        term.to_string()
                    })
                    .await
            }));
            tokio::time::advance(Duration::from_millis(100)).await;
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        assert_eq!(results, vec![None, None, Some("bac".to_string())]);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(debouncer.pending_sessions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_spaced_beyond_window_all_run() {
        let debouncer = Debouncer::new(WINDOW);
        let first = debouncer.run(Some("s"), || async { 1 }).await;
        let second = debouncer.run(Some("s"), || async { 2 }).await;
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sessions_are_independent() {
        let debouncer = Arc::new(Debouncer::new(WINDOW));
        let a = {
            let d = debouncer.clone();
            tokio::spawn(async move { d.run(Some("a"), || async { "a" }).await })
        };
        let b = {
            let d = debouncer.clone();
            tokio::spawn(async move { d.run(Some("b"), || async { "b" }).await })
        };
        assert_eq!(a.await.unwrap(), Some("a"));
        assert_eq!(b.await.unwrap(), Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_overtaken_while_running_is_discarded() {
        let debouncer = Arc::new(Debouncer::new(WINDOW));
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let slow = {
            let d = debouncer.clone();
            tokio::spawn(async move {
                d.run(Some("s"), move || async move {
                    started_tx.send(()).ok();
                    release_rx.await.ok();
                    "slow"
                })
                .await
            })
        };

        started_rx.await.unwrap();
        let newer = debouncer.begin("s");
        release_tx.send(()).unwrap();

        assert_eq!(slow.await.unwrap(), None);
        assert!(newer.is_current());
    }

    #[tokio::test]
    async fn test_without_key_runs_immediately() {
        let debouncer = Debouncer::new(Duration::from_secs(3600));
        assert_eq!(debouncer.run(None, || async { 7 }).await, Some(7));
        assert_eq!(debouncer.pending_sessions(), 0);
    }
}
