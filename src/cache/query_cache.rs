//! Keyed cache that runs remote fetches on the Tokio runtime.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::cache::{CacheConfig, CacheDecision, CacheEntry, CacheSnapshot, CacheStatus, Clock, decide};
use crate::source::{SourceError, SourceResult};

/// Memoizes fetch results per key.
///
/// At most one request per key is in flight at any time; every reader that
/// arrives while it runs observes the same result. Each settled request bumps
/// a revision counter so consumers know to re-derive.
pub struct QueryCache<K, T> {
    entries: Mutex<HashMap<K, CacheEntry<T>>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    revision: watch::Sender<u64>,
}

impl<K, T> QueryCache<K, T>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            clock,
            revision,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Receiver that changes every time a request settles.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current state of `key` without triggering any request.
    pub fn peek(&self, key: &K) -> CacheSnapshot<T> {
        self.lock()
            .get(key)
            .map(CacheEntry::snapshot)
            .unwrap_or_else(|| CacheEntry::default().snapshot())
    }

    /// Non-blocking read. Starts a request when the policy asks for one and
    /// returns whatever is cached right now.
    ///
    /// `fetch` is only invoked when a request is actually issued.
    pub fn read<F, Fut>(self: &Arc<Self>, key: K, fetch: F) -> CacheSnapshot<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SourceResult<T>> + Send + 'static,
    {
        let now = self.clock.now();
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_default();

        let decision = decide(entry, now, self.config.freshness);
        log::debug!("Cache read {key:?}: {decision:?}");

        if matches!(decision, CacheDecision::Fetch | CacheDecision::Revalidate) {
            self.start(key, entry, fetch(), now);
        }
        entry.snapshot()
    }

    /// Like [`QueryCache::read`], but waits until there is something other
    /// than "loading" to report.
    pub async fn load<F, Fut>(self: &Arc<Self>, key: K, fetch: F) -> CacheSnapshot<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SourceResult<T>> + Send + 'static,
    {
        let mut revisions = self.subscribe();
        let mut snapshot = self.read(key.clone(), fetch);
        while snapshot.is_loading {
            if revisions.changed().await.is_err() {
                break;
            }
            snapshot = self.peek(&key);
        }
        snapshot
    }

    /// Forces a background refresh regardless of freshness. Returns `false`
    /// when a request for `key` is already running.
    pub fn revalidate<F, Fut>(self: &Arc<Self>, key: K, fetch: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SourceResult<T>> + Send + 'static,
    {
        let now = self.clock.now();
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_default();
        if entry.status == CacheStatus::InFlight {
            return false;
        }
        self.start(key, entry, fetch(), now);
        entry.status == CacheStatus::InFlight
    }

    fn start<Fut>(self: &Arc<Self>, key: K, entry: &mut CacheEntry<T>, request: Fut, now: DateTime<Utc>)
    where
        Fut: Future<Output = SourceResult<T>> + Send + 'static,
    {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("Cannot fetch {key:?} outside an async runtime: {err}");
                entry.settle_err(SourceError::Network(err.to_string()), now);
                return;
            }
        };

        entry.status = CacheStatus::InFlight;
        let cache = Arc::clone(self);
        let request = handle.spawn(request);
        handle.spawn(async move {
            // The entry must leave `InFlight` even when the request panics or
            // is cancelled, otherwise every later read would join it forever.
            let result = request.await.unwrap_or_else(|err| {
                Err(SourceError::Network(format!("fetch task failed: {err}")))
            });
            cache.settle(&key, result);
        });
    }

    fn settle(&self, key: &K, result: SourceResult<T>) {
        let now = self.clock.now();
        {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_default();
            match result {
                Ok(payload) => {
                    log::info!("Fetched {key:?}");
                    entry.settle_ok(payload, now);
                }
                Err(err) => {
                    log::warn!("Failed to fetch {key:?}: {err}");
                    entry.settle_err(err, now);
                }
            }
            self.evict(&mut entries, key);
        }
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Drops the settled entries with the oldest attempts until the map fits
    /// `capacity`. In-flight entries and `keep` are never dropped.
    fn evict(&self, entries: &mut HashMap<K, CacheEntry<T>>, keep: &K) {
        let excess = entries.len().saturating_sub(self.config.capacity.max(1));
        if excess == 0 {
            return;
        }

        let mut candidates: Vec<(Option<DateTime<Utc>>, K)> = entries
            .iter()
            .filter(|(key, entry)| entry.status != CacheStatus::InFlight && *key != keep)
            .map(|(key, entry)| (entry.last_attempt(), key.clone()))
            .collect();
        candidates.sort_by_key(|(at, _)| *at);

        for (_, key) in candidates.into_iter().take(excess) {
            entries.remove(&key);
        }
        log::debug!("Cache holds {} entries after eviction", entries.len());
    }

    /// Number of keys currently tracked, settled or in flight.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
