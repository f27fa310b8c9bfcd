//! Stale-while-revalidate cache for remote reads.
//!
//! Each entry remembers the last good payload, when it was fetched, and
//! whether a request is currently in flight. [`decide`] is the whole policy;
//! [`QueryCache`] applies it and runs the fetches.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::source::SourceError;

pub mod clock;
pub mod query_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use query_cache::QueryCache;

pub const DEFAULT_FRESHNESS_SECS: u64 = 60;

/// Keys kept per cache before the oldest settled ones are evicted.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a settled attempt is served without asking the remote again.
    pub freshness: TimeDelta,
    /// Upper bound on tracked keys. Settled entries with the oldest attempt
    /// go first; requests in flight are kept.
    pub capacity: usize,
    /// Refetch stale data when the consumer regains focus.
    pub revalidate_on_focus: bool,
    /// Refetch stale data when connectivity comes back.
    pub revalidate_on_reconnect: bool,
}

impl CacheConfig {
    pub fn with_freshness_secs(secs: u64) -> Self {
        let freshness = i64::try_from(secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            freshness,
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness: TimeDelta::seconds(DEFAULT_FRESHNESS_SECS as i64),
            capacity: DEFAULT_CACHE_CAPACITY,
            revalidate_on_focus: false,
            revalidate_on_reconnect: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Idle,
    InFlight,
    Failed,
}

/// State kept per request identity.
pub struct CacheEntry<T> {
    pub payload: Option<Arc<T>>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
    pub status: CacheStatus,
    pub error: Option<SourceError>,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            payload: None,
            fetched_at: None,
            failed_at: None,
            status: CacheStatus::Idle,
            error: None,
        }
    }
}

impl<T> fmt::Debug for CacheEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("has_payload", &self.payload.is_some())
            .field("fetched_at", &self.fetched_at)
            .field("failed_at", &self.failed_at)
            .field("status", &self.status)
            .field("error", &self.error)
            .finish()
    }
}

impl<T> CacheEntry<T> {
    /// Most recent settled attempt, successful or not.
    pub fn last_attempt(&self) -> Option<DateTime<Utc>> {
        self.fetched_at.max(self.failed_at)
    }

    pub fn snapshot(&self) -> CacheSnapshot<T> {
        let in_flight = self.status == CacheStatus::InFlight;
        CacheSnapshot {
            data: self.payload.clone(),
            is_loading: in_flight && self.payload.is_none(),
            is_validating: in_flight,
            error: self.error.clone(),
        }
    }

    pub(crate) fn settle_ok(&mut self, payload: T, now: DateTime<Utc>) {
        self.payload = Some(Arc::new(payload));
        self.fetched_at = Some(now);
        self.failed_at = None;
        self.error = None;
        self.status = CacheStatus::Idle;
    }

    /// Keeps the last good payload around.
    pub(crate) fn settle_err(&mut self, error: SourceError, now: DateTime<Utc>) {
        self.failed_at = Some(now);
        self.error = Some(error);
        self.status = CacheStatus::Failed;
    }
}

/// What a read should do with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    /// Serve what is there; the last attempt is still fresh.
    Serve,
    /// A request is already running; share its result.
    Join,
    /// Nothing to serve; issue a request and report loading.
    Fetch,
    /// Serve the stale payload and refresh in the background.
    Revalidate,
}

pub fn decide<T>(entry: &CacheEntry<T>, now: DateTime<Utc>, freshness: TimeDelta) -> CacheDecision {
    if entry.status == CacheStatus::InFlight {
        return CacheDecision::Join;
    }
    match entry.last_attempt() {
        Some(at) if now - at < freshness => CacheDecision::Serve,
        _ if entry.payload.is_some() => CacheDecision::Revalidate,
        _ => CacheDecision::Fetch,
    }
}

/// `{data, isLoading, error}` as seen by a consumer.
#[derive(Debug)]
pub struct CacheSnapshot<T> {
    pub data: Option<Arc<T>>,
    /// In flight with nothing to show yet.
    pub is_loading: bool,
    /// In flight, whether or not stale data is being shown.
    pub is_validating: bool,
    pub error: Option<SourceError>,
}

impl<T> Clone for CacheSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            is_validating: self.is_validating,
            error: self.error.clone(),
        }
    }
}
