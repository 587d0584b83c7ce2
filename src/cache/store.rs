// In-memory response cache keyed by function identity and argument content.
// Handles TTL checking against an injectable clock.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

use super::clock::Clock;

/// Default TTL for every cached call: 1 hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Identity of a cached call: which function, and a digest of its arguments.
///
/// Arguments are serialized to JSON and hashed, so two calls with equal argument
/// values (including whole record lists) share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    function: &'static str,
    digest: u64,
}

impl CacheKey {
    pub fn new<A: Serialize + ?Sized>(function: &'static str, args: &A) -> Result<Self> {
        let encoded = serde_json::to_vec(args)?;
        let mut hasher = DefaultHasher::new();
        encoded.hash(&mut hasher);
        Ok(Self {
            function,
            digest: hasher.finish(),
        })
    }
}

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was computed.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T, cached_at: DateTime<Utc>) -> Self {
        Self { data, cached_at }
    }

    /// Check if this cached data has expired at `now` based on TTL.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let elapsed = now
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed > ttl
    }

    pub fn is_valid(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        !self.is_expired(now, ttl)
    }
}

type Entry = CachedData<Arc<dyn Any + Send + Sync>>;

/// Memoizes computations for `ttl`, shared by every component through an `Arc`.
///
/// There is no single-flight: two callers racing on a missing key both compute,
/// and the later insert wins.
pub struct ResponseCache {
    entries: Mutex<HashMap<CacheKey, Entry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Read a value if present and still valid.
    pub fn get<V: Clone + 'static>(&self, key: &CacheKey) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries();
        let entry = entries.get(key)?;
        if entry.is_expired(now, self.ttl) {
            return None;
        }
        entry.data.downcast_ref::<V>().cloned()
    }

    /// Store a value stamped with the current time. Expired entries are dropped
    /// first, so content-keyed entries that are never asked for again do not pile up.
    pub fn insert<V: Send + Sync + 'static>(&self, key: CacheKey, value: V) {
        let now = self.clock.now();
        let entry = CachedData::new(Arc::new(value) as Arc<dyn Any + Send + Sync>, now);
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, cached| cached.is_valid(now, self.ttl));
        let purged = before - entries.len();
        if purged > 0 {
            debug!(purged, "dropped expired cache entries");
        }
        entries.insert(key, entry);
    }

    /// Return the cached value for `key`, or run `compute` and cache its result.
    /// Errors are returned as-is and never cached.
    pub fn get_or_compute<V, F>(&self, key: CacheKey, compute: F) -> Result<V>
    where
        V: Clone + Send + Sync + 'static,
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.get::<V>(&key) {
            debug!(function = key.function, "cache hit");
            return Ok(value);
        }
        debug!(function = key.function, "cache miss");
        let value = compute()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Async variant of [`ResponseCache::get_or_compute`] for network calls.
    /// The store lock is never held while `compute` runs.
    pub async fn get_or_compute_async<V, F, Fut>(&self, key: CacheKey, compute: F) -> Result<V>
    where
        V: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get::<V>(&key) {
            debug!(function = key.function, "cache hit");
            return Ok(value);
        }
        debug!(function = key.function, "cache miss");
        let value = compute().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
