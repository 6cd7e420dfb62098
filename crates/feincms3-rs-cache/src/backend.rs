//! Cache backends.
//!
//! - [`InMemoryCache`] - Thread-safe in-memory cache with TTL support
//! - [`DummyCache`] - No-op cache for disabling caching
//!
//! ```rust,no_run
//! use feincms3_rs_cache::{CacheBackend, CacheValue, InMemoryCache};
//! use std::time::Duration;
//!
//! async fn example() {
//!     let cache = InMemoryCache::new();
//!     cache
//!         .set("key", CacheValue::from("hello"), Some(Duration::from_secs(60)))
//!         .await
//!         .unwrap();
//!     let val = cache.get("key").await.unwrap();
//!     assert!(val.is_some());
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::Instant;

use feincms3_rs_core::Feincms3Error;

/// A value that can be stored in a cache backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheValue {
    /// A string value.
    String(String),
    /// A 64-bit integer value.
    Integer(i64),
}

impl CacheValue {
    /// Returns the value as a string, if it is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an i64, if it is an `Integer` variant.
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for CacheValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// A backend for storing and retrieving cached values.
///
/// All methods are async and the trait requires `Send + Sync` so a single
/// backend can be shared between tasks behind an `Arc`.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Retrieves a value from the cache by key.
    ///
    /// Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> Result<Option<CacheValue>, Feincms3Error>;

    /// Stores a value in the cache, replacing any previous value.
    ///
    /// If `ttl` is `None`, the backend default timeout applies.
    async fn set(
        &self,
        key: &str,
        value: CacheValue,
        ttl: Option<Duration>,
    ) -> Result<(), Feincms3Error>;

    /// Deletes a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> Result<bool, Feincms3Error>;

    /// Removes all entries from the cache.
    async fn clear(&self) -> Result<(), Feincms3Error>;

    /// Checks whether a key exists in the cache.
    async fn has_key(&self, key: &str) -> Result<bool, Feincms3Error> {
        Ok(self.get(key).await?.is_some())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CacheValue,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// A thread-safe in-memory cache backend with TTL support.
///
/// Expiry is measured with [`tokio::time::Instant`], so a paused test clock
/// controls it. When the cache is full, expired entries are purged first and
/// then the entry closest to expiry is evicted.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<HashMap<String, CacheEntry>>>,
    key_prefix: String,
    default_timeout: Option<Duration>,
    max_entries: usize,
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCache {
    /// Default capacity, matching Django's locmem backend.
    pub const DEFAULT_MAX_ENTRIES: usize = 300;

    /// Creates a new empty in-memory cache whose entries never expire by default.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            key_prefix: String::new(),
            default_timeout: None,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    /// Sets the prefix applied to every key.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Sets the TTL used when `set` is called without one.
    #[must_use]
    pub const fn default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Sets the maximum number of entries held at once.
    #[must_use]
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// Returns the number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Returns the remaining lifetime of `key`, or `None` if it is missing or
    /// never expires.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let store = self.store.read().await;
        let now = Instant::now();
        store
            .get(&self.make_key(key))
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.expires_at)
            .map(|exp| exp.saturating_duration_since(now))
    }

    fn make_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{key}", self.key_prefix)
        }
    }

    fn cull(store: &mut HashMap<String, CacheEntry>, max_entries: usize, now: Instant) {
        store.retain(|_, entry| !entry.is_expired(now));
        while store.len() >= max_entries {
            let victim = store
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at.map_or(u128::MAX, |exp| {
                    exp.saturating_duration_since(now).as_nanos()
                }))
                .map(|(key, _)| key.clone());
            match victim {
                Some(key) => {
                    tracing::debug!(key = %key, "evicting cache entry");
                    store.remove(&key);
                }
                None => break,
            }
        }
    }
}

#[async_trait]
impl CacheBackend for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CacheValue>, Feincms3Error> {
        let store = self.store.read().await;
        Ok(store
            .get(&self.make_key(key))
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.value.clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: CacheValue,
        ttl: Option<Duration>,
    ) -> Result<(), Feincms3Error> {
        let key = self.make_key(key);
        let now = Instant::now();
        // A lifetime past the clock's range never expires.
        let expires_at = ttl
            .or(self.default_timeout)
            .and_then(|d| now.checked_add(d));

        let mut store = self.store.write().await;
        if !store.contains_key(&key) && store.len() >= self.max_entries {
            Self::cull(&mut store, self.max_entries, now);
        }
        store.insert(key, CacheEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, Feincms3Error> {
        let mut store = self.store.write().await;
        Ok(store.remove(&self.make_key(key)).is_some())
    }

    async fn clear(&self) -> Result<(), Feincms3Error> {
        self.store.write().await.clear();
        Ok(())
    }
}

/// A no-op cache backend that never stores anything.
///
/// Every lookup misses, which turns negative caching off entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyCache;

#[async_trait]
impl CacheBackend for DummyCache {
    async fn get(&self, _key: &str) -> Result<Option<CacheValue>, Feincms3Error> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &str,
        _value: CacheValue,
        _ttl: Option<Duration>,
    ) -> Result<(), Feincms3Error> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool, Feincms3Error> {
        Ok(false)
    }

    async fn clear(&self) -> Result<(), Feincms3Error> {
        Ok(())
    }
}
