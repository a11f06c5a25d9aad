//! Shared Cache Module
//!
//! Async, cloneable front over [`CacheStore`] implementing cache-aside reads
//! and tag invalidation for request handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::cache::{CacheError, CacheKey, CacheStats, CacheStore};
use crate::error::Result;

/// Deferred computation of a cache value. It is only polled on a miss.
pub type ComputeFuture<'a> = BoxFuture<'a, Result<String>>;

/// Capabilities the list views need from a cache backend.
#[async_trait]
pub trait TagAwareCache: Send + Sync {
    /// Returns the live value under `key`, or drives `compute`, stores its
    /// output under `tags` for `ttl` seconds and returns it.
    ///
    /// A failed computation is returned to the caller and never stored.
    async fn get_or_compute(
        &self,
        key: &CacheKey,
        tags: &[String],
        ttl: u64,
        compute: ComputeFuture<'_>,
    ) -> Result<String>;

    /// Removes every entry stored under `tag`; returns how many were removed.
    async fn invalidate_tag(&self, tag: &str) -> std::result::Result<usize, CacheError>;
}

type FlightMap = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

// == Shared Cache ==
/// In-process [`TagAwareCache`] with per-key single-flight.
///
/// Concurrent misses on one key queue behind a per-key gate; the first
/// caller computes, the others find the stored value once they get in.
#[derive(Clone)]
pub struct SharedCache {
    store: Arc<RwLock<CacheStore>>,
    flights: Arc<FlightMap>,
}

impl SharedCache {
    pub fn new(store: CacheStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            flights: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self::new(CacheStore::new(max_entries))
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Removes expired entries; returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Whether a live entry exists under `key` (does not count as a lookup).
    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.store.read().await.contains(key.as_str())
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    fn join_flight(&self, key: &str) -> Flight<'_> {
        let mut flights = self.flights.lock().unwrap_or_else(PoisonError::into_inner);
        let gate = flights
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        Flight {
            flights: &self.flights,
            key: key.to_string(),
            gate,
        }
    }

    #[cfg(test)]
    fn flights_in_progress(&self) -> usize {
        self.flights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Membership in the queue for one key; leaves the map tidy on drop,
/// including when the owning request is cancelled.
struct Flight<'a> {
    flights: &'a FlightMap,
    key: String,
    gate: Arc<Mutex<()>>,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        let mut flights = self.flights.lock().unwrap_or_else(PoisonError::into_inner);
        // the map and this flight hold the only references
        if Arc::strong_count(&self.gate) == 2
            && flights
                .get(&self.key)
                .map_or(false, |gate| Arc::ptr_eq(gate, &self.gate))
        {
            flights.remove(&self.key);
        }
    }
}

#[async_trait]
impl TagAwareCache for SharedCache {
    async fn get_or_compute(
        &self,
        key: &CacheKey,
        tags: &[String],
        ttl: u64,
        compute: ComputeFuture<'_>,
    ) -> Result<String> {
        if let Some(value) = self.store.write().await.get(key.as_str()) {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }

        let flight = self.join_flight(key.as_str());
        let _turn = flight.gate.lock().await;

        let snapshot = {
            let mut store = self.store.write().await;
            if let Some(value) = store.peek(key.as_str()) {
                debug!(key = %key, "cache filled while queued");
                return Ok(value);
            }
            store.snapshot(tags)
        };

        debug!(key = %key, "cache miss, computing");
        let value = match compute.await {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, error = %err, "compute failed, nothing cached");
                return Err(err);
            }
        };

        let mut store = self.store.write().await;
        if !store.is_current(&snapshot) {
            debug!(key = %key, "tag invalidated during compute, result not stored");
            return Ok(value);
        }
        if let Err(err) = store.insert(key.as_str().to_string(), value.clone(), tags.to_vec(), ttl)
        {
            warn!(key = %key, error = %err, "computed value not cached");
        }
        Ok(value)
    }

    async fn invalidate_tag(&self, tag: &str) -> std::result::Result<usize, CacheError> {
        let removed = self.store.write().await.invalidate_tag(tag);
        debug!(tag, removed, "tag invalidated");
        Ok(removed)
    }
}
