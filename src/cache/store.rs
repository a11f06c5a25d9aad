//! Cache Store Module
//!
//! Tag-aware cache engine combining HashMap storage with LRU tracking,
//! TTL expiration and a tag index for bulk invalidation.

use std::collections::HashMap;

use crate::cache::{
    CacheEntry, CacheError, CacheStats, LruIndex, TagIndex, TagSnapshot, MAX_KEY_LENGTH,
    MAX_VALUE_SIZE,
};

// == Cache Store ==
/// Single-threaded cache core; callers share it behind an async lock.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruIndex,
    /// Tag to keys mapping plus tag generations
    tags: TagIndex,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruIndex::new(),
            tags: TagIndex::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Get ==
    /// Returns the value under `key` if present and unexpired, recording a
    /// hit or a miss. Expired entries are removed on the way.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.fresh(key) {
            Some(value) => {
                self.stats.record_hit();
                self.lru.touch(key);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Like [`get`](Self::get) but leaves statistics and recency untouched.
    pub fn peek(&mut self, key: &str) -> Option<String> {
        self.fresh(key)
    }

    fn fresh(&mut self, key: &str) -> Option<String> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            self.remove_entry(key);
            self.stats.set_total_entries(self.entries.len());
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Whether a live entry exists under `key`, without side effects on stats.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map_or(false, |entry| !entry.is_expired())
    }

    // == Insert ==
    /// Stores `value` under `key` with the given tags and TTL (seconds).
    ///
    /// An existing entry is replaced and its old tags released. At capacity
    /// the least recently used entry is evicted first.
    pub fn insert(
        &mut self,
        key: String,
        value: String,
        tags: Vec<String>,
        ttl: u64,
    ) -> Result<(), CacheError> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::KeyTooLong(MAX_KEY_LENGTH));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::ValueTooLarge(MAX_VALUE_SIZE));
        }

        if self.entries.contains_key(&key) {
            self.remove_entry(&key);
        } else if self.entries.len() >= self.max_entries {
            // max_entries >= 1, so a full store always has an LRU victim
            if let Some(evicted) = self.lru.evict_oldest() {
                self.remove_entry(&evicted);
                self.stats.record_eviction();
            }
        }

        self.tags.attach(&key, &tags);
        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, tags, ttl));
        debug_assert_eq!(self.lru.len(), self.entries.len());
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Tag Generations ==
    pub fn snapshot(&self, tags: &[String]) -> TagSnapshot {
        self.tags.snapshot(tags)
    }

    pub fn is_current(&self, snapshot: &TagSnapshot) -> bool {
        self.tags.is_current(snapshot)
    }

    // == Invalidate Tag ==
    /// Removes every entry stored under `tag`. Unknown tags are a no-op
    /// apart from advancing the tag's generation.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_tag(&mut self, tag: &str) -> usize {
        let keys = self.tags.take(tag);
        let mut removed = 0;
        for key in keys {
            debug_assert!(self.entries.get(&key).map_or(true, |e| e.has_tag(tag)));
            if self.remove_entry(&key).is_some() {
                removed += 1;
            }
        }
        self.stats.record_invalidations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove_entry(&key);
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of live keys currently indexed under `tag`.
    pub fn tagged_len(&self, tag: &str) -> usize {
        self.tags.keys_for(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the entry together with its LRU and tag index references.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.tags.detach(key, &entry.tags);
        Some(entry)
    }
}
