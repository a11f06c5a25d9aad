//! LRU Index Module
//!
//! Orders cache keys by last access using a monotonically increasing tick.

use std::collections::{BTreeMap, HashMap};

// == LRU Index ==
/// Tracks access recency for capacity eviction.
///
/// `order` maps access tick to key; the smallest tick is the least recently
/// used key. `ticks` is the reverse lookup so touches stay O(log n).
#[derive(Debug, Default)]
pub struct LruIndex {
    clock: u64,
    order: BTreeMap<u64, String>,
    ticks: HashMap<String, u64>,
}

impl LruIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if unknown.
    pub fn touch(&mut self, key: &str) {
        self.clock += 1;
        if let Some(old) = self.ticks.insert(key.to_string(), self.clock) {
            self.order.remove(&old);
        }
        self.order.insert(self.clock, key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}
