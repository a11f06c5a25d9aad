//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with tags and TTL.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A serialized representation plus the tags it was stored under.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored serialized body
    pub value: String,
    /// Labels used for bulk invalidation
    pub tags: Vec<String>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    pub fn new(value: String, tags: Vec<String>, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            tags,
            created_at: now,
            expires_at: now.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    /// Whether this entry was stored under `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
