//! Cache Module
//!
//! Tag-aware in-memory caching with TTL expiration, LRU capacity eviction,
//! per-key single-flight fills and tag generation tracking.

mod entry;
mod key;
mod lru;
mod shared;
mod stats;
mod store;
mod tags;


use thiserror::Error;

use crate::error::ApiError;

// Re-export public types
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use lru::LruIndex;
pub use shared::{ComputeFuture, SharedCache, TagAwareCache};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use tags::{TagIndex, TagSnapshot};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Cache Error ==
/// Reasons the cache refused an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("key exceeds maximum length of {0} bytes")]
    KeyTooLong(usize),

    #[error("value exceeds maximum size of {0} bytes")]
    ValueTooLarge(usize),

    #[error("cache backend unreachable: {0}")]
    Unreachable(String),
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        ApiError::CacheUnavailable(err.to_string())
    }
}
