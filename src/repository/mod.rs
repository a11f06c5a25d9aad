//! Data store accessors.
//!
//! Repository traits describe the query interface the services depend on;
//! `memory` provides the in-process implementation used by the server.

mod fixtures;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::Resource;

pub use fixtures::{seed_clients, seed_phones, seed_users};
pub use memory::{ClientDirectory, MemoryRepository};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("data store unavailable: {0}")]
    Unavailable(String),
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Unavailable(msg) => ApiError::StoreUnavailable(msg),
        }
    }
}

/// Query interface over one resource collection, ordered by id.
#[async_trait]
pub trait Repository<T: Resource>: Send + Sync {
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Up to `count` records after skipping `offset`; empty past the end.
    async fn find_page(&self, offset: u64, count: u32) -> Result<Vec<T>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.find_all().await?.len() as u64)
    }

    async fn find(&self, id: u64) -> Result<Option<T>, RepoError>;

    /// Persists `record` under a fresh id and returns the stored copy.
    async fn insert(&self, record: T) -> Result<T, RepoError>;

    /// Returns whether a record was removed.
    async fn remove(&self, id: u64) -> Result<bool, RepoError>;
}
