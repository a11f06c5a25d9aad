//! In-process repository implementations.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepoError, Repository};
use crate::models::{Client, Resource};

// == Memory Repository ==
/// Records kept in id order behind an async lock.
#[derive(Debug)]
pub struct MemoryRepository<T> {
    records: RwLock<BTreeMap<u64, T>>,
    next_id: AtomicU64,
}

impl<T: Resource> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Builds a repository holding `records`, numbered from 1 in order.
    pub fn with_records(records: Vec<T>) -> Self {
        let map: BTreeMap<u64, T> = records
            .into_iter()
            .zip(1u64..)
            .map(|(record, id)| (id, record.with_id(id)))
            .collect();
        let next_id = map.len() as u64 + 1;
        Self {
            records: RwLock::new(map),
            next_id: AtomicU64::new(next_id),
        }
    }
}

impl<T: Resource> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Resource> Repository<T> for MemoryRepository<T> {
    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_page(&self, offset: u64, count: u32) -> Result<Vec<T>, RepoError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(self
            .records
            .read()
            .await
            .values()
            .skip(skip)
            .take(count as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn find(&self, id: u64) -> Result<Option<T>, RepoError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn insert(&self, record: T) -> Result<T, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = record.with_id(id);
        self.records.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn remove(&self, id: u64) -> Result<bool, RepoError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}

// == Client Directory ==
/// Read-only lookup of the customer accounts users are attached to.
#[derive(Debug, Default)]
pub struct ClientDirectory {
    clients: HashMap<u64, Client>,
}

impl ClientDirectory {
    pub fn new(clients: Vec<Client>) -> Self {
        Self {
            clients: clients.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn find(&self, id: u64) -> Option<Client> {
        self.clients.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
