//! Mutation Invalidator
//!
//! Evicts every cached list page of a resource type when that collection
//! is written to.

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};

use crate::cache::TagAwareCache;
use crate::error::Result;
use crate::models::ResourceKind;

#[derive(Clone)]
pub struct MutationInvalidator {
    cache: Arc<dyn TagAwareCache>,
}

impl MutationInvalidator {
    pub fn new(cache: Arc<dyn TagAwareCache>) -> Self {
        Self { cache }
    }

    /// Drops all cached list pages of `kind`, whatever page/limit produced them.
    pub async fn on_resource_mutated(&self, kind: ResourceKind) -> Result<usize> {
        let tag = kind.list_tag();
        let removed = self.cache.invalidate_tag(tag).await?;
        info!(resource = %kind, tag, removed, "list cache invalidated");
        Ok(removed)
    }

    /// Runs `mutation` between two invalidations of `kind`.
    ///
    /// If the cache cannot be invalidated beforehand, the mutation is not
    /// attempted and the error is returned. The second invalidation catches
    /// pages filled while the write was in progress; if it fails the write
    /// already happened, so the failure is logged and the TTL bounds the
    /// staleness.
    pub async fn around<F, R>(&self, kind: ResourceKind, mutation: F) -> Result<R>
    where
        F: Future<Output = Result<R>> + Send,
        R: Send,
    {
        self.on_resource_mutated(kind).await.map_err(|err| {
            error!(resource = %kind, error = %err, "invalidation failed, mutation aborted");
            err
        })?;

        let output = mutation.await?;

        if let Err(err) = self.on_resource_mutated(kind).await {
            error!(
                resource = %kind,
                error = %err,
                "post-write invalidation failed, list pages may be stale until TTL"
            );
        }
        Ok(output)
    }
}
