//! List-View Cache Service
//!
//! Cache-aside reads for the collection endpoints, plus the uncached
//! detail lookup of the same collection.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheKey, TagAwareCache};
use crate::config::ListViewConfig;
use crate::error::{ApiError, Result};
use crate::models::Resource;
use crate::pagination::{PageRequest, PageResult, PageWindow};
use crate::repository::Repository;
use crate::representation;
use crate::urls::UrlGenerator;

pub struct ListViewService<T: Resource> {
    repository: Arc<dyn Repository<T>>,
    cache: Arc<dyn TagAwareCache>,
    urls: Arc<dyn UrlGenerator>,
    config: ListViewConfig,
}

impl<T: Resource> ListViewService<T> {
    pub fn new(
        repository: Arc<dyn Repository<T>>,
        cache: Arc<dyn TagAwareCache>,
        urls: Arc<dyn UrlGenerator>,
        config: ListViewConfig,
    ) -> Self {
        Self {
            repository,
            cache,
            urls,
            config,
        }
    }

    /// Serialized list page for `request`, from the cache when possible.
    ///
    /// The body is returned unchanged whether it was cached or freshly built.
    pub async fn list(&self, request: PageRequest) -> Result<String> {
        if !self.config.with_cache {
            return self.render(request).await;
        }

        let key = CacheKey::list(T::KIND, &request);
        let tags = vec![T::KIND.list_tag().to_string()];
        self.cache
            .get_or_compute(&key, &tags, self.config.ttl, Box::pin(self.render(request)))
            .await
    }

    /// Serialized single record. Detail views are never cached.
    pub async fn detail(&self, id: u64) -> Result<String> {
        let record = self
            .repository
            .find(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", T::KIND)))?;
        representation::detail(&record)
    }

    async fn render(&self, request: PageRequest) -> Result<String> {
        debug!(resource = %T::KIND, page = request.page(), limit = request.limit(), "building list page");

        // Slice and count are separate reads; a write landing between them
        // can make totalItems disagree with the slice until the next fill.
        let items = self
            .repository
            .find_page(request.offset(), request.limit())
            .await?;
        let total_items = self.repository.count().await?;

        let window = PageWindow::compute(total_items, request);
        let links = if self.config.include_links {
            Some(window.link_set(T::KIND.list_route(), self.urls.as_ref())?)
        } else {
            None
        };

        representation::list(&PageResult { items, window }, links.as_ref())
    }
}
