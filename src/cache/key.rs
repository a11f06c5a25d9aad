//! Cache key derivation for list views.

use std::fmt;

use crate::models::ResourceKind;
use crate::pagination::PageRequest;

/// Deterministic key for one cached list page.
///
/// Every selection parameter is written with its own label, so distinct
/// parameter sets can never render to the same string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn list(kind: ResourceKind, request: &PageRequest) -> Self {
        Self(format!(
            "list:{}:page={}:limit={}",
            kind.list_route(),
            request.page(),
            request.limit()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
