//! Pagination Engine
//!
//! Turns `(page, limit, total_items)` into a page window and decides which
//! navigation links a page carries. Pure computation: no store or cache access.

use serde::Serialize;

use crate::config::PageDefaults;
use crate::error::{ApiError, Result};
use crate::models::ListQuery;
use crate::urls::UrlGenerator;

// == Page Request ==
/// Validated pagination parameters; both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self> {
        if page == 0 {
            return Err(ApiError::InvalidParameter(
                "page must be a positive integer".to_string(),
            ));
        }
        if limit == 0 {
            return Err(ApiError::InvalidParameter(
                "limit must be a positive integer".to_string(),
            ));
        }
        Ok(Self { page, limit })
    }

    /// Reads `page`/`limit` from a list query string, applying defaults for
    /// absent values and rejecting zero, negative, non-numeric or oversized ones.
    pub fn from_query(query: &ListQuery, defaults: &PageDefaults) -> Result<Self> {
        let page = parse_param("page", query.page.as_deref(), defaults.page, u32::MAX)?;
        let limit = parse_param("limit", query.limit.as_deref(), defaults.limit, defaults.max_limit)?;
        Self::new(page, limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn parse_param(name: &str, raw: Option<&str>, default: u32, max: u32) -> Result<u32> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: i64 = raw.trim().parse().map_err(|_| {
        ApiError::InvalidParameter(format!("{name} must be a positive integer"))
    })?;
    if value < 1 {
        return Err(ApiError::InvalidParameter(format!(
            "{name} must be a positive integer"
        )));
    }
    if value > i64::from(max) {
        return Err(ApiError::InvalidParameter(format!(
            "{name} must not exceed {max}"
        )));
    }
    Ok(value as u32)
}

/// `ceil(total_items / limit)`; zero exactly when there are no items.
pub fn total_pages(total_items: u64, limit: u32) -> u64 {
    total_items.div_ceil(u64::from(limit.max(1)))
}

// == Page Window ==
/// Position of one page within a collection of known size.
///
/// `page` is not clamped: a page past the end is valid and simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PageWindow {
    pub fn compute(total_items: u64, request: PageRequest) -> Self {
        Self {
            page: request.page(),
            limit: request.limit(),
            total_items,
            total_pages: total_pages(total_items, request.limit()),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Target of the `last` link; an empty collection still points at page 1.
    pub fn last_page(&self) -> u64 {
        self.total_pages.max(1)
    }

    /// Resolves the link set for this window through `urls`.
    pub fn link_set(&self, route: &str, urls: &dyn UrlGenerator) -> Result<LinkSet> {
        let at = |page: u64| {
            urls.url_for(
                route,
                &[("page", page.to_string()), ("limit", self.limit.to_string())],
            )
        };
        let page = u64::from(self.page);

        Ok(LinkSet {
            self_: at(page)?,
            first: at(1)?,
            last: at(self.last_page())?,
            prev: self.has_prev().then(|| at(page - 1)).transpose()?,
            next: self.has_next().then(|| at(page + 1)).transpose()?,
        })
    }
}

/// `compute_page` entry point for callers holding raw signed values.
pub fn compute_page(total_items: u64, page: i64, limit: i64) -> Result<PageWindow> {
    let limit = u32::try_from(limit)
        .ok()
        .filter(|l| *l > 0)
        .ok_or_else(|| ApiError::InvalidParameter("limit must be a positive integer".into()))?;
    let page = u32::try_from(page)
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| ApiError::InvalidParameter("page must be a positive integer".into()))?;
    Ok(PageWindow::compute(total_items, PageRequest::new(page, limit)?))
}

// == Page Result ==
/// One page of records together with its window.
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub window: PageWindow,
}

// == Link Set ==
/// Navigation links of a list page. `prev`/`next` only exist when there is
/// a page on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSet {
    #[serde(rename = "self")]
    pub self_: String,
    pub first: String,
    pub last: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}
