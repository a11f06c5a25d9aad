//! Catalog API - phones and users REST service
//!
//! Paginated list endpoints are served cache-aside: each rendered page is
//! stored under a key derived from the resource and page parameters and
//! tagged with its resource's list tag. Any write to a collection drops
//! every cached page carrying that tag.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod representation;
pub mod service;
pub mod tasks;
pub mod urls;

#[cfg(test)]
mod test_support;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
