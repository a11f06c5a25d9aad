//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::models::ResourceKind;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL used when generating absolute links
    pub public_base_url: String,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Whether list endpoints go through the cache at all
    pub list_cache_enabled: bool,
    /// Whether list representations carry pagination links
    pub list_include_links: bool,
    /// TTL in seconds for cached phone list pages
    pub phone_list_ttl: u64,
    /// TTL in seconds for cached user list pages
    pub user_list_ttl: u64,
    /// Page used when the query string has none
    pub default_page: u32,
    /// Page size used when the query string has none
    pub default_limit: u32,
    /// Largest accepted page size
    pub max_limit: u32,
    /// Load the demo data set on startup
    pub seed_fixtures: bool,
}

/// Per-resource list endpoint behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewConfig {
    pub with_cache: bool,
    /// TTL in seconds
    pub ttl: u64,
    pub include_links: bool,
}

/// Pagination defaults and limits applied to list query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub page: u32,
    pub limit: u32,
    pub max_limit: u32,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 5,
            max_limit: 100,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PUBLIC_BASE_URL` - Base for absolute links (default: http://localhost:3000)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `LIST_CACHE_ENABLED` - Cache list endpoints (default: true)
    /// - `LIST_INCLUDE_LINKS` - Emit pagination links (default: true)
    /// - `PHONE_LIST_TTL` - Phone list TTL in seconds (default: 20)
    /// - `USER_LIST_TTL` - User list TTL in seconds (default: 10)
    /// - `DEFAULT_PAGE` / `DEFAULT_LIMIT` / `MAX_LIMIT` - Pagination (1 / 5 / 100)
    /// - `SEED_FIXTURES` - Load demo data (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            public_base_url: env::var("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            list_cache_enabled: env_or("LIST_CACHE_ENABLED", defaults.list_cache_enabled),
            list_include_links: env_or("LIST_INCLUDE_LINKS", defaults.list_include_links),
            phone_list_ttl: env_or("PHONE_LIST_TTL", defaults.phone_list_ttl),
            user_list_ttl: env_or("USER_LIST_TTL", defaults.user_list_ttl),
            default_page: env_or("DEFAULT_PAGE", defaults.default_page),
            default_limit: env_or("DEFAULT_LIMIT", defaults.default_limit),
            max_limit: env_or("MAX_LIMIT", defaults.max_limit),
            seed_fixtures: env_or("SEED_FIXTURES", defaults.seed_fixtures),
        }
    }

    /// List endpoint settings for one resource type.
    pub fn list_view(&self, kind: ResourceKind) -> ListViewConfig {
        let ttl = match kind {
            ResourceKind::Phone => self.phone_list_ttl,
            ResourceKind::User => self.user_list_ttl,
        };
        ListViewConfig {
            with_cache: self.list_cache_enabled,
            ttl,
            include_links: self.list_include_links,
        }
    }

    pub fn page_defaults(&self) -> PageDefaults {
        PageDefaults {
            page: self.default_page.max(1),
            limit: self.default_limit.max(1),
            max_limit: self.max_limit.max(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            public_base_url: "http://localhost:3000".to_string(),
            max_entries: 1000,
            cleanup_interval: 1,
            list_cache_enabled: true,
            list_include_links: true,
            phone_list_ttl: 20,
            user_list_ttl: 10,
            default_page: 1,
            default_limit: 5,
            max_limit: 100,
            seed_fixtures: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 1);
        assert_eq!(config.phone_list_ttl, 20);
        assert_eq!(config.user_list_ttl, 10);
        assert!(config.list_cache_enabled);
    }

    #[test]
    fn test_list_view_uses_resource_ttl() {
        let config = Config::default();
        assert_eq!(config.list_view(ResourceKind::Phone).ttl, 20);
        assert_eq!(config.list_view(ResourceKind::User).ttl, 10);
        assert!(config.list_view(ResourceKind::User).include_links);
    }

    #[test]
    fn test_page_defaults_never_zero() {
        let config = Config {
            default_page: 0,
            default_limit: 0,
            max_limit: 0,
            ..Config::default()
        };
        let defaults = config.page_defaults();
        assert_eq!(defaults.page, 1);
        assert_eq!(defaults.limit, 1);
        assert_eq!(defaults.max_limit, 1);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("CATALOG_TEST_GARBAGE_PORT", "not-a-port");
        assert_eq!(env_or::<u16>("CATALOG_TEST_GARBAGE_PORT", 8080), 8080);
        env::remove_var("CATALOG_TEST_GARBAGE_PORT");
        assert_eq!(env_or::<u16>("CATALOG_TEST_GARBAGE_PORT", 9090), 9090);
    }
}
