//! Application state shared across all handlers.

use std::sync::Arc;

use tracing::info;

use crate::cache::SharedCache;
use crate::config::{Config, PageDefaults};
use crate::models::{Phone, Resource, User};
use crate::repository::{
    seed_clients, seed_phones, seed_users, ClientDirectory, MemoryRepository, Repository,
};
use crate::service::{ListViewService, MutationInvalidator};
use crate::urls::{RouteUrls, UrlGenerator};

/// Per-collection handles: the repository and its cached list view.
pub struct Collection<T: Resource> {
    pub repository: Arc<dyn Repository<T>>,
    pub view: ListViewService<T>,
}

/// Every dependency a handler needs, injected once at startup.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache,
    pub phones: Arc<Collection<Phone>>,
    pub users: Arc<Collection<User>>,
    pub clients: Arc<ClientDirectory>,
    pub invalidator: MutationInvalidator,
    pub urls: Arc<dyn UrlGenerator>,
    pub page_defaults: PageDefaults,
}

impl AppState {
    /// Wires the state from explicit parts.
    pub fn new(
        config: &Config,
        cache: SharedCache,
        phones: Arc<dyn Repository<Phone>>,
        users: Arc<dyn Repository<User>>,
        clients: ClientDirectory,
    ) -> Result<Self, url::ParseError> {
        let urls: Arc<dyn UrlGenerator> = Arc::new(RouteUrls::new(&config.public_base_url)?);
        let shared = Arc::new(cache.clone());

        let phones = Collection {
            view: ListViewService::new(
                phones.clone(),
                shared.clone(),
                urls.clone(),
                config.list_view(Phone::KIND),
            ),
            repository: phones,
        };
        let users = Collection {
            view: ListViewService::new(
                users.clone(),
                shared.clone(),
                urls.clone(),
                config.list_view(User::KIND),
            ),
            repository: users,
        };

        Ok(Self {
            cache,
            phones: Arc::new(phones),
            users: Arc::new(users),
            clients: Arc::new(clients),
            invalidator: MutationInvalidator::new(shared),
            urls,
            page_defaults: config.page_defaults(),
        })
    }

    /// Builds in-memory repositories (seeded when configured) and the cache.
    pub fn from_config(config: &Config) -> Result<Self, url::ParseError> {
        let cache = SharedCache::with_capacity(config.max_entries);

        let (clients, users, phones) = if config.seed_fixtures {
            let clients = seed_clients();
            let users = seed_users(&clients);
            (clients, users, seed_phones())
        } else {
            (Vec::new(), Vec::new(), Vec::new())
        };
        let clients = ClientDirectory::new(clients);
        info!(
            clients = clients.len(),
            users = users.len(),
            phones = phones.len(),
            "repositories initialized"
        );

        Self::new(
            config,
            cache,
            Arc::new(MemoryRepository::with_records(phones)),
            Arc::new(MemoryRepository::with_records(users)),
            clients,
        )
    }
}
