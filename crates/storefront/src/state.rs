//! Application state shared across commands.

use std::sync::Arc;

use crate::api::RestClient;
use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::session::Session;
use crate::storage::FileStore;

/// Application state shared across the front end.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the HTTP client, the local cache and the catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StoreConfig,
    client: RestClient,
    local: FileStore,
    catalog: Catalog<RestClient>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let client = RestClient::new(&config);
        let local = FileStore::new(&config.data_dir);
        let catalog = Catalog::new(client.clone(), config.catalog_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                client,
                local,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get a reference to the REST store client.
    #[must_use]
    pub fn client(&self) -> &RestClient {
        &self.inner.client
    }

    /// Get a reference to the local cache.
    #[must_use]
    pub fn local(&self) -> &FileStore {
        &self.inner.local
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<RestClient> {
        &self.inner.catalog
    }

    /// A session over this state's store and cache.
    ///
    /// Call [`Session::start`] before use.
    #[must_use]
    pub fn session(&self) -> Session<RestClient, FileStore> {
        Session::new(
            self.client().clone(),
            self.local().clone(),
            self.config().tax_rate,
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("client", &self.inner.client)
            .field("local", &self.inner.local)
            .finish_non_exhaustive()
    }
}
