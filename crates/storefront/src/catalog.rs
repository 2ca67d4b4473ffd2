//! Product catalog with an in-memory cache.
//!
//! The product list is fetched once and kept in a `moka` cache until the
//! configured TTL runs out. Search, category and offer views are computed
//! from the cached list.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use grocerease_core::{Product, ProductId};
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::{ApiError, RemoteStore};

/// Products shown on the home page best-seller shelf.
pub const HOME_BEST_SELLERS: usize = 8;

/// Errors from catalog reads.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product list could not be fetched.
    #[error("Failed to load products: {0}")]
    Unavailable(#[from] ApiError),
}

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
}

/// Read access to the product catalog.
#[derive(Clone)]
pub struct Catalog<R> {
    remote: R,
    cache: Cache<CacheKey, Arc<Vec<Product>>>,
}

impl<R: RemoteStore> Catalog<R> {
    /// Create a catalog reading from `remote`, caching for `ttl`.
    #[must_use]
    pub fn new(remote: R, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(16).time_to_live(ttl).build();
        Self { remote, cache }
    }

    /// Every product, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] if the list is not cached and
    /// the store cannot be reached.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(products) = self.cache.get(&CacheKey::Products).await {
            debug!(count = products.len(), "catalog cache hit");
            return Ok(products);
        }

        let products = Arc::new(self.remote.list_products().await.map_err(|e| {
            tracing::error!(error = %e, "Error fetching products");
            e
        })?);
        debug!(count = products.len(), "catalog fetched");
        self.cache
            .insert(CacheKey::Products, Arc::clone(&products))
            .await;
        Ok(products)
    }

    /// Drop the cached list so the next read goes to the store.
    pub async fn invalidate(&self) {
        self.cache.invalidate(&CacheKey::Products).await;
    }

    /// Look up a single product.
    ///
    /// # Errors
    ///
    /// See [`Catalog::products`].
    pub async fn find(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products().await?.iter().find(|p| p.id == id).cloned())
    }

    /// Products whose name or description contains `term`, ignoring case.
    /// A blank term matches everything.
    ///
    /// # Errors
    ///
    /// See [`Catalog::products`].
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        let term = term.trim();
        Ok(self
            .products()
            .await?
            .iter()
            .filter(|p| term.is_empty() || p.matches(term))
            .cloned()
            .collect())
    }

    /// Distinct category names, sorted.
    ///
    /// # Errors
    ///
    /// See [`Catalog::products`].
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let names: BTreeSet<String> = self
            .products()
            .await?
            .iter()
            .map(|p| p.category.clone())
            .collect();
        Ok(names.into_iter().collect())
    }

    /// Products in `category`, or every product for `None`.
    ///
    /// # Errors
    ///
    /// See [`Catalog::products`].
    pub async fn by_category(&self, category: Option<&str>) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products()
            .await?
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect())
    }

    /// Products carrying a discount.
    ///
    /// # Errors
    ///
    /// See [`Catalog::products`].
    pub async fn offers(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products()
            .await?
            .iter()
            .filter(|p| p.has_offer())
            .cloned()
            .collect())
    }

    /// The first `limit` best sellers, in store order.
    ///
    /// # Errors
    ///
    /// See [`Catalog::products`].
    pub async fn best_sellers(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products()
            .await?
            .iter()
            .filter(|p| p.is_best_seller())
            .take(limit)
            .cloned()
            .collect())
    }
}
