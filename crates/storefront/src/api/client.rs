//! `reqwest` implementation of [`RemoteStore`].

use std::sync::Arc;

use grocerease_core::{Order, Product, RecordId, UserId, UserRecord};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, CartRecord, RemoteStore};
use crate::config::StoreConfig;

/// Characters of a response body kept in error logs.
const LOGGED_BODY_CHARS: usize = 500;

/// HTTP client for the REST store.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a client for the store configured in `config`.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_base_url(config.api_url.clone())
    }

    /// Create a client for the store at `base_url`.
    #[must_use]
    pub fn with_base_url(mut base_url: Url) -> Self {
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            inner: Arc::new(RestClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.join(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path, query)?;
        debug!(%url, "GET");
        let response = self.inner.client.get(url).send().await?;
        decode(response, path).await
    }

    async fn send<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path, &[])?;
        debug!(%method, %url, "sending");
        let response = self
            .inner
            .client
            .request(method, url)
            .json(body)
            .send()
            .await?;
        decode(response, path).await
    }
}

/// Check the status and parse the body, logging what the store sent on failure.
async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    path: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            path,
            body = %body.chars().take(LOGGED_BODY_CHARS).collect::<String>(),
            "Store returned non-success status"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            path: path.to_string(),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            path,
            body = %body.chars().take(LOGGED_BODY_CHARS).collect::<String>(),
            "Failed to parse store response"
        );
        ApiError::Parse(e)
    })
}

impl RemoteStore for RestClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("products", &[]).await
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.get("users", &[]).await
    }

    #[instrument(skip(self))]
    async fn find_carts(&self, user_id: UserId) -> Result<Vec<CartRecord>, ApiError> {
        self.get("carts", &[("userId", user_id.to_string())]).await
    }

    #[instrument(skip(self, cart), fields(user_id = %cart.user_id))]
    async fn create_cart(&self, cart: &CartRecord) -> Result<CartRecord, ApiError> {
        self.send(Method::POST, "carts", cart).await
    }

    #[instrument(skip(self, cart), fields(user_id = %cart.user_id))]
    async fn replace_cart(
        &self,
        id: &RecordId,
        cart: &CartRecord,
    ) -> Result<CartRecord, ApiError> {
        self.send(Method::PUT, &format!("carts/{id}"), cart).await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
        self.get("orders", &[("userId", user_id.to_string())]).await
    }

    #[instrument(skip(self, order), fields(user_id = %order.user_id))]
    async fn create_order(&self, order: &Order) -> Result<Order, ApiError> {
        self.send(Method::POST, "orders", order).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = RestClient::with_base_url(Url::parse("https://store.example.in/api").unwrap());
        let url = client.endpoint("products", &[]).unwrap();
        assert_eq!(url.as_str(), "https://store.example.in/api/products");
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let client = RestClient::with_base_url(Url::parse("http://localhost:3001").unwrap());
        let url = client
            .endpoint("carts", &[("userId", UserId::new(7).to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/carts?userId=7");
    }

    #[test]
    fn test_record_path_uses_record_id() {
        let client = RestClient::with_base_url(Url::parse("http://localhost:3001").unwrap());
        let id = RecordId::Text("a1b2".to_string());
        let url = client.endpoint(&format!("carts/{id}"), &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/carts/a1b2");
    }
}
