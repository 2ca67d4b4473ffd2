//! Mock REST store access.
//!
//! # Architecture
//!
//! - [`RemoteStore`] is the seam between the services and the store, so the
//!   cart manager, auth and checkout can run against an in-memory fake
//! - [`RestClient`] implements it over HTTP with `reqwest`
//! - The store is json-server shaped: plain collections, `?field=value`
//!   filters, `POST` to create and `PUT /:id` to replace
//!
//! # Resources
//!
//! - `GET /products`
//! - `GET /users`
//! - `GET /carts?userId=<id>`, `POST /carts`, `PUT /carts/:id`
//! - `GET /orders?userId=<id>`, `POST /orders`

mod client;
mod records;

pub use client::RestClient;
pub use records::CartRecord;

use grocerease_core::{Order, Product, RecordId, UserId, UserRecord};
use thiserror::Error;

/// Errors that can occur when talking to the REST store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store returned {status} for {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path.
        path: String,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Operations the storefront needs from the REST store.
pub trait RemoteStore {
    /// `GET /products`
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;

    /// `GET /carts?userId=<id>`; zero or one record in practice.
    async fn find_carts(&self, user_id: UserId) -> Result<Vec<CartRecord>, ApiError>;

    /// `POST /carts`
    async fn create_cart(&self, cart: &CartRecord) -> Result<CartRecord, ApiError>;

    /// `PUT /carts/:id`
    async fn replace_cart(&self, id: &RecordId, cart: &CartRecord)
    -> Result<CartRecord, ApiError>;

    /// `GET /orders?userId=<id>`
    async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, ApiError>;

    /// `POST /orders`
    async fn create_order(&self, order: &Order) -> Result<Order, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 503,
            path: "/carts".to_string(),
        };
        assert_eq!(err.to_string(), "Store returned 503 for /carts");
    }
}
