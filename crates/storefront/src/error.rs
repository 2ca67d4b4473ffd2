//! Unified error handling.
//!
//! Provides a unified `AppError` for callers that drive several services
//! (the CLI, a future UI). `user_message()` is what gets shown to people;
//! the `Display` output carries the detail and goes to the logs.

use thiserror::Error;

use crate::api::ApiError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// REST store call failed.
    #[error("Store error: {0}")]
    Api(#[from] ApiError),

    /// Catalog read failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order placement failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The action needs a logged-in user.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Message safe to show the user.
    ///
    /// Internal details (URLs, status codes, I/O errors) are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.to_string(),
            Self::Api(_) => "Could not reach the store. Please try again.".to_string(),
            Self::Catalog(_) => "Failed to load products".to_string(),
            Self::Auth(err) => err.to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::InvalidEmail(_) => "Invalid email address".to_string(),
                other => other.to_string(),
            },
            Self::NotFound(what) => format!("{what} not found"),
            Self::Unauthorized(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
