//! Authentication error types.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user matches the username and password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The user list could not be fetched.
    #[error("Login failed. Please try again.")]
    Unavailable(#[from] ApiError),
}
