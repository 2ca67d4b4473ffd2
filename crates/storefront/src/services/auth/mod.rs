//! Authentication service.
//!
//! Logs users in against the store's `/users` collection and keeps the
//! resulting profile in the local [`keys::USER`] slot so a restart restores
//! the session.

mod error;

pub use error::AuthError;

use grocerease_core::{UserProfile, UserRecord};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use crate::api::RemoteStore;
use crate::storage::{self, LocalStore, keys};

/// Authentication service.
#[derive(Debug, Clone)]
pub struct AuthService<R, L> {
    remote: R,
    local: L,
}

impl<R: RemoteStore, L: LocalStore> AuthService<R, L> {
    #[must_use]
    pub const fn new(remote: R, local: L) -> Self {
        Self { remote, local }
    }

    /// Profile saved by the last login, if any.
    ///
    /// An unreadable slot is treated as logged out.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Option<UserProfile> {
        match storage::load_json(&self.local, keys::USER).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable saved user");
                None
            }
        }
    }

    /// Login with username and password.
    ///
    /// On success the profile is saved locally and returned.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no user matches.
    /// Returns `AuthError::Unavailable` if the user list cannot be fetched.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<UserProfile, AuthError> {
        let users = self.remote.list_users().await.map_err(|e| {
            tracing::error!(error = %e, "Login error");
            AuthError::Unavailable(e)
        })?;

        let profile = find_user(&users, username, password)
            .map(UserRecord::profile)
            .ok_or(AuthError::InvalidCredentials)?;

        if let Err(e) = storage::save_json(&self.local, keys::USER, &profile).await {
            warn!(error = %e, "Could not save user locally");
        }

        info!(user_id = %profile.id, "User logged in");
        Ok(profile)
    }

    /// Forget the logged-in user and the cached cart.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        for key in [keys::USER, keys::CART] {
            if let Err(e) = self.local.remove(key).await {
                warn!(error = %e, key, "Could not clear local slot");
            }
        }
    }
}

fn find_user<'a>(
    users: &'a [UserRecord],
    username: &str,
    password: &SecretString,
) -> Option<&'a UserRecord> {
    users
        .iter()
        .find(|u| u.matches(username, password.expose_secret()))
}
