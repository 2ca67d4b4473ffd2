//! A shopper's session: who is logged in and what is in their cart.

use grocerease_core::{Order, UserProfile};
use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::{info, instrument};

use crate::api::{ApiError, RemoteStore};
use crate::services::auth::{AuthError, AuthService};
use crate::services::cart::CartManager;
use crate::services::checkout::{CheckoutError, CheckoutRequest, CheckoutService};
use crate::services::orders::OrderHistory;
use crate::storage::LocalStore;

/// Ties the logged-in identity to the cart manager.
///
/// The cart is reloaded whenever the identity changes, so callers never
/// have to keep the two in step themselves.
#[derive(Debug)]
pub struct Session<R, L> {
    auth: AuthService<R, L>,
    cart: CartManager<R, L>,
    checkout: CheckoutService<R>,
    orders: OrderHistory<R>,
    user: Option<UserProfile>,
}

impl<R, L> Session<R, L>
where
    R: RemoteStore + Clone,
    L: LocalStore + Clone,
{
    /// A guest session. Nothing is read until [`Session::start`].
    #[must_use]
    pub fn new(remote: R, local: L, tax_rate: Decimal) -> Self {
        Self {
            auth: AuthService::new(remote.clone(), local.clone()),
            cart: CartManager::new(remote.clone(), local),
            checkout: CheckoutService::new(remote.clone(), tax_rate),
            orders: OrderHistory::new(remote),
            user: None,
        }
    }

    /// Restore the saved user, if any, and load their cart.
    #[instrument(skip(self))]
    pub async fn start(&mut self) {
        self.user = self.auth.restore().await;
        self.cart.set_user(self.user.as_ref().map(|u| u.id)).await;
    }

    /// The logged-in user.
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub const fn cart(&self) -> &CartManager<R, L> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartManager<R, L> {
        &mut self.cart
    }

    /// Log in and switch the cart to the user's record.
    ///
    /// # Errors
    ///
    /// See [`AuthService::login`]. A failed login leaves the session as it was.
    pub async fn login(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<&UserProfile, AuthError> {
        let profile = self.auth.login(username, password).await?;
        self.cart.set_user(Some(profile.id)).await;
        Ok(&*self.user.insert(profile))
    }

    /// Log out: detach the cart, empty it, then drop both local slots.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "User logged out");
        }
        self.cart.set_user(None).await;
        self.cart.clear().await;
        self.auth.logout().await;
    }

    /// Place an order for the current cart.
    ///
    /// # Errors
    ///
    /// See [`CheckoutService::place_order`].
    pub async fn checkout(&mut self, request: &CheckoutRequest) -> Result<Order, CheckoutError> {
        self.checkout
            .place_order(self.user.as_ref(), &mut self.cart, request)
            .await
    }

    /// Past orders of the logged-in user, newest first. Empty for a guest.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        match &self.user {
            Some(user) => self.orders.for_user(user.id).await,
            None => Ok(Vec::new()),
        }
    }
}
