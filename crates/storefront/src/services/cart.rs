//! Cart manager: keeps the cart in memory, in the local cache and in the
//! user's remote cart record.
//!
//! Mutations update the in-memory [`Cart`] first and then persist. Persisting
//! writes the remote record when a user is attached (best effort: failures
//! are logged and never retried) and always writes the local cache slot.
//! Loading prefers the remote record, falling back to the local cache when
//! the store cannot be reached.

use grocerease_core::{Cart, CartLine, Product, ProductId, UserId};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, error, instrument, warn};

use crate::api::{ApiError, CartRecord, RemoteStore};
use crate::storage::{self, LocalStore, keys};

/// Cart state for the current user or guest.
pub struct CartManager<R, L> {
    remote: R,
    local: L,
    cart: Cart,
    user: Option<UserId>,
    loaded: bool,
    loading: watch::Sender<bool>,
}

impl<R, L> std::fmt::Debug for CartManager<R, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("cart", &self.cart)
            .field("user", &self.user)
            .field("loading", &*self.loading.borrow())
            .finish_non_exhaustive()
    }
}

impl<R: RemoteStore, L: LocalStore> CartManager<R, L> {
    /// An empty guest cart. Nothing is read until [`CartManager::set_user`]
    /// or [`CartManager::load`] runs.
    pub fn new(remote: R, local: L) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            remote,
            local,
            cart: Cart::new(),
            user: None,
            loaded: false,
            loading,
        }
    }

    /// Current lines, in insertion order.
    pub fn items(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Identity the cart is attached to; `None` for a guest.
    pub const fn user(&self) -> Option<UserId> {
        self.user
    }

    /// Whether a load or a persist is in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Watch the loading flag, e.g. to drive a spinner.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Σ unit price × quantity. No tax, no currency conversion.
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Σ quantity over all lines.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Attach the cart to `user` (or detach it for a guest).
    ///
    /// Reloads when the identity changes, and on the first call.
    pub async fn set_user(&mut self, user: Option<UserId>) {
        if self.loaded && self.user == user {
            return;
        }
        self.user = user;
        self.load().await;
    }

    /// Populate the cart from the best available source.
    ///
    /// With a user: the remote record, or the local cache if the store is
    /// unreachable. As a guest: the local cache. When the chosen source has
    /// nothing stored, the current lines are kept.
    #[instrument(skip(self), fields(user_id = ?self.user))]
    pub async fn load(&mut self) {
        self.loading.send_replace(true);

        match self.user {
            Some(user_id) => match self.remote.find_carts(user_id).await {
                Ok(records) => {
                    if let Some(record) = records.into_iter().next() {
                        debug!(lines = record.items.len(), "adopting remote cart");
                        self.cart = Cart::from_lines(record.items);
                    } else {
                        debug!("no remote cart, keeping current lines");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Error loading cart, falling back to local cache");
                    self.adopt_local().await;
                }
            },
            None => self.adopt_local().await,
        }

        self.loaded = true;
        self.loading.send_replace(false);
    }

    /// Add `quantity` units of `product` and persist.
    ///
    /// Returns the updated lines.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(&mut self, product: &Product, quantity: u32) -> &[CartLine] {
        self.loading.send_replace(true);
        self.cart.add(product, quantity);
        self.persist().await;
        self.loading.send_replace(false);
        self.cart.lines()
    }

    /// Set a line's quantity and persist. Zero or less removes the line;
    /// an unknown product is ignored.
    #[instrument(skip(self))]
    pub async fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> &[CartLine] {
        if quantity <= 0 {
            return self.remove(product_id).await;
        }

        if quantity > i64::from(u32::MAX) {
            warn!(quantity, max = u32::MAX, "Quantity clamped to maximum");
        }

        self.loading.send_replace(true);
        if !self.cart.update_quantity(product_id, quantity) {
            debug!("product not in cart");
        }
        self.persist().await;
        self.loading.send_replace(false);
        self.cart.lines()
    }

    /// Remove a product's line and persist. An unknown product is ignored.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, product_id: ProductId) -> &[CartLine] {
        self.loading.send_replace(true);
        if !self.cart.remove(product_id) {
            debug!("product not in cart");
        }
        self.persist().await;
        self.loading.send_replace(false);
        self.cart.lines()
    }

    /// Empty the cart and persist the empty state.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) {
        self.loading.send_replace(true);
        self.cart.clear();
        self.persist().await;
        self.loading.send_replace(false);
    }

    async fn adopt_local(&mut self) {
        match storage::load_json::<Cart, _>(&self.local, keys::CART).await {
            Ok(Some(cart)) => {
                debug!(lines = cart.len(), "adopting local cart");
                self.cart = cart;
            }
            Ok(None) => debug!("no local cart, keeping current lines"),
            Err(e) => warn!(error = %e, "Ignoring unreadable local cart"),
        }
    }

    async fn persist(&self) {
        if let Some(user_id) = self.user
            && let Err(e) = self.persist_remote(user_id).await
        {
            error!(error = %e, %user_id, "Error saving cart to server");
        }

        if let Err(e) = storage::save_json(&self.local, keys::CART, self.cart.lines()).await {
            error!(error = %e, "Error saving cart to local cache");
        }
    }

    async fn persist_remote(&self, user_id: UserId) -> Result<(), ApiError> {
        let record = CartRecord::new(user_id, self.cart.lines().to_vec());
        let existing = self.remote.find_carts(user_id).await?;

        match existing.into_iter().find_map(|r| r.id) {
            Some(id) => {
                self.remote.replace_cart(&id, &record).await?;
            }
            None => {
                self.remote.create_cart(&record).await?;
            }
        }
        Ok(())
    }
}
