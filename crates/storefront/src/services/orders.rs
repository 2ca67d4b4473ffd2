//! Order history.

use grocerease_core::{Order, UserId};
use tracing::instrument;

use crate::api::{ApiError, RemoteStore};

/// Read access to a user's past orders.
#[derive(Debug, Clone)]
pub struct OrderHistory<R> {
    remote: R,
}

impl<R: RemoteStore> OrderHistory<R> {
    #[must_use]
    pub const fn new(remote: R) -> Self {
        Self { remote }
    }

    /// Orders placed by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
        let mut orders = self.remote.list_orders(user_id).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}
