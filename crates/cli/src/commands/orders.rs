//! Order history command.

use grocerease_storefront::{AppError, AppState};

use super::rupees;

/// List the logged-in user's orders, newest first.
///
/// # Errors
///
/// Returns an error if nobody is logged in or the store is unreachable.
#[allow(clippy::print_stdout)]
pub async fn list(state: &AppState) -> grocerease_storefront::Result<()> {
    let mut session = state.session();
    session.start().await;
    if session.user().is_none() {
        return Err(AppError::Unauthorized("Please log in to see your orders".to_string()));
    }

    let orders = session.orders().await?;
    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    for order in &orders {
        let id = order
            .id
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        println!(
            "#{id}  {}  {} items  {}  {}  {}",
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.item_count(),
            rupees(order.total, state.config().inr_rate),
            order.payment_method,
            order.status
        );
    }
    Ok(())
}
