//! Cart commands.

use grocerease_core::{Price, ProductId};
use grocerease_storefront::api::RemoteStore;
use grocerease_storefront::services::CartManager;
use grocerease_storefront::storage::LocalStore;
use grocerease_storefront::{AppError, AppState};

use super::rupees;

/// Show cart lines and totals.
pub async fn show(state: &AppState) {
    let mut session = state.session();
    session.start().await;
    print_cart(session.cart(), state);
}

/// Add a catalog product to the cart.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or has no such product.
pub async fn add(state: &AppState, product_id: i64, quantity: u32) -> grocerease_storefront::Result<()> {
    let id = ProductId::new(product_id);
    let product = state
        .catalog()
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    let mut session = state.session();
    session.start().await;
    session.cart_mut().add(&product, quantity).await;
    print_cart(session.cart(), state);
    Ok(())
}

/// Set a line's quantity; zero or less removes it.
pub async fn update(state: &AppState, product_id: i64, quantity: i64) {
    let mut session = state.session();
    session.start().await;
    session
        .cart_mut()
        .update_quantity(ProductId::new(product_id), quantity)
        .await;
    print_cart(session.cart(), state);
}

/// Remove a product's line.
pub async fn remove(state: &AppState, product_id: i64) {
    let mut session = state.session();
    session.start().await;
    session.cart_mut().remove(ProductId::new(product_id)).await;
    print_cart(session.cart(), state);
}

/// Empty the cart.
pub async fn clear(state: &AppState) {
    let mut session = state.session();
    session.start().await;
    session.cart_mut().clear().await;
    print_cart(session.cart(), state);
}

#[allow(clippy::print_stdout)]
fn print_cart<R: RemoteStore, L: LocalStore>(cart: &CartManager<R, L>, state: &AppState) {
    let config = state.config();
    if cart.items().is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in cart.items() {
        println!(
            "{:>4}  {:<32} x{:<3} {}",
            line.product_id().as_i64(),
            line.product.name,
            line.quantity,
            rupees(line.line_total(), config.inr_rate)
        );
    }

    let subtotal = cart.total();
    let total = Price::usd(subtotal).with_tax(config.tax_rate).amount;
    println!(
        "Subtotal ({} items): {}",
        cart.item_count(),
        rupees(subtotal, config.inr_rate)
    );
    println!("Tax: {}", rupees(total.saturating_sub(subtotal), config.inr_rate));
    println!("Total: {}", rupees(total, config.inr_rate));
}
