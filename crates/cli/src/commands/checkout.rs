//! Checkout command.

use grocerease_core::PaymentMethod;
use grocerease_storefront::AppState;
use grocerease_storefront::services::{CardDetails, CheckoutRequest, Payment, ShippingDetails};
use secrecy::SecretString;

use super::rupees;
use crate::CheckoutArgs;

/// Place an order for the current cart.
///
/// # Errors
///
/// Returns an error if nobody is logged in, the cart is empty, the form is
/// incomplete, or the store rejects the order.
#[allow(clippy::print_stdout)]
pub async fn place_order(state: &AppState, args: CheckoutArgs) -> grocerease_storefront::Result<()> {
    let mut session = state.session();
    session.start().await;

    let request = build_request(session.user().map(ShippingDetails::prefilled), args);
    let order = session.checkout(&request).await?;

    println!("Order placed successfully!");
    if let Some(id) = &order.id {
        println!("Order #{id}");
    }
    println!(
        "{} items, total {} ({})",
        order.item_count(),
        rupees(order.total, state.config().inr_rate),
        order.payment_method
    );
    Ok(())
}

fn build_request(prefilled: Option<ShippingDetails>, args: CheckoutArgs) -> CheckoutRequest {
    let base = prefilled.unwrap_or_default();
    let shipping = ShippingDetails {
        full_name: args.full_name.unwrap_or(base.full_name),
        email: args.email.unwrap_or(base.email),
        phone: args.phone,
        address: args.address,
        city: args.city,
        zip_code: args.zip_code,
    };

    let payment = match args.payment {
        PaymentMethod::Card => Payment::Card(CardDetails {
            number: SecretString::from(args.card_number.unwrap_or_default()),
            name: args.card_name.unwrap_or_default(),
            expiry: args.expiry.unwrap_or_default(),
            cvv: SecretString::from(args.cvv.unwrap_or_default()),
        }),
        PaymentMethod::Cash => Payment::Cash,
    };

    CheckoutRequest { shipping, payment }
}
