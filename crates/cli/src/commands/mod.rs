//! Command implementations.
//!
//! Command output goes to stdout; progress and errors are logged.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod seed;

use grocerease_core::{CurrencyCode, Price, Product};
use grocerease_storefront::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

pub use seed::SeedError;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Seed(#[from] SeedError),
}

impl CliError {
    /// Message to show instead of the full error chain.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.user_message(),
            Self::Seed(err) => err.to_string(),
        }
    }
}

/// A catalog amount shown in rupees, e.g. `₹1,121`.
fn rupees(amount: Decimal, inr_rate: Decimal) -> String {
    Price::usd(amount)
        .convert(inr_rate, CurrencyCode::INR)
        .display()
}

#[allow(clippy::print_stdout)]
fn print_products(products: &[Product], inr_rate: Decimal) {
    if products.is_empty() {
        println!("No products found");
        return;
    }

    for p in products {
        let price = if p.has_offer() {
            let pct = p
                .offer_percentage(inr_rate)
                .map_or_else(String::new, |pct| format!(" ({pct}% off)"));
            format!(
                "{} was {}{pct}",
                p.offer_price(inr_rate).display(),
                p.display_price(inr_rate).display()
            )
        } else {
            p.display_price(inr_rate).display()
        };

        let tag = if p.is_best_seller() { " *" } else { "" };
        println!(
            "{:>4}  {:<32} {:<22} {} {}{tag}",
            p.id.as_i64(),
            p.name,
            p.category,
            price,
            p.unit
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupees_uses_indian_grouping() {
        assert_eq!(rupees(Decimal::new(135, 1), Decimal::from(83)), "₹1,121");
        assert_eq!(rupees(Decimal::from(1350), Decimal::from(83)), "₹1,12,050");
    }
}
