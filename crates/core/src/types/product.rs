//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, Price, ProductId};

/// Minimum rating for a product to show up among best sellers.
const BEST_SELLER_MIN_RATING: f64 = 4.5;

/// A product as served by `GET /products`.
///
/// Owned by the catalog; the cart copies it into a [`crate::CartLine`] and
/// never changes it. Field names follow the store's camelCase JSON and the
/// price is a plain JSON number in US dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price in the catalog currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Unit label, e.g. "per kg".
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub best_seller: bool,
    /// Percentage off the display price.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub discount_percentage: Option<Decimal>,
    /// Absolute discount, in display currency units.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub discount: Option<Decimal>,
    /// Seeding timestamp, kept so records round-trip unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Product {
    /// Unit price in the catalog currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Whether the product carries a non-zero percentage or absolute discount.
    #[must_use]
    pub fn has_offer(&self) -> bool {
        self.percentage_off().is_some() || self.absolute_off().is_some()
    }

    /// Whether the product belongs on the best-seller shelf.
    #[must_use]
    pub fn is_best_seller(&self) -> bool {
        self.best_seller || self.rating >= BEST_SELLER_MIN_RATING
    }

    /// Case-insensitive substring match on name or description.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }

    /// Display price in rupees, rounded to whole rupees.
    #[must_use]
    pub fn display_price(&self, inr_rate: Decimal) -> Price {
        self.unit_price()
            .convert(inr_rate, CurrencyCode::INR)
            .round_whole()
    }

    /// Display price after the product's offer, rounded to whole rupees.
    ///
    /// A percentage discount wins over an absolute one.
    #[must_use]
    pub fn offer_price(&self, inr_rate: Decimal) -> Price {
        let base = self.display_price(inr_rate);
        let reduced = if let Some(pct) = self.percentage_off() {
            base.amount
                .saturating_sub(base.amount.saturating_mul(pct) / Decimal::ONE_HUNDRED)
        } else if let Some(off) = self.absolute_off() {
            base.amount.saturating_sub(off)
        } else {
            return base;
        };
        Price::new(reduced, CurrencyCode::INR).round_whole()
    }

    /// Effective percentage off, derived from an absolute discount if needed.
    #[must_use]
    pub fn offer_percentage(&self, inr_rate: Decimal) -> Option<Decimal> {
        if let Some(pct) = self.percentage_off() {
            return Some(pct);
        }
        let off = self.absolute_off()?;
        let base = self.display_price(inr_rate).amount;
        if base.is_zero() {
            return None;
        }
        Some(
            Price::new(
                (off / base).saturating_mul(Decimal::ONE_HUNDRED),
                CurrencyCode::INR,
            )
                .round_whole()
                .amount,
        )
    }

    fn percentage_off(&self) -> Option<Decimal> {
        self.discount_percentage.filter(|p| !p.is_zero())
    }

    fn absolute_off(&self) -> Option<Decimal> {
        self.discount.filter(|d| !d.is_zero())
    }
}
