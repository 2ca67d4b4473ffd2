//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are stored in US dollars. The storefront displays rupees,
//! converting at a fixed rate and rounding to whole rupees.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price in the catalog currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Convert into another currency at `rate` units of `target` per unit of
    /// this price's currency. No rounding is applied.
    #[must_use]
    pub fn convert(self, rate: Decimal, target: CurrencyCode) -> Self {
        Self::new(self.amount.saturating_mul(rate), target)
    }

    /// Round to whole currency units, halves away from zero.
    #[must_use]
    pub fn round_whole(self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            self.currency_code,
        )
    }

    /// Add tax at `rate` (e.g. `0.10` for 10%).
    ///
    /// Like [`Price::convert`], saturates instead of overflowing.
    #[must_use]
    pub fn with_tax(self, rate: Decimal) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::ONE.saturating_add(rate)),
            self.currency_code,
        )
    }

    /// Format for display, e.g. `$13.50` or `₹1,12,050`.
    #[must_use]
    pub fn display(&self) -> String {
        match self.currency_code {
            CurrencyCode::USD => format!("{}{:.2}", self.currency_code.symbol(), self.amount),
            CurrencyCode::INR => {
                let whole = self.round_whole().amount;
                let digits = whole.abs().trunc().to_string();
                let sign = if whole.is_sign_negative() && !whole.is_zero() {
                    "-"
                } else {
                    ""
                };
                format!(
                    "{sign}{}{}",
                    self.currency_code.symbol(),
                    group_indian(&digits)
                )
            }
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Catalog currency.
    #[default]
    USD,
    /// Display currency.
    INR,
}

impl CurrencyCode {
    /// Currency symbol used when formatting.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::INR => "₹",
        }
    }
}

/// Insert separators the en-IN way: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.extend(head.get(start..end));
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap_or_default()
    }

    #[test]
    fn test_usd_display_has_two_decimals() {
        assert_eq!(Price::usd(dec("13.5")).display(), "$13.50");
        assert_eq!(Price::usd(Decimal::ZERO).display(), "$0.00");
    }

    #[test]
    fn test_inr_conversion_rounds_to_whole_rupees() {
        // 4.5 * 83 = 373.5 -> 374
        let inr = Price::usd(dec("4.5"))
            .convert(dec("83"), CurrencyCode::INR)
            .round_whole();
        assert_eq!(inr.amount, dec("374"));
        assert_eq!(inr.currency_code, CurrencyCode::INR);
    }

    #[test]
    fn test_inr_display_uses_indian_grouping() {
        assert_eq!(Price::new(dec("999"), CurrencyCode::INR).display(), "₹999");
        assert_eq!(Price::new(dec("1121"), CurrencyCode::INR).display(), "₹1,121");
        assert_eq!(
            Price::new(dec("1234567"), CurrencyCode::INR).display(),
            "₹12,34,567"
        );
    }

    #[test]
    fn test_with_tax() {
        let total = Price::usd(dec("13.5")).with_tax(dec("0.10"));
        assert_eq!(total.amount, dec("14.85"));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Price::usd(Decimal::MAX);
        assert_eq!(huge.with_tax(dec("0.10")).amount, Decimal::MAX);
        assert_eq!(
            huge.convert(dec("83"), CurrencyCode::INR).amount,
            Decimal::MAX
        );
    }
}
