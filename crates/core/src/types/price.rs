//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::region::Currency;

/// An amount in a specific display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (won, dollars).
    pub amount: Decimal,
    /// Currency the amount is expressed in.
    pub currency: Currency,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Format for display, e.g. `₩12,000` or `$9.99`.
    #[must_use]
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        let rounded = self
            .amount
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = format!("{:.*}", places as usize, rounded.abs());

        let (whole, fraction) = text
            .split_once('.')
            .map_or((text.as_str(), None), |(w, f)| (w, Some(f)));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        let sign = if negative { "-" } else { "" };
        let symbol = self.currency.symbol();
        match fraction {
            Some(f) => format!("{sign}{symbol}{grouped}.{f}"),
            None => format!("{sign}{symbol}{grouped}"),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_krw_has_no_minor_units() {
        let price = Price::new(Decimal::new(12_000, 0), Currency::Krw);
        assert_eq!(price.display(), "₩12,000");

        let price = Price::new(Decimal::new(1_234_5678, 1), Currency::Krw);
        assert_eq!(price.display(), "₩1,234,568");
    }

    #[test]
    fn test_display_usd_two_places() {
        let price = Price::new(Decimal::new(999, 2), Currency::Usd);
        assert_eq!(price.display(), "$9.99");

        let price = Price::new(Decimal::new(1_250_000, 2), Currency::Usd);
        assert_eq!(price.display(), "$12,500.00");

        let price = Price::new(Decimal::new(5, 0), Currency::Usd);
        assert_eq!(price.display(), "$5.00");
    }

    #[test]
    fn test_display_negative() {
        let price = Price::new(Decimal::new(-1500, 2), Currency::Usd);
        assert_eq!(price.display(), "-$15.00");
    }
}
