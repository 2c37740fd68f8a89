//! Type-safe price representation using integer minor units.
//!
//! Amounts are stored as a count of the currency's smallest unit (paise for
//! INR) so that cart arithmetic never touches floating point. Conversion to
//! a major-unit [`Decimal`] only happens for display.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-localized amount of money in minor currency units.
///
/// ```
/// use lk_printers_core::Price;
///
/// let tee = Price::from_major(349);
/// assert_eq!(tee.minor_units(), 34_900);
/// assert_eq!(tee.times(2), Price::from_major(698));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero in any currency.
    pub const ZERO: Self = Self(0);

    /// Number of minor units in one major unit.
    pub const MINOR_PER_MAJOR: i64 = 100;

    /// Create a price from minor units (e.g., paise).
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a price from whole major units (e.g., rupees).
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(Self::MINOR_PER_MAJOR))
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Amount in major units as a decimal (e.g., `349.50`).
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Subtract, flooring at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0).max(0))
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Format for display in the given currency (e.g., "₹349", "₹349.50").
    ///
    /// Whole amounts are shown without a fractional part, matching how the
    /// storefront prints catalog prices.
    #[must_use]
    pub fn display(self, currency: CurrencyCode) -> String {
        let amount = self.to_decimal();
        if amount.fract().is_zero() {
            format!("{}{}", currency.symbol(), amount.trunc())
        } else {
            format!("{}{amount:.2}", currency.symbol())
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major() {
        assert_eq!(Price::from_major(999).minor_units(), 99_900);
        assert_eq!(Price::from_major(0), Price::ZERO);
    }

    #[test]
    fn test_times_and_sum() {
        let lines = [Price::from_major(349).times(2), Price::from_major(199).times(1)];
        let subtotal: Price = lines.into_iter().sum();
        assert_eq!(subtotal, Price::from_major(897));
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::from_minor(i64::MAX).times(2).minor_units(), i64::MAX);
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let remaining = Price::from_major(999).saturating_sub(Price::from_major(897));
        assert_eq!(remaining, Price::from_major(102));
        assert_eq!(
            Price::from_major(10).saturating_sub(Price::from_major(20)),
            Price::ZERO
        );
    }

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(Price::from_major(349).display(CurrencyCode::INR), "₹349");
        assert_eq!(Price::ZERO.display(CurrencyCode::INR), "₹0");
    }

    #[test]
    fn test_display_fractional_amount() {
        assert_eq!(Price::from_minor(34_950).display(CurrencyCode::INR), "₹349.50");
        assert_eq!(Price::from_minor(1_999).display(CurrencyCode::USD), "$19.99");
    }

    #[test]
    fn test_serde_is_minor_units() {
        let json = serde_json::to_string(&Price::from_major(5)).unwrap();
        assert_eq!(json, "500");
        let parsed: Price = serde_json::from_str("34900").unwrap();
        assert_eq!(parsed, Price::from_major(349));
    }
}
