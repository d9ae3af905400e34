//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's minor unit (paise, cents). Catalog
//! records carry decimal prices; they are converted once at the
//! normalization boundary and never touched as floats again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported storefront currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    AED,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AED => "AED",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::AED => "AED ",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Number of decimal places in the minor unit.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "AED" => Some(Currency::AED),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the currency's minor unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the minor unit.
    ///
    /// ```
    /// use storefront_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(499.5, Currency::INR);
    /// assert_eq!(price.amount_minor, 49950);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a value from whole major units (e.g., rupees).
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount * currency.minor_per_major(), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// `Some(self)` when the amount is strictly positive.
    ///
    /// Catalog data uses 0 as "not set", so pricing tiers filter through this.
    pub fn positive(self) -> Option<Money> {
        self.is_positive().then_some(self)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "₹499.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "499.00").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Add another value, returning `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// A whole-number percentage of this amount, rounded to the minor unit.
    pub fn percentage(&self, percent: u8) -> Money {
        let scaled = (self.amount_minor as i128 * percent as i128 + 50) / 100;
        Money::new(scaled as i64, self.currency)
    }

    /// Sum values of one currency, returning `None` on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(49.99, Currency::INR).amount_minor, 4999);
        assert_eq!(Money::from_decimal(0.005, Currency::USD).amount_minor, 1);
        assert_eq!(Money::from_decimal(100.0, Currency::JPY).amount_minor, 100);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_major(500, Currency::INR).display(), "\u{20b9}500.00");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_positive_filter() {
        assert_eq!(Money::zero(Currency::INR).positive(), None);
        assert_eq!(Money::new(-5, Currency::INR).positive(), None);
        let m = Money::new(5, Currency::INR);
        assert_eq!(m.positive(), Some(m));
    }

    #[test]
    fn test_try_add_rejects_mixed_currency() {
        let inr = Money::new(1000, Currency::INR);
        let usd = Money::new(1000, Currency::USD);
        assert_eq!(inr.try_add(&usd), None);
        assert_eq!(inr.try_add(&inr).map(|m| m.amount_minor), Some(2000));
    }

    #[test]
    fn test_try_multiply_overflow() {
        assert_eq!(Money::new(i64::MAX, Currency::INR).try_multiply(2), None);
        assert_eq!(
            Money::new(250, Currency::INR).try_multiply(3),
            Some(Money::new(750, Currency::INR))
        );
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(Money::new(999, Currency::INR).percentage(50).amount_minor, 500);
        assert_eq!(Money::new(10000, Currency::INR).percentage(25).amount_minor, 2500);
    }

    #[test]
    fn test_try_sum() {
        let values = [Money::new(100, Currency::INR), Money::new(250, Currency::INR)];
        assert_eq!(
            Money::try_sum(values.iter(), Currency::INR),
            Some(Money::new(350, Currency::INR))
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code(" USD "), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
