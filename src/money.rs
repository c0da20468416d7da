//! Money type for monetary values.
//!
//! Amounts are stored in cents to avoid floating-point precision issues.
//! Percentage math rounds half-up at two decimal places, which is what the
//! tax calculation requires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g. "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g. "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Add another Money value. `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let cents = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(cents, self.currency))
    }

    /// Subtract another Money value. `None` on currency mismatch or overflow.
    pub fn try_sub(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let cents = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(cents, self.currency))
    }

    /// Multiply by a scalar. `None` on overflow.
    pub fn try_mul(&self, factor: i64) -> Option<Money> {
        let cents = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(cents, self.currency))
    }

    /// Take a percentage expressed in basis points (100 bps = 1%), rounding
    /// half-up to the nearest cent. `None` on overflow.
    ///
    /// ```
    /// use storefront::money::{Currency, Money};
    /// let subtotal = Money::new(11_500, Currency::USD); // $115.00
    /// let tax = subtotal.percent_bps(1_000).unwrap();   // 10%
    /// assert_eq!(tax.amount_cents, 1_150);
    /// ```
    pub fn percent_bps(&self, bps: u32) -> Option<Money> {
        let scaled = self.amount_cents.checked_mul(bps as i64)?;
        let cents = if scaled >= 0 {
            (scaled + 5_000) / 10_000
        } else {
            (scaled - 5_000) / 10_000
        };
        Some(Money::new(cents, self.currency))
    }

    /// Sum an iterator of Money values. `None` on mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format the amount without a symbol (e.g. "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency.symbol(), self.display_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_basics() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
        assert!(m.is_positive());
        assert!(!m.is_zero());
        assert!(Money::zero(Currency::USD).is_zero());
    }

    #[test]
    fn test_try_add_and_sub() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(300, Currency::USD);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1300);
        assert_eq!(a.try_sub(&b).unwrap().amount_cents, 700);
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
        assert!(usd.try_sub(&eur).is_none());
    }

    #[test]
    fn test_overflow() {
        let m = Money::new(i64::MAX, Currency::USD);
        assert!(m.try_add(&Money::new(1, Currency::USD)).is_none());
        assert!(m.try_mul(2).is_none());
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 10% of $1.05 is 10.5 cents, rounds up to 11
        let m = Money::new(105, Currency::USD);
        assert_eq!(m.percent_bps(1_000).unwrap().amount_cents, 11);

        // 10% of $1.04 is 10.4 cents, rounds down to 10
        let m = Money::new(104, Currency::USD);
        assert_eq!(m.percent_bps(1_000).unwrap().amount_cents, 10);

        // exact case
        let m = Money::new(11_500, Currency::USD);
        assert_eq!(m.percent_bps(1_000).unwrap().amount_cents, 1_150);
    }

    #[test]
    fn test_try_sum() {
        let values = [
            Money::new(100, Currency::USD),
            Money::new(250, Currency::USD),
        ];
        let total = Money::try_sum(values.iter(), Currency::USD).unwrap();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(12_650, Currency::USD).to_string(), "$126.50");
        assert_eq!(Money::new(999, Currency::GBP).display_amount(), "9.99");
        assert_eq!(Money::new(-150, Currency::USD).display_amount(), "-1.50");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
