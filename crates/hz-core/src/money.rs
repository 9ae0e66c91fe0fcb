//! # Money Module
//!
//! Provides the `Money` type for prices and invoice totals.
//!
//! ## Integer Cents, Exact Parsing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form input "6.00" ──► Money::from_str ──► Money(600)                   │
//! │                                                                         │
//! │  No float ever sits between the form field and the database:           │
//! │    "0.10" + "0.20" == "0.30"  (10 + 20 == 30 cents)                     │
//! │                                                                         │
//! │  Display:  Money(9000) ──► "Q 90.00"                                    │
//! │  Sheet:    Money(9000) ──► 90.0 (only for the spreadsheet cell value)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hz_core::money::Money;
//!
//! let price: Money = "5".parse().unwrap();
//! assert_eq!(price.cents(), 500);
//!
//! let total = price.multiply_quantity(3).unwrap();
//! assert_eq!(total.to_string(), "Q 15.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

use crate::CURRENCY_PREFIX;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in cents of the shop's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use hz_core::money::Money;
    ///
    /// let price = Money::from_cents(599);
    /// assert_eq!(price.to_string(), "Q 5.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole currency units (quetzales).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Fractional part in cents, always 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Returns `None` when the product does not fit in an `i64`.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: "Gadget" Q 6.00
    /// Quantity: 15
    ///      │
    ///      ▼
    /// multiply_quantity(15) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Invoice total: Q 90.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Converts to a floating point amount of whole units.
    ///
    /// Only for spreadsheet cells, which store numbers as IEEE doubles and
    /// apply the currency format themselves. Never use the result for
    /// arithmetic.
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Why a decimal string could not be turned into [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("amount is not a decimal number")]
    Malformed,

    #[error("amount has more than two decimal places")]
    TooPrecise,

    #[error("amount is too large")]
    Overflow,
}

/// Parses decimal text such as `"6"`, `"6.5"`, `"6.00"` or `"-1.25"`.
///
/// The conversion is exact. A leading `+` or `-` is accepted, surrounding
/// whitespace is ignored, and at most two fraction digits are allowed.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, digits) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseMoneyError::Malformed);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseMoneyError::Malformed);
        }
        if fraction.len() > 2 {
            return Err(ParseMoneyError::TooPrecise);
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseMoneyError::Overflow)?
        };

        // "5.5" means 50 cents, not 5
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| ParseMoneyError::Malformed)? * 10,
            _ => fraction.parse().map_err(|_| ParseMoneyError::Malformed)?,
        };

        let cents = whole_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_value))
            .ok_or(ParseMoneyError::Overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `Q 90.00`, the format printed on invoices and reports.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{} {}{}.{:02}",
            CURRENCY_PREFIX,
            sign,
            self.major().abs(),
            self.minor()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(9000).to_string(), "Q 90.00");
        assert_eq!(Money::from_cents(599).to_string(), "Q 5.99");
        assert_eq!(Money::from_cents(5).to_string(), "Q 0.05");
        assert_eq!(Money::from_cents(0).to_string(), "Q 0.00");
        assert_eq!(Money::from_cents(-250).to_string(), "Q -2.50");
    }

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!("6.00".parse::<Money>().unwrap().cents(), 600);
        assert_eq!("5".parse::<Money>().unwrap().cents(), 500);
        assert_eq!("5.5".parse::<Money>().unwrap().cents(), 550);
        assert_eq!(" 12.34 ".parse::<Money>().unwrap().cents(), 1234);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("7.".parse::<Money>().unwrap().cents(), 700);
        assert_eq!("-1.25".parse::<Money>().unwrap().cents(), -125);
        assert_eq!("+3".parse::<Money>().unwrap().cents(), 300);
    }

    #[test]
    fn test_parse_is_exact() {
        let a: Money = "0.10".parse().unwrap();
        let b: Money = "0.20".parse().unwrap();
        assert_eq!(a + b, "0.30".parse().unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("   ".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("abc".parse::<Money>(), Err(ParseMoneyError::Malformed));
        assert_eq!("1,50".parse::<Money>(), Err(ParseMoneyError::Malformed));
        assert_eq!("1.2.3".parse::<Money>(), Err(ParseMoneyError::Malformed));
        assert_eq!(".".parse::<Money>(), Err(ParseMoneyError::Malformed));
        assert_eq!("-".parse::<Money>(), Err(ParseMoneyError::Malformed));
        assert_eq!("1e3".parse::<Money>(), Err(ParseMoneyError::Malformed));
        assert_eq!("1.234".parse::<Money>(), Err(ParseMoneyError::TooPrecise));
        assert_eq!(
            "99999999999999999999".parse::<Money>(),
            Err(ParseMoneyError::Overflow)
        );
    }

    #[test]
    fn test_arithmetic() {
        let unit = Money::from_cents(600);
        assert_eq!(unit.multiply_quantity(15), Some(Money::from_cents(9000)));

        let mut sum = Money::zero();
        sum += unit;
        sum += Money::from_cents(50);
        assert_eq!(sum.cents(), 650);
    }

    #[test]
    fn test_multiply_quantity_overflow() {
        assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2), None);
        assert_eq!(
            Money::from_cents(10_000_000_000_000_000).multiply_quantity(1_000),
            None
        );

        let largest = Money::from_cents(crate::MAX_PRICE_CENTS)
            .multiply_quantity(crate::MAX_QUANTITY)
            .unwrap();
        assert_eq!(largest.cents(), 1_000_000_000_000_000_000);
        assert_eq!(largest.to_string(), "Q 10000000000000000.00");
    }

    #[test]
    fn test_to_major_f64() {
        assert_eq!(Money::from_cents(9000).to_major_f64(), 90.0);
        assert_eq!(Money::from_cents(1250).to_major_f64(), 12.5);
    }
}
