//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The server speaks JSON numbers:   "price": 19.99                       │
//! │  As f64 that is 19.989999999999998436805981327779591083526611328125     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    19.99 on the wire ──► Money(1999) in memory ──► 19.99 on the wire    │
//! │    Rounding happens exactly once, at the JSON boundary.                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client never computes `totalPrice` or `totalAmount` itself; those are
//! trusted from the server. `Money` only exists so that prices are typed,
//! parsed from user input without floats, and displayed consistently.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price: Money = "10.99".parse().unwrap();
//! assert_eq!(price.cents(), 1099);
//! assert_eq!(price.to_string(), "¥10.99");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (fen / cents).
///
/// ## Wire Format
/// Serialized as a plain JSON number with two decimals (`1999` cents is
/// `19.99`). Deserialization accepts integers, floats and numeric strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns a zero Money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns true if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Plain decimal text without currency sign, e.g. `12.50`.
    ///
    /// Used for query parameters.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Converts from a JSON float, rounding half away from zero to the cent.
    fn from_float(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Value as an f64 in major units, for the wire only.
    fn as_float(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Display / Parsing
// =============================================================================

/// Displays as `¥12.34` (negative as `-¥12.34`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_decimal_string();
        match text.strip_prefix('-') {
            Some(abs) => write!(f, "-¥{}", abs),
            None => write!(f, "¥{}", text),
        }
    }
}

/// Parses user input such as `12`, `12.5`, `12.50` or `¥12.50`.
///
/// More than two fractional digits is rejected rather than rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let body = body.strip_prefix('¥').unwrap_or(body);

        let (major, minor) = match body.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (body, ""),
        };

        if major.is_empty() && minor.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected digits"));
        }
        if minor.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("amount too large"))?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("expected digits"))? * 10,
            _ => minor.parse().map_err(|_| invalid("expected digits"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_float())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_float(v).ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "¥10.99");
        assert_eq!(Money::from_cents(5).to_string(), "¥0.05");
        assert_eq!(Money::from_cents(-150).to_string(), "-¥1.50");
        assert_eq!(Money::zero().to_string(), "¥0.00");
        assert_eq!(Money::from_cents(1250).to_decimal_string(), "12.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("¥0.01".parse::<Money>().unwrap().cents(), 1);
        assert_eq!(".99".parse::<Money>().unwrap().cents(), 99);
        assert!("12.345".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }

    #[test]
    fn test_json_number_round_trips_to_cents() {
        let m: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(m.cents(), 1999);
        assert_eq!(serde_json::to_string(&m).unwrap(), "19.99");

        let whole: Money = serde_json::from_str("3").unwrap();
        assert_eq!(whole.cents(), 300);

        let text: Money = serde_json::from_str("\"4.20\"").unwrap();
        assert_eq!(text.cents(), 420);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::from_cents(1).is_positive());
    }
}
