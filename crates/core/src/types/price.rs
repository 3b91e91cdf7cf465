//! Type-safe price representation using decimal arithmetic.
//!
//! All prices are Vietnamese đồng (VND), which has no minor unit. The backend
//! sends prices as plain JSON numbers, so [`Price`] accepts numbers (or
//! numeric strings) and always serializes back to a number.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A price in Vietnamese đồng.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero đồng.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of đồng.
    #[must_use]
    pub fn from_dong(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the price is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Whether the price is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Format as Vietnamese currency, e.g. `1.234.567 ₫`.
    ///
    /// Amounts are rounded half away from zero to whole đồng and grouped in
    /// thousands with `.` separators.
    #[must_use]
    pub fn to_vnd_string(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        let whole = rounded.to_i128().unwrap_or_default();
        let digits = whole.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        if whole < 0 {
            format!("-{grouped} ₫")
        } else {
            format!("{grouped} ₫")
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_vnd_string())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self::from_dong(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Mul<i64> for Price {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_vnd_formatting_groups_thousands() {
        assert_eq!(Price::from_dong(1_234_567).to_vnd_string(), "1.234.567 ₫");
        assert_eq!(Price::from_dong(150_000).to_vnd_string(), "150.000 ₫");
        assert_eq!(Price::from_dong(999).to_vnd_string(), "999 ₫");
        assert_eq!(Price::ZERO.to_vnd_string(), "0 ₫");
    }

    #[test]
    fn test_vnd_formatting_rounds_and_signs() {
        let price = Price::new(Decimal::new(12_345, 1)); // 1234.5
        assert_eq!(price.to_vnd_string(), "1.235 ₫");
        assert_eq!(Price::from_dong(-50_000).to_vnd_string(), "-50.000 ₫");
    }

    #[test]
    fn test_deserializes_numbers_and_strings() {
        let from_int: Price = serde_json::from_str("150000").unwrap();
        let from_float: Price = serde_json::from_str("150000.0").unwrap();
        let from_str: Price = serde_json::from_str("\"150000\"").unwrap();
        assert_eq!(from_int, Price::from_dong(150_000));
        assert_eq!(from_float, Price::from_dong(150_000));
        assert_eq!(from_str, Price::from_dong(150_000));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_value(Price::from_dong(200_000)).unwrap();
        assert!(json.is_number());
    }

    #[test]
    fn test_arithmetic() {
        let line = Price::from_dong(100_000) * 3_u32;
        let total: Price = [line, Price::from_dong(50_000)].into_iter().sum();
        assert_eq!(total, Price::from_dong(350_000));
        assert!(total.is_positive());
        assert!(!Price::ZERO.is_positive());
    }
}
