//! Type-safe price representation using decimal arithmetic.
//!
//! The cart never computes with prices; it carries whatever the catalog gave
//! it. Decimals keep that passthrough exact (`19.99` stays `19.99`).

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price as shown in the catalog.
///
/// Serialized as a plain JSON number (`19.99`), not a string, so persisted
/// carts stay readable by anything that expects the numeric form. The number
/// is written digit for digit (no `f64` in between), so every `Decimal`,
/// including `Decimal::MAX` and 28-digit scales, reads back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::arbitrary_precision::deserialize(deserializer).map(Self)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_serializes_as_number() {
        let price = Price::new(Decimal::new(1999, 2));
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "19.99");
    }

    #[test]
    fn test_deserializes_number() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price.amount(), Decimal::new(1999, 2));

        let price: Price = serde_json::from_str("10").unwrap();
        assert_eq!(price.amount(), Decimal::new(10, 0));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(1999).amount(), Decimal::new(1999, 2));
        assert_eq!(Price::from_cents(-500).amount(), Decimal::new(-5, 0));
        assert_eq!(Price::from_cents(0).amount(), Decimal::ZERO);
    }

    #[test]
    fn test_exact_roundtrip_for_edge_values() {
        let values = [
            Decimal::from_str("1234567.123456789012").unwrap(),
            Decimal::from_str("0.0000000000000000000000000001").unwrap(),
            Decimal::MAX,
            Decimal::MIN,
            Decimal::from_str("-42.5").unwrap(),
            Decimal::ZERO,
        ];
        for value in values {
            let json = serde_json::to_string(&Price::new(value)).unwrap();
            assert!(!json.contains('e'), "{json} is not plain decimal");
            assert!(!json.starts_with('"'), "{json} is not a number");

            let parsed: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.amount(), value);
            assert_eq!(parsed.amount().to_string(), value.to_string());
        }
    }

    #[test]
    fn test_max_written_digit_for_digit() {
        let json = serde_json::to_string(&Price::new(Decimal::MAX)).unwrap();
        assert_eq!(json, "79228162514264337593543950335");
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(Decimal::new(1050, 2)).to_string(), "10.50");
    }
}
