use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    pub fn to_cents(self) -> Option<i64> {
        (self.0 * Decimal::from(100)).round().to_i64()
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

/// Accepts `1234.5`, `$1,234.50`, `1 234` and accounting negatives `(75.25)`.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidAmount {
            field: "amount",
            value: s.to_string(),
        };

        let trimmed = s.trim();
        let (negative, body) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
            (true, &trimmed[1..trimmed.len() - 1])
        } else {
            (false, trimmed)
        };
        let body = body.replace([',', '$', ' '], "");
        if body.is_empty() {
            return Err(invalid());
        }

        let mut dec = Decimal::from_str(&body).map_err(|_| invalid())?;
        if negative {
            dec = -dec;
        }
        Ok(Money::from_decimal(dec))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Money, ValidationError> {
        s.parse::<Money>()
    }

    #[test]
    fn parse_plain() {
        assert_eq!(parse("123.45").unwrap().to_cents(), Some(12345));
    }

    #[test]
    fn parse_with_dollar_sign_and_commas() {
        assert_eq!(parse("$88,549.00").unwrap().to_cents(), Some(8854900));
    }

    #[test]
    fn parse_accounting_parens() {
        assert_eq!(parse("(75.25)").unwrap().to_cents(), Some(-7525));
    }

    #[test]
    fn parse_rounds_to_cents() {
        assert_eq!(parse("0.016").unwrap().to_cents(), Some(2));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse("twelve").unwrap_err();
        assert_eq!(err.field(), "amount");
        assert!(parse("").is_err());
        assert!(parse("$").is_err());
        assert!(parse("()").is_err());
    }

    #[test]
    fn positivity() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::from_cents(-1).is_positive());
    }

    #[test]
    fn display_two_decimals() {
        assert_eq!(Money::from_cents(365000).to_string(), "$3650.00");
    }

    #[test]
    fn arithmetic() {
        let total = Money::from_cents(150) + Money::from_cents(250) - Money::from_cents(100);
        assert_eq!(total.to_cents(), Some(300));
    }
}
