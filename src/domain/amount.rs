//! Lenient monetary values as they come out of the store.
//!
//! Legacy records carry amounts as numbers, numeric strings, empty strings,
//! or garbage. Every read goes through [`to_decimal_or_zero`], which never
//! fails: anything that is not a finite decimal counts as zero. Totals use
//! [`saturating_sum`], so results pin at `Decimal::MAX`/`Decimal::MIN`
//! instead of overflowing.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coerces a raw JSON value into a decimal, yielding zero on failure.
pub fn to_decimal_or_zero(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => number_to_decimal(number),
        Value::String(text) => parse_decimal_or_zero(text),
        _ => Decimal::ZERO,
    }
}

/// Parses decimal text (plain or scientific notation), yielding zero on failure.
pub fn parse_decimal_or_zero(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Adds up amounts, saturating at the representable bounds.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn number_to_decimal(number: &serde_json::Number) -> Decimal {
    if let Some(int) = number.as_i64() {
        return Decimal::from(int);
    }
    if let Some(uint) = number.as_u64() {
        return Decimal::from(uint);
    }
    // Floats go through their shortest textual form so 0.1 stays 0.1.
    number
        .as_f64()
        .filter(|float| float.is_finite())
        .map(|float| parse_decimal_or_zero(&float.to_string()))
        .unwrap_or(Decimal::ZERO)
}

/// An amount field kept exactly as stored, read leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RawAmount(pub Value);

impl RawAmount {
    pub fn value(&self) -> Decimal {
        to_decimal_or_zero(&self.0)
    }

    pub fn is_blank(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        RawAmount(Value::String(value.to_string()))
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        RawAmount(Value::from(value))
    }
}

impl From<i32> for RawAmount {
    fn from(value: i32) -> Self {
        RawAmount(Value::from(value))
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount(Value::from(value))
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount(Value::String(value.to_string()))
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
