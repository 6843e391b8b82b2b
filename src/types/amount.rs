//! [`Amount`] represents a payment amount sent to the gateway.
//!
//! This module holds its type definition and implementations.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::errors::Error;

/// Represents a payment amount as a JSON number.
///
/// Integral values are always stored as integers, so `1.0` serializes as `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount(pub Number);

impl Amount {
    /// Create an amount from a floating point value.
    ///
    /// Fails if the value is NaN or infinite.
    pub fn from_f64(value: f64) -> Result<Self, Error> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
            return Ok(Amount(Number::from(value as i64)));
        }
        Number::from_f64(value)
            .map(Amount)
            .ok_or_else(|| Error::invalid_argument(format!("Amount {value} is not a finite number")))
    }

    /// Create an amount from a parsed JSON number, storing integral floats as integers.
    pub fn from_number(number: Number) -> Result<Self, Error> {
        match number.as_f64() {
            Some(value) if number.is_f64() => Amount::from_f64(value),
            _ => Ok(Amount(number)),
        }
    }
}

impl From<u8> for Amount {
    fn from(value: u8) -> Self {
        Amount(Number::from(value))
    }
}

impl From<u16> for Amount {
    fn from(value: u16) -> Self {
        Amount(Number::from(value))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount(Number::from(value))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(Number::from(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount(Number::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Number::from(value))
    }
}

impl TryFrom<f64> for Amount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::from_f64(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let number = Number::deserialize(deserializer)?;
        Amount::from_number(number).map_err(serde::de::Error::custom)
    }
}
