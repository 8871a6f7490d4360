//! Catalog record types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named hero record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i32,
    pub name: String,
}

impl Hero {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A restaurant with its price per person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub price_per_person: f64,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, price_per_person: f64) -> Self {
        Self {
            name: name.into(),
            price_per_person,
        }
    }
}

/// Reasons a price path segment is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidPrice {
    #[error("price '{0}' is not a number")]
    NotANumber(String),

    #[error("price '{0}' is not finite")]
    NotFinite(String),

    #[error("price must be non-negative, got {0}")]
    Negative(f64),
}

/// Inclusive upper bound on price per person. Always finite and >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MaxPrice(f64);

impl MaxPrice {
    pub fn new(value: f64) -> Result<Self, InvalidPrice> {
        if !value.is_finite() {
            return Err(InvalidPrice::NotFinite(value.to_string()));
        }
        if value < 0.0 {
            return Err(InvalidPrice::Negative(value));
        }
        // Normalizes -0.0.
        Ok(Self(value.abs()))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for MaxPrice {
    type Err = InvalidPrice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .parse()
            .map_err(|_| InvalidPrice::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}
