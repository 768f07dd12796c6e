use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Highest accepted unit price. Keeps `price * u32::MAX` summed over a cart
/// well inside `Decimal` range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
}

impl Product {
    /// Checks the per-record invariants. Uniqueness of ids is a catalog concern.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.0 == 0 {
            return Err(DomainError::InvalidProduct {
                id: self.id,
                reason: "id must be a positive integer".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidProduct {
                id: self.id,
                reason: "name must not be empty".to_string(),
            });
        }
        if self.price < Decimal::ZERO {
            return Err(DomainError::InvalidProduct {
                id: self.id,
                reason: format!("price must not be negative (got {})", self.price),
            });
        }
        if self.price > MAX_PRICE {
            return Err(DomainError::InvalidProduct {
                id: self.id,
                reason: format!("price must not exceed {MAX_PRICE} (got {})", self.price),
            });
        }
        Ok(())
    }

    pub fn matches(&self, lowered_query: &str) -> bool {
        self.name.to_lowercase().contains(lowered_query)
            || self.description.to_lowercase().contains(lowered_query)
    }
}
