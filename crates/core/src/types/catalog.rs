//! Catalog domain types.
//!
//! A [`Product`] is always a point-in-time snapshot of backend state: it is
//! fetched fresh for every cart render and checkout, never persisted, and
//! never mutated by the services. Stock decisions (clamping, availability)
//! are only ever made against the most recently fetched list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// A product as last observed from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
    pub category_name: String,
    /// Units available for sale. Authoritative only at fetch time.
    pub stock: u32,
    /// Inactive products stay visible in carts but cannot be bought.
    pub active: bool,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.active && self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: u32, active: bool) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Empanada".to_owned(),
            description: "De carne".to_owned(),
            price: Decimal::new(350, 2),
            image_url: None,
            category_id: CategoryId::new(1),
            category_name: "Comidas".to_owned(),
            stock,
            active,
        }
    }

    #[test]
    fn test_availability() {
        assert!(product(3, true).is_available());
        assert!(!product(0, true).is_available());
        assert!(!product(3, false).is_available());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_value(product(3, true)).expect("serialize");
        assert!(json["price"].is_number());
    }
}
