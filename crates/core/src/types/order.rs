//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, OrderLineId, ProductId, UserId};
use super::status::OrderStatus;

/// One line of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub quantity: u32,
    /// Line subtotal as recorded at order time (unit price may have changed since).
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub product_id: ProductId,
    pub product_name: String,
}

/// The customer a placed order belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderCustomer {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A placed order as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Grand total recorded at order time (line subtotals plus shipping).
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    /// Absent on the customer's own order history; present on admin views.
    pub customer: Option<OrderCustomer>,
    pub phone: String,
    pub address: String,
    pub payment_method: String,
    pub notes: String,
}

impl Order {
    /// Sum of the recorded line subtotals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(|line| line.subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal_sums_lines() {
        let order = Order {
            id: OrderId::new(1),
            total: Decimal::new(2000, 0),
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
            lines: vec![
                OrderLine {
                    id: OrderLineId::new(1),
                    quantity: 2,
                    subtotal: Decimal::new(700, 0),
                    product_id: ProductId::new(1),
                    product_name: "Empanada".to_owned(),
                },
                OrderLine {
                    id: OrderLineId::new(2),
                    quantity: 1,
                    subtotal: Decimal::new(800, 0),
                    product_id: ProductId::new(2),
                    product_name: "Milanesa".to_owned(),
                },
            ],
            customer: None,
            phone: String::new(),
            address: String::new(),
            payment_method: String::new(),
            notes: String::new(),
        };

        assert_eq!(order.subtotal(), Decimal::new(1500, 0));
    }
}
