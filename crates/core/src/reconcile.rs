//! Stock reconciliation.
//!
//! Cross-references persisted cart lines against a freshly fetched product
//! list. Reconciliation is recomputed on every cart render and is pure: it
//! never rewrites the persisted cart (quantities only change through the
//! explicit clamp paths in [`crate::cart::Cart`]). A line whose product has
//! disappeared is flagged unavailable but kept - removal is the user's call.

use serde::Serialize;

use crate::cart::{Cart, CartLine};
use crate::types::{Product, ProductId};

/// A cart line decorated with availability computed from the live catalog.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReconciledLine {
    #[serde(flatten)]
    pub line: CartLine,
    /// Stock observed for this product, zero if the product is gone.
    pub stock: u32,
    /// Whether the product is active and has any stock at all.
    pub is_available: bool,
    /// Whether the line already holds all available stock (disables "+").
    pub is_max_quantity: bool,
    /// Whether the persisted quantity exceeds current stock (e.g. an admin
    /// lowered the stock after the line was added).
    pub over_stock: bool,
}

/// Why a cart cannot be checked out as-is.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockViolation {
    /// The product no longer exists in the catalog.
    Missing { product_id: ProductId, name: String },
    /// The product was deactivated.
    Inactive { product_id: ProductId, name: String },
    /// The line quantity exceeds current stock.
    OverStock {
        product_id: ProductId,
        name: String,
        quantity: u32,
        stock: u32,
    },
}

fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|product| product.id == id)
}

/// Decorate every cart line with availability flags from `products`.
///
/// Idempotent: the same cart and catalog always produce the same flags.
#[must_use]
pub fn reconcile(cart: &Cart, products: &[Product]) -> Vec<ReconciledLine> {
    cart.lines()
        .iter()
        .map(|line| {
            let product = find_product(products, line.product_id);
            let stock = product.map_or(0, |p| p.stock);
            let active = product.is_some_and(|p| p.active);

            ReconciledLine {
                line: line.clone(),
                stock,
                is_available: active && stock > 0,
                is_max_quantity: line.quantity >= stock,
                over_stock: line.quantity > stock,
            }
        })
        .collect()
}

/// The checkout gate: scan the cart in order and report the first line whose
/// product is missing, inactive, or over stock.
///
/// Fail-fast by design - the whole submission aborts on the first violation
/// so the user sees one conflict at a time, exactly as the cart page renders
/// it.
#[must_use]
pub fn first_violation(cart: &Cart, products: &[Product]) -> Option<StockViolation> {
    cart.lines().iter().find_map(|line| {
        let Some(product) = find_product(products, line.product_id) else {
            return Some(StockViolation::Missing {
                product_id: line.product_id,
                name: line.name.clone(),
            });
        };

        if !product.active {
            return Some(StockViolation::Inactive {
                product_id: line.product_id,
                name: line.name.clone(),
            });
        }

        if line.quantity > product.stock {
            return Some(StockViolation::OverStock {
                product_id: line.product_id,
                name: line.name.clone(),
                quantity: line.quantity,
                stock: product.stock,
            });
        }

        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryId;
    use rust_decimal::Decimal;

    fn product(id: i32, stock: u32, active: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Producto {id}"),
            description: String::new(),
            price: Decimal::new(500, 2),
            image_url: None,
            category_id: CategoryId::new(1),
            category_name: "Comidas".to_owned(),
            stock,
            active,
        }
    }

    fn cart_with(entries: &[(i32, u32)]) -> Cart {
        let mut cart = Cart::new();
        for &(id, quantity) in entries {
            // Add against generous stock, then shrink via the catalog under test.
            cart.add(&product(id, u32::MAX, true), quantity);
        }
        cart
    }

    #[test]
    fn test_missing_product_flags_unavailable_but_keeps_line() {
        let cart = cart_with(&[(1, 2)]);
        let lines = reconcile(&cart, &[]);

        assert_eq!(lines.len(), 1);
        let line = lines.first().expect("line");
        assert_eq!(line.stock, 0);
        assert!(!line.is_available);
        assert!(line.over_stock);
        // The persisted cart is untouched.
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_available_line_flags() {
        let cart = cart_with(&[(1, 2)]);
        let lines = reconcile(&cart, &[product(1, 5, true)]);

        let line = lines.first().expect("line");
        assert!(line.is_available);
        assert!(!line.is_max_quantity);
        assert!(!line.over_stock);
    }

    #[test]
    fn test_at_stock_is_max_but_not_over() {
        let cart = cart_with(&[(1, 5)]);
        let lines = reconcile(&cart, &[product(1, 5, true)]);

        let line = lines.first().expect("line");
        assert!(line.is_max_quantity);
        assert!(!line.over_stock);
    }

    #[test]
    fn test_over_stock_line_is_flagged_not_rewritten() {
        // An admin lowered the stock to 3 after 5 units were carted.
        let cart = cart_with(&[(1, 5)]);
        let lines = reconcile(&cart, &[product(1, 3, true)]);

        let line = lines.first().expect("line");
        assert!(line.over_stock);
        assert!(line.is_max_quantity);
        assert_eq!(line.line.quantity, 5, "reconciliation must not rewrite quantities");
    }

    #[test]
    fn test_inactive_product_is_unavailable() {
        let cart = cart_with(&[(1, 2)]);
        let lines = reconcile(&cart, &[product(1, 5, false)]);

        assert!(!lines.first().expect("line").is_available);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let cart = cart_with(&[(1, 5), (2, 1)]);
        let catalog = vec![product(1, 3, true), product(2, 10, false)];

        assert_eq!(reconcile(&cart, &catalog), reconcile(&cart, &catalog));
    }

    #[test]
    fn test_first_violation_reports_first_only() {
        let cart = cart_with(&[(1, 5), (2, 1)]);
        // Both lines are bad; only the first is reported.
        let catalog = vec![product(1, 3, true), product(2, 10, false)];

        let violation = first_violation(&cart, &catalog).expect("violation");
        assert_eq!(
            violation,
            StockViolation::OverStock {
                product_id: ProductId::new(1),
                name: "Producto 1".to_owned(),
                quantity: 5,
                stock: 3,
            }
        );
    }

    #[test]
    fn test_first_violation_missing_and_inactive() {
        let cart = cart_with(&[(1, 1)]);
        assert!(matches!(
            first_violation(&cart, &[]),
            Some(StockViolation::Missing { .. })
        ));

        let catalog = vec![product(1, 5, false)];
        assert!(matches!(
            first_violation(&cart, &catalog),
            Some(StockViolation::Inactive { .. })
        ));
    }

    #[test]
    fn test_valid_cart_has_no_violation() {
        let cart = cart_with(&[(1, 2), (2, 1)]);
        let catalog = vec![product(1, 5, true), product(2, 1, true)];

        assert_eq!(first_violation(&cart, &catalog), None);
    }
}
