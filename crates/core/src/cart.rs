//! The cart store.
//!
//! A [`Cart`] is a keyed collection of [`CartLine`]s - at most one line per
//! product. All mutations clamp against the stock observed on the product
//! snapshot passed in by the caller, and every mutation reports an outcome so
//! the caller can tell the user when a quantity was adjusted rather than
//! silently changing it.
//!
//! Persistence is the caller's concern: the storefront serializes the whole
//! cart under a single session key and read-modify-writes it around each
//! mutation, so no two mutations of one session can interleave.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// One product entry in a cart.
///
/// Name, price, and image are denormalized from the product at add time so
/// the cart can render without a catalog fetch; stock decisions always use a
/// fresh snapshot instead of these copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub image_url: Option<String>,
    /// Always >= 1; a line that would drop to zero is removed instead.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line (`unit_price * quantity`).
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Outcome of [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    /// The requested quantity was applied in full.
    Added { quantity: u32 },
    /// The quantity was clamped to the product's stock. Not an error: the
    /// cart now holds `quantity` units and the caller should tell the user.
    Clamped { quantity: u32 },
    /// The product has no stock; the cart was left unchanged.
    OutOfStock,
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SetQuantityOutcome {
    /// The line now holds exactly the requested quantity.
    Updated { quantity: u32 },
    /// The requested quantity exceeded stock and was clamped.
    Clamped { quantity: u32 },
    /// A quantity of zero or less removed the line.
    Removed,
    /// No line with that product id exists.
    Missing,
}

/// The shopping cart: at most one line per product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines (the badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Add `quantity` units of `product`, clamping to its stock.
    ///
    /// An existing line is incremented in place; a new line is created with
    /// the product's current name, price, and image. If the resulting
    /// quantity would exceed stock it is clamped to stock and reported as
    /// [`AddOutcome::Clamped`]. A product with zero stock is never inserted:
    /// the cart must not hold zero-quantity lines.
    pub fn add(&mut self, product: &Product, quantity: u32) -> AddOutcome {
        let stock = product.stock;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            let requested = line.quantity.saturating_add(quantity);
            if requested > stock {
                line.quantity = stock;
                return AddOutcome::Clamped { quantity: stock };
            }
            line.quantity = requested;
            return AddOutcome::Added { quantity: requested };
        }

        if stock == 0 {
            return AddOutcome::OutOfStock;
        }

        let (granted, clamped) = if quantity > stock {
            (stock, true)
        } else {
            (quantity.max(1), false)
        };

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            quantity: granted,
        });

        if clamped {
            AddOutcome::Clamped { quantity: granted }
        } else {
            AddOutcome::Added { quantity: granted }
        }
    }

    /// Set the quantity of an existing line, clamping to `stock`.
    ///
    /// A quantity of zero or less removes the line (equivalent to
    /// [`Cart::remove`]).
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        stock: u32,
    ) -> SetQuantityOutcome {
        if self.line(product_id).is_none() {
            return SetQuantityOutcome::Missing;
        }

        if quantity <= 0 {
            self.remove(product_id);
            return SetQuantityOutcome::Removed;
        }

        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        let (granted, clamped) = if requested > stock {
            (stock, true)
        } else {
            (requested, false)
        };

        if granted == 0 {
            // Stock dropped to zero since the line was added.
            self.remove(product_id);
            return SetQuantityOutcome::Removed;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = granted;
        }

        if clamped {
            SetQuantityOutcome::Clamped { quantity: granted }
        } else {
            SetQuantityOutcome::Updated { quantity: granted }
        }
    }

    /// Remove a line entirely, regardless of quantity.
    ///
    /// Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryId;

    fn product(id: i32, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Producto {id}"),
            description: String::new(),
            price: Decimal::new(1000, 2),
            image_url: None,
            category_id: CategoryId::new(1),
            category_name: "Comidas".to_owned(),
            stock,
            active: true,
        }
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        let outcome = cart.add(&product(1, 10), 3);

        assert_eq!(outcome, AddOutcome::Added { quantity: 3 });
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_add_existing_line_increments() {
        let mut cart = Cart::new();
        let p = product(1, 10);
        cart.add(&p, 2);
        let outcome = cart.add(&p, 3);

        assert_eq!(outcome, AddOutcome::Added { quantity: 5 });
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_add_clamps_to_stock() {
        let mut cart = Cart::new();
        let p = product(1, 5);
        cart.add(&p, 4);
        let outcome = cart.add(&p, 4);

        assert_eq!(outcome, AddOutcome::Clamped { quantity: 5 });
        assert_eq!(cart.line(p.id).expect("line").quantity, 5);
    }

    #[test]
    fn test_add_new_line_clamps_to_stock() {
        let mut cart = Cart::new();
        let outcome = cart.add(&product(1, 2), 9);

        assert_eq!(outcome, AddOutcome::Clamped { quantity: 2 });
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_add_out_of_stock_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let outcome = cart.add(&product(1, 0), 1);

        assert_eq!(outcome, AddOutcome::OutOfStock);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_updates() {
        let mut cart = Cart::new();
        let p = product(1, 10);
        cart.add(&p, 2);

        let outcome = cart.set_quantity(p.id, 7, 10);
        assert_eq!(outcome, SetQuantityOutcome::Updated { quantity: 7 });
        assert_eq!(cart.total_quantity(), 7);
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = Cart::new();
        let p = product(1, 10);
        cart.add(&p, 2);

        let outcome = cart.set_quantity(p.id, 99, 10);
        assert_eq!(outcome, SetQuantityOutcome::Clamped { quantity: 10 });
        assert_eq!(cart.total_quantity(), 10);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        let p = product(1, 10);
        cart.add(&p, 2);

        let outcome = cart.set_quantity(p.id, 0, 10);
        assert_eq!(outcome, SetQuantityOutcome::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_missing_line() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.set_quantity(ProductId::new(9), 1, 10),
            SetQuantityOutcome::Missing
        );
    }

    #[test]
    fn test_set_quantity_when_stock_emptied_removes() {
        let mut cart = Cart::new();
        let p = product(1, 10);
        cart.add(&p, 2);

        // Stock dropped to zero behind our back; any positive request removes.
        let outcome = cart.set_quantity(p.id, 2, 0);
        assert_eq!(outcome, SetQuantityOutcome::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        let p = product(1, 10);
        cart.add(&p, 2);

        assert!(cart.remove(p.id));
        assert!(!cart.remove(p.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, 10), 2);
        cart.add(&product(2, 10), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_no_sequence_produces_nonpositive_quantities() {
        // Whatever the sequence of mutations, no persisted line ever has
        // quantity <= 0.
        let mut cart = Cart::new();
        let a = product(1, 5);
        let b = product(2, 0);

        cart.add(&a, 3);
        cart.add(&b, 2); // out of stock, no line
        cart.add(&a, 9); // clamps to 5
        cart.set_quantity(a.id, -4, 5); // removes
        cart.add(&a, 1);
        cart.set_quantity(a.id, 2, 0); // stock gone, removes

        assert!(cart.lines().iter().all(|line| line.quantity > 0));
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        cart.add(&product(1, 10), 3);

        // 3 * 10.00
        assert_eq!(cart.subtotal(), Decimal::new(3000, 2));
    }

    #[test]
    fn test_cart_serializes_as_plain_array() {
        // The session stores the cart as a bare JSON array of lines, matching
        // the persisted shape the services expect to find under the cart key.
        let mut cart = Cart::new();
        cart.add(&product(1, 10), 2);

        let json = serde_json::to_value(&cart).expect("serialize");
        assert!(json.is_array());

        let parsed: Cart = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, cart);
    }
}
