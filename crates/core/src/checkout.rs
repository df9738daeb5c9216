//! Order totals and the shipping breakdown.
//!
//! Shipping is a flat charge added to every order at checkout. Placed orders
//! only record the grand total, so order views re-derive the shipping
//! component as `total - subtotal`; a negative difference means the stored
//! total is inconsistent with the recorded lines and is clamped back to the
//! flat charge while being flagged to the caller.

use rust_decimal::Decimal;

/// Flat shipping charge applied to every order.
#[must_use]
pub fn shipping_cost() -> Decimal {
    Decimal::new(500, 0)
}

/// Grand total for a cart subtotal: `subtotal + shipping`.
#[must_use]
pub fn order_total(subtotal: Decimal) -> Decimal {
    subtotal + shipping_cost()
}

/// The derived cost breakdown of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingBreakdown {
    pub shipping: Decimal,
    /// Set when `total - subtotal` came out negative and the flat charge was
    /// substituted. The stored total disagrees with the recorded lines; the
    /// caller should log this as a data-integrity signal.
    pub inconsistent: bool,
}

/// Derive the shipping component of a placed order from its recorded total
/// and line subtotal.
#[must_use]
pub fn derive_shipping(total: Decimal, subtotal: Decimal) -> ShippingBreakdown {
    let shipping = total - subtotal;
    if shipping < Decimal::ZERO {
        return ShippingBreakdown {
            shipping: shipping_cost(),
            inconsistent: true,
        };
    }
    ShippingBreakdown {
        shipping,
        inconsistent: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total_adds_flat_shipping() {
        let subtotal = Decimal::new(1250, 0);
        assert_eq!(order_total(subtotal), Decimal::new(1750, 0));
    }

    #[test]
    fn test_derive_shipping_normal() {
        let breakdown = derive_shipping(Decimal::new(1750, 0), Decimal::new(1250, 0));
        assert_eq!(breakdown.shipping, Decimal::new(500, 0));
        assert!(!breakdown.inconsistent);
    }

    #[test]
    fn test_derive_shipping_negative_clamps_and_flags() {
        // Stored total smaller than the recorded lines: inconsistent data.
        let breakdown = derive_shipping(Decimal::new(1000, 0), Decimal::new(1200, 0));
        assert_eq!(breakdown.shipping, shipping_cost());
        assert!(breakdown.inconsistent);
    }

    #[test]
    fn test_derive_shipping_zero_is_consistent() {
        let breakdown = derive_shipping(Decimal::new(1200, 0), Decimal::new(1200, 0));
        assert_eq!(breakdown.shipping, Decimal::ZERO);
        assert!(!breakdown.inconsistent);
    }
}
