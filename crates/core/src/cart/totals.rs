//! Cart pricing: subtotal, shipping fee, total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Cart;
use crate::types::Price;

/// Free-shipping threshold used by the storefront unless configured otherwise.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Flat shipping fee charged below the threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Shipping rules, expressed in the cart's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,
    /// Fee charged when the subtotal is below the threshold.
    pub flat_fee: Decimal,
}

impl ShippingPolicy {
    #[must_use]
    pub const fn new(free_shipping_threshold: Decimal, flat_fee: Decimal) -> Self {
        Self {
            free_shipping_threshold,
            flat_fee,
        }
    }

    /// Whether a (rounded) subtotal ships for free.
    #[must_use]
    pub fn ships_free(&self, subtotal: Decimal) -> bool {
        subtotal >= self.free_shipping_threshold
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::new(FREE_SHIPPING_THRESHOLD, FLAT_SHIPPING_FEE)
    }
}

/// Monetary totals derived from a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Sum of line totals, rounded to minor units.
    pub subtotal: Price,
    /// Zero when the subtotal reaches the free-shipping threshold.
    pub shipping_fee: Price,
    /// Subtotal plus shipping.
    pub total: Price,
    /// Whether the free-shipping threshold was reached.
    pub free_shipping: bool,
}

/// Compute subtotal, shipping and total for a cart.
///
/// The subtotal is summed exactly and rounded once (half-even) before it is
/// compared against the threshold. Amounts saturate at [`Decimal::MAX`]; the
/// ledger rejects carts whose subtotal would get there.
#[must_use]
pub fn compute_totals(cart: &Cart, policy: &ShippingPolicy) -> CartTotals {
    let currency = cart.currency();
    let subtotal = Price::new(
        cart.lines()
            .iter()
            .map(|line| line.line_total().amount)
            .fold(Decimal::ZERO, Decimal::saturating_add),
        currency,
    )
    .rounded();

    let free_shipping = policy.ships_free(subtotal.amount);
    let shipping_fee = if free_shipping {
        Price::zero(currency)
    } else {
        Price::new(policy.flat_fee, currency).rounded()
    };

    CartTotals {
        subtotal,
        shipping_fee,
        total: Price::new(subtotal.amount.saturating_add(shipping_fee.amount), currency),
        free_shipping,
    }
}
