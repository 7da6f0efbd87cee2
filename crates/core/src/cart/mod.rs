//! The cart ledger.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s keyed by [`CartLineId`].
//! Insertion order is display order. The ledger keeps three invariants:
//!
//! - line ids are unique within a cart
//! - every line has a quantity of at least 1
//! - every line is priced in the cart's currency
//! - every line total, and their sum, fits in a [`Decimal`]
//!
//! Quantity edits and removals are permissive: a request for a quantity
//! below 1, or one that targets a line that is not in the cart, leaves the
//! cart untouched. The returned [`LineChange`] says what happened; callers
//! that only care about the resulting cart can drop it.

mod line;
mod totals;

pub use line::{CartLine, LineItem};
pub use totals::{
    CartTotals, FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, ShippingPolicy, compute_totals,
};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{CartLineId, CurrencyCode, Price, Quantity, QuantityError};

/// Errors raised while seeding or growing a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A line with this id is already in the cart.
    #[error("cart already contains line {0}")]
    DuplicateLine(CartLineId),

    /// The line is priced in a different currency than the cart.
    #[error("line priced in {found} cannot be added to a {expected} cart")]
    CurrencyMismatch {
        /// The cart's currency.
        expected: CurrencyCode,
        /// The line's currency.
        found: CurrencyCode,
    },

    /// Unit prices must be zero or positive.
    #[error("unit price cannot be negative")]
    NegativePrice,

    /// The line total or the cart subtotal would exceed the largest
    /// representable amount.
    #[error("cart amount out of range")]
    AmountOverflow,
}

/// Outcome of a quantity edit or removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// The line now has this quantity.
    Updated {
        id: CartLineId,
        quantity: Quantity,
    },
    /// The line was deleted.
    Removed(CartLineId),
    /// The request was ignored and the cart is unchanged.
    Ignored(IgnoredReason),
}

impl LineChange {
    /// Returns `true` if the cart was modified.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Why a ledger request left the cart unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The requested quantity was below 1 or out of range.
    InvalidQuantity(QuantityError),
    /// No line has the requested id.
    LineNotFound(CartLineId),
    /// The new quantity would push the line total or the cart subtotal out
    /// of range.
    AmountOverflow(CartLineId),
}

/// A shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    currency: CurrencyCode,
    lines: Vec<CartLine>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(CurrencyCode::default())
    }
}

impl Cart {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            lines: Vec::new(),
        }
    }

    /// Create a cart pre-seeded with `lines`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`CartError`] raised by [`Cart::insert_line`].
    pub fn with_lines(
        currency: CurrencyCode,
        lines: impl IntoIterator<Item = CartLine>,
    ) -> Result<Self, CartError> {
        let mut cart = Self::new(currency);
        for line in lines {
            cart.insert_line(line)?;
        }
        Ok(cart)
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity().get()))
            .sum()
    }

    /// Subtotal, shipping and total under `policy`.
    #[must_use]
    pub fn totals(&self, policy: &ShippingPolicy) -> CartTotals {
        compute_totals(self, policy)
    }

    /// Append a fully formed line, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already taken, the line is priced in
    /// another currency, its unit price is negative, or the cart subtotal
    /// would overflow.
    pub fn insert_line(&mut self, line: CartLine) -> Result<(), CartError> {
        self.check_item(line.item())?;
        if self.line(line.id()).is_some() {
            return Err(CartError::DuplicateLine(line.id()));
        }
        if self
            .subtotal_with(None, line.unit_price(), line.quantity())
            .is_none()
        {
            return Err(CartError::AmountOverflow);
        }
        self.lines.push(line);
        Ok(())
    }

    /// Put `quantity` units of an item in the cart.
    ///
    /// If a line for the same product and size exists its quantity grows;
    /// otherwise a new line is appended with the next free id.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is priced in another currency, its unit
    /// price is negative, or the cart subtotal would overflow.
    pub fn add_item(&mut self, item: LineItem, quantity: Quantity) -> Result<CartLineId, CartError> {
        self.check_item(&item)?;

        let existing = self
            .lines
            .iter()
            .find(|line| line.product_id() == item.product_id && *line.size() == item.size)
            .map(|line| {
                let merged = line.quantity().saturating_add(quantity);
                (line.id(), line.unit_price(), merged)
            });
        if let Some((id, unit_price, merged)) = existing {
            if self.subtotal_with(Some(id), unit_price, merged).is_none() {
                return Err(CartError::AmountOverflow);
            }
            if let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) {
                line.set_quantity(merged);
            }
            return Ok(id);
        }

        if self.subtotal_with(None, item.unit_price, quantity).is_none() {
            return Err(CartError::AmountOverflow);
        }
        let id = self.next_id();
        self.lines.push(CartLine::new(id, item, quantity));
        Ok(id)
    }

    /// Replace a line's quantity.
    ///
    /// Quantities below 1 are ignored; use [`Cart::remove_line`] to delete.
    /// Unknown ids are ignored, as are quantities that would push the cart's
    /// amounts out of range.
    pub fn set_quantity(&mut self, id: CartLineId, new_quantity: i64) -> LineChange {
        let quantity = match Quantity::new(new_quantity) {
            Ok(quantity) => quantity,
            Err(e) => {
                debug!(line_id = %id, requested = new_quantity, "Ignoring quantity change: {e}");
                return LineChange::Ignored(IgnoredReason::InvalidQuantity(e));
            }
        };

        let Some(unit_price) = self.line(id).map(CartLine::unit_price) else {
            debug!(line_id = %id, "Ignoring quantity change for missing line");
            return LineChange::Ignored(IgnoredReason::LineNotFound(id));
        };
        if self.subtotal_with(Some(id), unit_price, quantity).is_none() {
            debug!(
                line_id = %id,
                requested = new_quantity,
                "Ignoring quantity change: amount out of range"
            );
            return LineChange::Ignored(IgnoredReason::AmountOverflow(id));
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) {
            line.set_quantity(quantity);
        }
        LineChange::Updated { id, quantity }
    }

    /// One more unit of a line (the cart screen's `+` button).
    pub fn increment(&mut self, id: CartLineId) -> LineChange {
        self.step(id, 1)
    }

    /// One unit less of a line (the cart screen's `-` button).
    ///
    /// A line at quantity 1 stays at 1.
    pub fn decrement(&mut self, id: CartLineId) -> LineChange {
        self.step(id, -1)
    }

    /// Delete a line. Unknown ids are ignored.
    pub fn remove_line(&mut self, id: CartLineId) -> LineChange {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        if self.lines.len() == before {
            debug!(line_id = %id, "Ignoring removal of missing line");
            LineChange::Ignored(IgnoredReason::LineNotFound(id))
        } else {
            LineChange::Removed(id)
        }
    }

    fn step(&mut self, id: CartLineId, delta: i64) -> LineChange {
        match self.line(id) {
            Some(line) => {
                let current = i64::from(line.quantity().get());
                self.set_quantity(id, current + delta)
            }
            None => {
                debug!(line_id = %id, "Ignoring quantity step for missing line");
                LineChange::Ignored(IgnoredReason::LineNotFound(id))
            }
        }
    }

    fn check_item(&self, item: &LineItem) -> Result<(), CartError> {
        if item.unit_price.currency_code != self.currency {
            return Err(CartError::CurrencyMismatch {
                expected: self.currency,
                found: item.unit_price.currency_code,
            });
        }
        if item.unit_price.is_negative() {
            return Err(CartError::NegativePrice);
        }
        Ok(())
    }

    /// Exact subtotal if line `replacing` (or a new line, when `None`) were
    /// priced at `unit_price` times `quantity`. `None` on overflow.
    fn subtotal_with(
        &self,
        replacing: Option<CartLineId>,
        unit_price: Price,
        quantity: Quantity,
    ) -> Option<Decimal> {
        let candidate = unit_price.checked_times(quantity.get())?.amount;
        self.lines
            .iter()
            .filter(|line| Some(line.id()) != replacing)
            .try_fold(candidate, |sum, line| {
                line.unit_price()
                    .checked_times(line.quantity().get())
                    .and_then(|total| sum.checked_add(total.amount))
            })
    }

    fn next_id(&self) -> CartLineId {
        let max = self
            .lines
            .iter()
            .map(|line| line.id().as_i32())
            .max()
            .unwrap_or(0);
        CartLineId::new(max.saturating_add(1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{Price, ProductId, Size};

    fn item(product: i32, price: i64, size: &str) -> LineItem {
        LineItem {
            product_id: ProductId::new(product),
            name: format!("Produto {product}"),
            brand: "Prada".to_string(),
            unit_price: Price::from_units(price, CurrencyCode::BRL),
            size: Size::parse(size).unwrap(),
            image_ref: format!("https://placehold.co/600x800/111/fff?text={product}"),
        }
    }

    fn seeded() -> Cart {
        Cart::with_lines(
            CurrencyCode::BRL,
            [
                CartLine::new(CartLineId::new(1), item(1, 4990, "M"), Quantity::ONE),
                CartLine::new(CartLineId::new(2), item(2, 3590, "P"), Quantity::ONE),
                CartLine::new(CartLineId::new(3), item(6, 6490, "40"), Quantity::ONE),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut cart = seeded();
        let dup = CartLine::new(CartLineId::new(2), item(9, 10, "M"), Quantity::ONE);
        assert_eq!(
            cart.insert_line(dup),
            Err(CartError::DuplicateLine(CartLineId::new(2)))
        );
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_insert_rejects_other_currency() {
        let mut cart = Cart::new(CurrencyCode::BRL);
        let mut usd = item(1, 10, "M");
        usd.unit_price = Price::from_units(10, CurrencyCode::USD);
        let err = cart
            .insert_line(CartLine::new(CartLineId::new(1), usd, Quantity::ONE))
            .unwrap_err();
        assert_eq!(
            err,
            CartError::CurrencyMismatch {
                expected: CurrencyCode::BRL,
                found: CurrencyCode::USD,
            }
        );
    }

    #[test]
    fn test_insert_rejects_negative_price() {
        let mut cart = Cart::default();
        let err = cart.add_item(item(1, -1, "M"), Quantity::ONE).unwrap_err();
        assert_eq!(err, CartError::NegativePrice);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let mut cart = Cart::default();
        assert!(cart.add_item(item(1, 0, "M"), Quantity::ONE).is_ok());
    }

    #[test]
    fn test_set_quantity_updates_line() {
        let mut cart = seeded();
        let change = cart.set_quantity(CartLineId::new(2), 3);
        assert_eq!(
            change,
            LineChange::Updated {
                id: CartLineId::new(2),
                quantity: Quantity::new(3).unwrap(),
            }
        );
        assert_eq!(cart.line(CartLineId::new(2)).unwrap().quantity().get(), 3);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_below_one_is_ignored() {
        let mut cart = seeded();
        let before = cart.clone();
        for requested in [0, -1, i64::MIN] {
            let change = cart.set_quantity(CartLineId::new(1), requested);
            assert!(!change.is_applied());
            assert!(matches!(
                change,
                LineChange::Ignored(IgnoredReason::InvalidQuantity(QuantityError::BelowOne(_)))
            ));
        }
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_missing_line_is_ignored() {
        let mut cart = seeded();
        let before = cart.clone();
        assert_eq!(
            cart.set_quantity(CartLineId::new(99), 2),
            LineChange::Ignored(IgnoredReason::LineNotFound(CartLineId::new(99)))
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = seeded();
        assert_eq!(
            cart.remove_line(CartLineId::new(2)),
            LineChange::Removed(CartLineId::new(2))
        );
        let ids: Vec<i32> = cart.lines().iter().map(|l| l.id().as_i32()).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_remove_missing_line_is_ignored() {
        let mut cart = seeded();
        let before = cart.clone();
        assert!(!cart.remove_line(CartLineId::new(42)).is_applied());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = seeded();
        let id = CartLineId::new(1);
        assert!(cart.increment(id).is_applied());
        assert_eq!(cart.line(id).unwrap().quantity().get(), 2);
        assert!(cart.decrement(id).is_applied());
        assert!(!cart.decrement(id).is_applied());
        assert_eq!(cart.line(id).unwrap().quantity().get(), 1);
    }

    #[test]
    fn test_step_on_missing_line_is_ignored() {
        let mut cart = seeded();
        assert_eq!(
            cart.increment(CartLineId::new(7)),
            LineChange::Ignored(IgnoredReason::LineNotFound(CartLineId::new(7)))
        );
    }

    #[test]
    fn test_add_item_merges_same_product_and_size() {
        let mut cart = seeded();
        let id = cart
            .add_item(item(1, 4990, "m"), Quantity::new(2).unwrap())
            .unwrap();
        assert_eq!(id, CartLineId::new(1));
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.line(id).unwrap().quantity().get(), 3);
    }

    #[test]
    fn test_add_item_new_size_gets_next_id() {
        let mut cart = seeded();
        let id = cart.add_item(item(1, 4990, "G"), Quantity::ONE).unwrap();
        assert_eq!(id, CartLineId::new(4));
        assert_eq!(cart.lines().last().unwrap().size().as_str(), "G");
    }

    #[test]
    fn test_next_id_after_removals() {
        let mut cart = seeded();
        let _ = cart.remove_line(CartLineId::new(3));
        let id = cart.add_item(item(8, 10, "M"), Quantity::ONE).unwrap();
        assert_eq!(id, CartLineId::new(3));

        let mut empty = Cart::default();
        assert_eq!(
            empty.add_item(item(8, 10, "M"), Quantity::ONE).unwrap(),
            CartLineId::new(1)
        );
    }

    #[test]
    fn test_removing_everything_leaves_flat_fee() {
        let mut cart = seeded();
        for id in [1, 2, 3] {
            let _ = cart.remove_line(CartLineId::new(id));
        }
        let totals = cart.totals(&ShippingPolicy::default());
        assert!(cart.is_empty());
        assert_eq!(totals.subtotal.amount, Decimal::ZERO);
        assert_eq!(totals.shipping_fee.amount, FLAT_SHIPPING_FEE);
        assert_eq!(totals.total.amount, FLAT_SHIPPING_FEE);
    }

    fn huge_item(product: i32) -> LineItem {
        let mut huge = item(product, 0, "M");
        huge.unit_price = Price::new(
            Decimal::from_str_exact("50000000000000000000000000000").unwrap(),
            CurrencyCode::BRL,
        );
        huge
    }

    #[test]
    fn test_add_item_rejects_line_total_overflow() {
        let mut cart = Cart::default();
        let err = cart
            .add_item(huge_item(1), Quantity::new(2).unwrap())
            .unwrap_err();
        assert_eq!(err, CartError::AmountOverflow);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_overflow_is_rejected() {
        let mut cart = Cart::default();
        let id = cart.add_item(huge_item(1), Quantity::ONE).unwrap();

        // Same product merges to quantity 2, another product adds a second
        // line: both overflow the subtotal.
        assert_eq!(
            cart.add_item(huge_item(1), Quantity::ONE),
            Err(CartError::AmountOverflow)
        );
        assert_eq!(
            cart.add_item(huge_item(2), Quantity::ONE),
            Err(CartError::AmountOverflow)
        );
        let line = CartLine::new(CartLineId::new(9), huge_item(3), Quantity::ONE);
        assert_eq!(cart.insert_line(line), Err(CartError::AmountOverflow));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(id).unwrap().quantity(), Quantity::ONE);
    }

    #[test]
    fn test_quantity_edit_that_overflows_is_ignored() {
        let mut cart = Cart::default();
        let id = cart.add_item(huge_item(1), Quantity::ONE).unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.set_quantity(id, 2),
            LineChange::Ignored(IgnoredReason::AmountOverflow(id))
        );
        assert_eq!(
            cart.increment(id),
            LineChange::Ignored(IgnoredReason::AmountOverflow(id))
        );
        assert_eq!(cart, before);

        // Totals stay computable on whatever the ledger accepted.
        let totals = cart.totals(&ShippingPolicy::default());
        assert!(totals.free_shipping);
        assert_eq!(totals.subtotal.amount, before.lines()[0].unit_price().amount);
    }

    #[test]
    fn test_serializes_lines_flat() {
        let json = serde_json::to_value(seeded()).unwrap();
        assert_eq!(json["currency"], "BRL");
        assert_eq!(json["lines"][0]["name"], "Produto 1");
        assert_eq!(json["lines"][0]["quantity"], 1);
        assert_eq!(json["lines"][2]["size"], "40");
    }
}
