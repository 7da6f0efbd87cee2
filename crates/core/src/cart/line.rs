//! Cart line type.

use serde::{Deserialize, Serialize};

use crate::types::{CartLineId, Price, ProductId, Quantity, Size};

/// Descriptive snapshot of a product as it was put in the cart.
///
/// Everything here is fixed once the line exists; only the quantity of a
/// [`CartLine`] changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog product this line was seeded from.
    pub product_id: ProductId,
    /// Product name (e.g., "Jaqueta Oversized").
    pub name: String,
    /// Brand (e.g., "Balenciaga").
    pub brand: String,
    /// Price of a single unit.
    pub unit_price: Price,
    /// Chosen size.
    pub size: Size,
    /// Image URL or asset reference.
    pub image_ref: String,
}

/// One entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    id: CartLineId,
    #[serde(flatten)]
    item: LineItem,
    quantity: Quantity,
}

impl CartLine {
    /// Create a new line.
    #[must_use]
    pub const fn new(id: CartLineId, item: LineItem, quantity: Quantity) -> Self {
        Self { id, item, quantity }
    }

    #[must_use]
    pub const fn id(&self) -> CartLineId {
        self.id
    }

    #[must_use]
    pub const fn item(&self) -> &LineItem {
        &self.item
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.item.product_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.item.name
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.item.brand
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.item.unit_price
    }

    #[must_use]
    pub const fn size(&self) -> &Size {
        &self.item.size
    }

    #[must_use]
    pub fn image_ref(&self) -> &str {
        &self.item.image_ref
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.unit_price.times(self.quantity.get())
    }

    pub(crate) const fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }
}
