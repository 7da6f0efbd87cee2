//! Domain types for catalog records.
//!
//! These are the shapes the screens work with, separate from the wire
//! records the HTTP catalog decodes.

use serde::{Deserialize, Serialize};
use vitrine_core::{CollectionId, LineItem, Price, ProductId, Size};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name (e.g., "Blazer Estruturado").
    pub name: String,
    /// Brand (e.g., "Gucci").
    pub brand: String,
    /// Current price.
    pub price: Price,
    /// Primary image URL.
    pub image_url: String,
}

impl Product {
    /// Snapshot this product as a cart line item in `size`.
    #[must_use]
    pub fn line_item(&self, size: Size) -> LineItem {
        LineItem {
            product_id: self.id,
            name: self.name.clone(),
            brand: self.brand.clone(),
            unit_price: self.price,
            size,
            image_ref: self.image_url.clone(),
        }
    }
}

/// A curated collection shown on the home feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: CollectionId,
    /// Collection name (e.g., "Streetwear de Luxo").
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Banner image URL.
    pub image_url: String,
}

/// Acknowledgement returned when an item is added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAck {
    /// Whether the catalog accepted the item.
    pub success: bool,
    /// Message suitable for showing to the shopper.
    pub message: String,
}
