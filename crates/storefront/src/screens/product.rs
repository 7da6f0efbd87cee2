//! Product detail.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};
use vitrine_core::{Cart, CartError, CartLineId, Quantity, Size};

use crate::catalog::{CartAck, CatalogError, CatalogProvider, Product};

/// Errors from the add-to-cart button.
#[derive(Debug, Error)]
pub enum AddToCartError {
    /// No size chosen yet.
    #[error("Por favor, selecione um tamanho")]
    SizeNotSelected,

    /// The catalog call failed.
    #[error("Erro ao adicionar ao carrinho: {0}")]
    Catalog(#[from] CatalogError),

    /// The catalog answered but refused the item.
    #[error("{0}")]
    Rejected(String),

    /// The local cart refused the item.
    #[error("Erro ao adicionar ao carrinho: {0}")]
    Cart(#[from] CartError),
}

/// A product page with the shopper's size and quantity choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    selected_size: Option<Size>,
    quantity: Quantity,
}

impl ProductDetail {
    /// Open a product with no size selected and quantity 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            selected_size: None,
            quantity: Quantity::ONE,
        }
    }

    /// Sizes offered on the page.
    #[must_use]
    pub fn sizes() -> Vec<Size> {
        Size::apparel()
    }

    #[must_use]
    pub const fn selected_size(&self) -> Option<&Size> {
        self.selected_size.as_ref()
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn select_size(&mut self, size: Size) {
        self.selected_size = Some(size);
    }

    pub const fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    pub const fn increment_quantity(&mut self) {
        self.quantity = self.quantity.saturating_add(Quantity::ONE);
    }

    /// One less, never below 1.
    pub fn decrement_quantity(&mut self) {
        self.quantity = Quantity::new(i64::from(self.quantity.get()) - 1).unwrap_or(Quantity::ONE);
    }

    /// Send the current selection to the catalog, then record it in `cart`.
    ///
    /// The cart is only touched once the catalog has accepted the item.
    ///
    /// # Errors
    ///
    /// Returns [`AddToCartError::SizeNotSelected`] before any request is made
    /// if no size is chosen, and the catalog or cart error otherwise.
    #[instrument(skip_all, fields(product_id = %self.product.id, quantity = %self.quantity))]
    pub async fn add_to_cart(
        &self,
        catalog: &dyn CatalogProvider,
        cart: &mut Cart,
    ) -> Result<CartAck, AddToCartError> {
        let Some(size) = self.selected_size.clone() else {
            return Err(AddToCartError::SizeNotSelected);
        };

        let ack = catalog.add_to_cart(self.product.id, self.quantity).await?;
        if !ack.success {
            warn!(message = %ack.message, "Catalog rejected add to cart");
            return Err(AddToCartError::Rejected(ack.message));
        }

        let line_id: CartLineId = cart.add_item(self.product.line_item(size), self.quantity)?;
        info!(line_id = %line_id, "Added to cart");
        Ok(ack)
    }
}
