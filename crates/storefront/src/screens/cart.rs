//! Cart screen.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{instrument, warn};
use vitrine_core::{
    Cart, CartError, CartLine, CartLineId, CurrencyCode, Price, Quantity, ShippingPolicy, Size,
};

use crate::catalog::{CatalogError, CatalogProvider, Product, fixtures};

const FREE_SHIPPING_LABEL: &str = "Grátis";

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: CartLineId,
    pub name: String,
    pub brand: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id(),
            name: line.name().to_string(),
            brand: line.brand().to_string(),
            size: line.size().to_string(),
            quantity: line.quantity().get(),
            price: line.unit_price().display(),
            line_price: line.line_total().display(),
            image: line.image_ref().to_string(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub subtotal: String,
    /// Formatted fee, or "Grátis".
    pub shipping: String,
    pub total: String,
    pub free_shipping: bool,
    /// Shown only when shipping is free.
    pub free_shipping_note: Option<String>,
    pub is_empty: bool,
}

impl CartView {
    /// Derive the screen from the ledger.
    #[must_use]
    pub fn build(cart: &Cart, policy: &ShippingPolicy) -> Self {
        let totals = cart.totals(policy);
        let shipping = if totals.shipping_fee.is_zero() {
            FREE_SHIPPING_LABEL.to_string()
        } else {
            totals.shipping_fee.display()
        };
        let free_shipping_note = totals.free_shipping.then(|| {
            format!(
                "Frete grátis para compras acima de {}",
                threshold_label(policy, cart.currency())
            )
        });

        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            subtotal: totals.subtotal.display(),
            shipping,
            total: totals.total.display(),
            free_shipping: totals.free_shipping,
            free_shipping_note,
            is_empty: cart.is_empty(),
        }
    }
}

/// Threshold without a zero fraction (`R$ 1.000`, not `R$ 1.000,00`).
fn threshold_label(policy: &ShippingPolicy, currency: CurrencyCode) -> String {
    let price = Price::new(policy.free_shipping_threshold, currency);
    let label = price.display();
    if price.rounded().amount.fract().is_zero() {
        label
            .rsplit_once(|c: char| c == ',' || c == '.')
            .map_or(label.clone(), |(whole, _)| whole.to_string())
    } else {
        label
    }
}

/// The cart a shopper starts with: three lines, one unit each.
///
/// # Errors
///
/// Returns an error if the fixture products are not priced in `currency`.
pub fn seed_cart(currency: CurrencyCode) -> Result<Cart, CartError> {
    let mut cart = Cart::new(currency);
    for (product, size) in fixtures::initial_cart() {
        let size = match Size::parse(size) {
            Ok(size) => size,
            Err(e) => {
                warn!(product_id = %product.id, error = %e, "Skipping seed line");
                continue;
            }
        };
        cart.add_item(product.line_item(size), Quantity::ONE)?;
    }
    Ok(cart)
}

/// The catalog's recommended products not already in `cart`.
///
/// # Errors
///
/// Returns an error if the recommended products cannot be fetched.
#[instrument(skip_all)]
pub async fn recommendations(
    catalog: &dyn CatalogProvider,
    cart: &Cart,
) -> Result<Vec<Product>, CatalogError> {
    let in_cart: HashSet<_> = cart.lines().iter().map(CartLine::product_id).collect();
    let mut seen = HashSet::new();
    let products = catalog
        .recommended_products()
        .await?
        .into_iter()
        .filter(|p| !in_cart.contains(&p.id) && seen.insert(p.id))
        .collect();
    Ok(products)
}
