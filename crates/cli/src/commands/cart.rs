//! Cart commands.
//!
//! Every run starts from the starter cart; nothing is saved between runs.

use thiserror::Error;
use tracing::{info, warn};
use vitrine_core::{Cart, CartLineId, ProductId, Quantity, Size};
use vitrine_storefront::AppState;
use vitrine_storefront::screens::{CartView, ProductDetail, seed_cart};

/// A `--set ID=QTY` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEdit {
    pub id: CartLineId,
    pub quantity: i64,
}

/// Errors parsing a `--set` argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineEditError {
    #[error("expected ID=QTY, got '{0}'")]
    MissingEquals(String),
    #[error("invalid line id '{0}'")]
    InvalidId(String),
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),
}

/// Parse `ID=QTY`. Negative quantities parse; the cart decides what to do
/// with them.
pub fn parse_line_edit(s: &str) -> Result<LineEdit, LineEditError> {
    let (id, quantity) = s
        .split_once('=')
        .ok_or_else(|| LineEditError::MissingEquals(s.to_owned()))?;
    let id = id
        .parse::<CartLineId>()
        .map_err(|_| LineEditError::InvalidId(id.to_owned()))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| LineEditError::InvalidQuantity(quantity.to_owned()))?;
    Ok(LineEdit { id, quantity })
}

/// Apply `sets` then `removes` to the starter cart and print it.
///
/// # Errors
///
/// Returns an error if the starter cart cannot be built.
pub fn show(
    state: &AppState,
    sets: &[LineEdit],
    removes: &[CartLineId],
) -> vitrine_storefront::Result<()> {
    let mut cart = seed_cart(state.config().currency)?;
    apply_edits(&mut cart, sets, removes);
    print_cart(&CartView::build(&cart, state.shipping()));
    Ok(())
}

/// Run the product page's add-to-cart flow against the starter cart.
///
/// # Errors
///
/// Returns an error if the quantity is invalid, the product cannot be
/// fetched, or the catalog refuses the item.
#[allow(clippy::print_stdout)]
pub async fn add(
    state: &AppState,
    product_id: ProductId,
    size: Size,
    quantity: i64,
) -> vitrine_storefront::Result<()> {
    let quantity = Quantity::new(quantity)?;
    let product = state.catalog().product(product_id).await?;

    let mut detail = ProductDetail::new(product);
    detail.select_size(size);
    detail.set_quantity(quantity);

    let mut cart = seed_cart(state.config().currency)?;
    let ack = detail.add_to_cart(state.catalog(), &mut cart).await?;
    println!("{}", ack.message);
    println!();
    print_cart(&CartView::build(&cart, state.shipping()));
    Ok(())
}

fn apply_edits(cart: &mut Cart, sets: &[LineEdit], removes: &[CartLineId]) {
    let mut changes = Vec::with_capacity(sets.len() + removes.len());
    for edit in sets {
        changes.push(cart.set_quantity(edit.id, edit.quantity));
    }
    for &id in removes {
        changes.push(cart.remove_line(id));
    }

    for change in changes {
        if change.is_applied() {
            info!(?change, "Cart updated");
        } else {
            warn!(?change, "Edit ignored");
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_cart(view: &CartView) {
    if view.is_empty {
        println!("Seu carrinho está vazio");
    }
    for item in &view.items {
        println!(
            "{:>3}  {:<22} {:<15} {:<4} x{:<3} {:>14}",
            item.id, item.name, item.brand, item.size, item.quantity, item.line_price
        );
    }
    println!();
    println!("Itens     {}", view.item_count);
    println!("Subtotal  {}", view.subtotal);
    println!("Frete     {}", view.shipping);
    if let Some(note) = &view.free_shipping_note {
        println!("          {note}");
    }
    println!("Total     {}", view.total);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::{CurrencyCode, ShippingPolicy};

    use super::*;

    #[test]
    fn test_parse_line_edit() {
        assert_eq!(
            parse_line_edit("2=3").unwrap(),
            LineEdit {
                id: CartLineId::new(2),
                quantity: 3
            }
        );
        assert_eq!(parse_line_edit("1=-1").unwrap().quantity, -1);
        assert_eq!(
            parse_line_edit("1").unwrap_err(),
            LineEditError::MissingEquals("1".to_string())
        );
        assert!(matches!(
            parse_line_edit("x=1"),
            Err(LineEditError::InvalidId(_))
        ));
        assert!(matches!(
            parse_line_edit("1=lots"),
            Err(LineEditError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_apply_edits_sets_then_removes() {
        let mut cart = seed_cart(CurrencyCode::BRL).unwrap();
        let sets = [
            parse_line_edit("1=2").unwrap(),
            parse_line_edit("2=0").unwrap(),
        ];
        apply_edits(&mut cart, &sets, &[CartLineId::new(3), CartLineId::new(9)]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.line(CartLineId::new(1)).unwrap().quantity().get(), 2);
        assert_eq!(cart.line(CartLineId::new(2)).unwrap().quantity().get(), 1);
        let view = CartView::build(&cart, &ShippingPolicy::default());
        assert_eq!(view.subtotal, "R$ 13.570,00");
    }
}
