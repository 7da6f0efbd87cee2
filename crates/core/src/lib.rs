//! Vitrine Core - Cart ledger and shared domain types.
//!
//! This crate provides the pieces of the storefront that carry actual rules:
//! - `types` - Newtype wrappers for IDs, prices, quantities and sizes
//! - `cart` - The cart ledger: lines, quantity edits, and totals
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async runtime. Catalog access and view models live in
//! `vitrine-storefront`.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use vitrine_core::{Cart, CurrencyCode, LineItem, Price, ProductId, Quantity, ShippingPolicy, Size};
//!
//! let mut cart = Cart::new(CurrencyCode::BRL);
//! let item = LineItem {
//!     product_id: ProductId::new(1),
//!     name: "Jaqueta Oversized".to_string(),
//!     brand: "Balenciaga".to_string(),
//!     unit_price: Price::from_units(4990, CurrencyCode::BRL),
//!     size: Size::parse("M").unwrap(),
//!     image_ref: "https://placehold.co/600x800/111/fff?text=Jaqueta".to_string(),
//! };
//! let line_id = cart.add_item(item, Quantity::ONE).unwrap();
//!
//! // Quantities below one are ignored; removal is explicit.
//! let _ = cart.set_quantity(line_id, 0);
//! assert_eq!(cart.item_count(), 1);
//!
//! let totals = cart.totals(&ShippingPolicy::default());
//! assert_eq!(totals.total.amount, Decimal::from(4990));
//! assert!(totals.free_shipping);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
