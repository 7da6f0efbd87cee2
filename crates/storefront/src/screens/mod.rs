//! Display-ready state for each storefront screen.
//!
//! Each screen is a plain struct built from domain state and catalog
//! records. Rendering is left to whatever presents them.
//!
//! - [`HomeFeed`] - featured products and collections
//! - [`ProductDetail`] - size and quantity selection, add to cart
//! - [`CartView`] - cart lines, totals and the free-shipping note

mod cart;
mod home;
mod product;

pub use cart::{CartItemView, CartView, recommendations, seed_cart};
pub use home::HomeFeed;
pub use product::{AddToCartError, ProductDetail};
