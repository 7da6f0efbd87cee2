//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;
pub mod size;

pub use id::*;
pub use price::{CurrencyCode, Price, PriceParseError};
pub use quantity::{Quantity, QuantityError};
pub use size::{APPAREL_SIZES, Size, SizeError};
