//! Unified error type for callers driving the storefront.

use thiserror::Error;
use vitrine_core::{CartError, QuantityError, SizeError};

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::screens::AddToCartError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Add to cart failed.
    #[error(transparent)]
    AddToCart(#[from] AddToCartError),

    /// Cart could not be built.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Invalid quantity input.
    #[error("Invalid quantity: {0}")]
    Quantity(#[from] QuantityError),

    /// Invalid size input.
    #[error("Invalid size: {0}")]
    Size(#[from] SizeError),
}

/// Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
