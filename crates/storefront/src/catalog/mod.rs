//! Catalog access.
//!
//! # Architecture
//!
//! Screens talk to the catalog only through the [`CatalogProvider`] trait,
//! shared as `Arc<dyn CatalogProvider>`:
//!
//! - [`StubCatalog`] - built-in mock data, with injectable latency and
//!   failures for tests
//! - [`HttpCatalog`] - JSON API over `reqwest`, configured by an explicit
//!   [`ApiConfig`](crate::config::ApiConfig)
//! - [`CachedCatalog`] - wraps either one with a `moka` cache (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_storefront::catalog::{CachedCatalog, CatalogProvider, StubCatalog};
//!
//! let catalog = CachedCatalog::new(StubCatalog::new(), Duration::from_secs(300));
//! let featured = catalog.featured_products().await?;
//! ```

mod cache;
mod conversions;
pub mod fixtures;
mod http;
mod stub;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use vitrine_core::{ProductId, Quantity};

pub use cache::{CachedCatalog, DEFAULT_TTL as DEFAULT_CACHE_TTL, MAX_TTL as MAX_CACHE_TTL};
pub use http::HttpCatalog;
pub use stub::StubCatalog;
pub use types::{CartAck, Collection, Product};

/// Errors that can occur when talking to a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Non-success HTTP status other than 404 and 429.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// First part of the response body.
        body: String,
    },

    /// The catalog is unavailable (stub failure injection).
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// A record was decoded but could not be converted to a domain type.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Source of product and collection records.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Products for the home feed carousel.
    async fn featured_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Candidates for the cart screen's "you may also like" row.
    ///
    /// Defaults to the featured products.
    async fn recommended_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.featured_products().await
    }

    /// Collections for the home feed.
    async fn collections(&self) -> Result<Vec<Collection>, CatalogError>;

    /// A single product.
    ///
    /// Returns [`CatalogError::NotFound`] if no product has this id.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Tell the catalog a product was added to the shopper's cart.
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<CartAck, CatalogError>;
}

#[async_trait]
impl<P: CatalogProvider + ?Sized> CatalogProvider for Arc<P> {
    async fn featured_products(&self) -> Result<Vec<Product>, CatalogError> {
        (**self).featured_products().await
    }

    async fn recommended_products(&self) -> Result<Vec<Product>, CatalogError> {
        (**self).recommended_products().await
    }

    async fn collections(&self) -> Result<Vec<Collection>, CatalogError> {
        (**self).collections().await
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        (**self).product(id).await
    }

    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<CartAck, CatalogError> {
        (**self).add_to_cart(product_id, quantity).await
    }
}
