//! Read-through cache in front of a catalog provider.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, instrument};
use vitrine_core::{ProductId, Quantity};

use super::types::{CartAck, Collection, Product};
use super::{CatalogError, CatalogProvider};

/// Default time to live for cached catalog records.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Longest time to live a cache accepts; longer values are clamped.
pub const MAX_TTL: Duration = Duration::from_secs(86_400);

const MAX_ENTRIES: u64 = 1000;

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    FeaturedProducts,
    RecommendedProducts,
    Collections,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Collections(Vec<Collection>),
    Product(Box<Product>),
}

/// Catalog wrapper that caches reads.
///
/// Only successful responses are cached. `add_to_cart` always reaches the
/// wrapped provider.
pub struct CachedCatalog<P> {
    inner: P,
    cache: Cache<CacheKey, CacheValue>,
}

impl<P: CatalogProvider> CachedCatalog<P> {
    /// Wrap `inner`, keeping records for `ttl` (at most [`MAX_TTL`]).
    #[must_use]
    pub fn new(inner: P, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl.min(MAX_TTL))
            .build();
        Self { inner, cache }
    }

    /// The wrapped provider.
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Drop a cached product.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.cache.invalidate(&CacheKey::Product(id)).await;
    }

    /// Drop everything.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl<P: CatalogProvider> CatalogProvider for CachedCatalog<P> {
    #[instrument(skip(self))]
    async fn featured_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.cache.get(&CacheKey::FeaturedProducts).await
        {
            debug!("Cache hit for featured products");
            return Ok(products);
        }

        let products = self.inner.featured_products().await?;
        self.cache
            .insert(
                CacheKey::FeaturedProducts,
                CacheValue::Products(products.clone()),
            )
            .await;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn recommended_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.cache.get(&CacheKey::RecommendedProducts).await
        {
            debug!("Cache hit for recommended products");
            return Ok(products);
        }

        let products = self.inner.recommended_products().await?;
        self.cache
            .insert(
                CacheKey::RecommendedProducts,
                CacheValue::Products(products.clone()),
            )
            .await;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn collections(&self) -> Result<Vec<Collection>, CatalogError> {
        if let Some(CacheValue::Collections(collections)) =
            self.cache.get(&CacheKey::Collections).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let collections = self.inner.collections().await?;
        self.cache
            .insert(
                CacheKey::Collections,
                CacheValue::Collections(collections.clone()),
            )
            .await;
        Ok(collections)
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product = self.inner.product(id).await?;
        self.cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    // Not cached: mutates remote state.
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<CartAck, CatalogError> {
        self.inner.add_to_cart(product_id, quantity).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::StubCatalog;

    fn cached() -> (Arc<StubCatalog>, CachedCatalog<Arc<StubCatalog>>) {
        let stub = Arc::new(StubCatalog::new());
        let catalog = CachedCatalog::new(Arc::clone(&stub), DEFAULT_TTL);
        (stub, catalog)
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let (stub, catalog) = cached();
        let first = catalog.featured_products().await.unwrap();
        let second = catalog.featured_products().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(stub.calls(), 1);

        catalog.collections().await.unwrap();
        catalog.collections().await.unwrap();
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_products_are_keyed_by_id() {
        let (stub, catalog) = cached();
        let jaqueta = catalog.product(ProductId::new(1)).await.unwrap();
        let bolsa = catalog.product(ProductId::new(7)).await.unwrap();
        assert_ne!(jaqueta.id, bolsa.id);
        catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(stub.calls(), 2);

        catalog.invalidate_product(ProductId::new(1)).await;
        catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(stub.calls(), 3);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let (stub, catalog) = cached();
        stub.fail_next(1);
        assert!(catalog.featured_products().await.is_err());
        assert!(catalog.featured_products().await.is_ok());
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_add_to_cart_bypasses_cache() {
        let (stub, catalog) = cached();
        catalog.add_to_cart(ProductId::new(2), Quantity::ONE).await.unwrap();
        catalog.add_to_cart(ProductId::new(2), Quantity::ONE).await.unwrap();
        assert_eq!(stub.added_to_cart().len(), 2);
    }

    #[tokio::test]
    async fn test_recommended_and_featured_are_cached_apart() {
        let (stub, catalog) = cached();
        let featured = catalog.featured_products().await.unwrap();
        let recommended = catalog.recommended_products().await.unwrap();
        assert_eq!(featured.len(), 6);
        assert_eq!(recommended.len(), 7);
        catalog.recommended_products().await.unwrap();
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_oversized_ttl_is_clamped() {
        let stub = StubCatalog::new();
        let catalog = CachedCatalog::new(stub, Duration::from_secs(99_999_999_999));
        catalog.collections().await.unwrap();
        catalog.collections().await.unwrap();
        assert_eq!(catalog.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let (stub, catalog) = cached();
        catalog.collections().await.unwrap();
        catalog.invalidate_all().await;
        catalog.collections().await.unwrap();
        assert_eq!(stub.calls(), 2);
        assert_eq!(catalog.inner().calls(), 2);
    }
}
