//! In-process catalog backed by mock data.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};
use vitrine_core::{ProductId, Quantity};

use super::fixtures;
use super::types::{CartAck, Collection, Product};
use super::{CatalogError, CatalogProvider};

const ADDED_MESSAGE: &str = "Produto adicionado ao carrinho";

/// Catalog that serves fixed data after an optional delay.
///
/// Tests can make it slow (`with_latency`), broken (`with_failure`) or
/// flaky (`fail_next`), and can inspect what was sent to `add_to_cart`.
#[derive(Debug)]
pub struct StubCatalog {
    featured: Vec<Product>,
    extra: Vec<Product>,
    collections: Vec<Collection>,
    latency: Duration,
    failure: Option<String>,
    pending_failures: AtomicUsize,
    calls: AtomicUsize,
    added: Mutex<Vec<(ProductId, Quantity)>>,
}

impl Default for StubCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StubCatalog {
    /// Stub serving the built-in fixtures with no delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_data(
            fixtures::featured_products(),
            fixtures::extra_products(),
            fixtures::collections(),
        )
    }

    /// Stub serving the given records.
    #[must_use]
    pub const fn with_data(
        featured: Vec<Product>,
        extra: Vec<Product>,
        collections: Vec<Collection>,
    ) -> Self {
        Self {
            featured,
            extra,
            collections,
            latency: Duration::ZERO,
            failure: None,
            pending_failures: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            added: Mutex::new(Vec::new()),
        }
    }

    /// Delay every call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every call with [`CatalogError::Unavailable`].
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Fail the next `count` calls, then recover.
    pub fn fail_next(&self, count: usize) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    /// Number of calls received, including failed ones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every successful `add_to_cart` request, in order.
    #[must_use]
    pub fn added_to_cart(&self) -> Vec<(ProductId, Quantity)> {
        self.added
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn simulate(&self) -> Result<(), CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(message) = &self.failure {
            return Err(CatalogError::Unavailable(message.clone()));
        }

        let armed = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if armed {
            return Err(CatalogError::Unavailable("injected failure".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl CatalogProvider for StubCatalog {
    #[instrument(skip(self))]
    async fn featured_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.simulate().await?;
        Ok(self.featured.clone())
    }

    /// Featured products followed by the extra ones.
    #[instrument(skip(self))]
    async fn recommended_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.simulate().await?;
        Ok(self.featured.iter().chain(&self.extra).cloned().collect())
    }

    #[instrument(skip(self))]
    async fn collections(&self) -> Result<Vec<Collection>, CatalogError> {
        self.simulate().await?;
        Ok(self.collections.clone())
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.simulate().await?;
        self.featured
            .iter()
            .chain(&self.extra)
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {id}")))
    }

    #[instrument(skip_all, fields(product_id = %product_id, quantity = %quantity))]
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<CartAck, CatalogError> {
        self.simulate().await?;
        self.added
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((product_id, quantity));
        debug!("Stub accepted add to cart");
        Ok(CartAck {
            success: true,
            message: ADDED_MESSAGE.to_string(),
        })
    }
}
