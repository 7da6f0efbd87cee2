//! Application state shared across screens.

use std::sync::Arc;

use tracing::info;
use vitrine_core::ShippingPolicy;

use crate::catalog::{CachedCatalog, CatalogProvider, HttpCatalog, StubCatalog};
use crate::config::{CatalogBackend, StorefrontConfig};

/// Application state shared across all screens.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogProvider>,
}

impl AppState {
    /// Build the state, choosing the catalog backend from `config`.
    ///
    /// Both backends are wrapped in a [`CachedCatalog`].
    #[must_use]
    pub fn from_config(config: StorefrontConfig) -> Self {
        let catalog: Arc<dyn CatalogProvider> = match config.catalog {
            CatalogBackend::Stub => {
                info!(latency_ms = config.stub_latency.as_millis(), "Using stub catalog");
                Arc::new(CachedCatalog::new(
                    StubCatalog::new().with_latency(config.stub_latency),
                    config.cache_ttl,
                ))
            }
            CatalogBackend::Http => {
                info!(base_url = %config.api.base_url, "Using HTTP catalog");
                Arc::new(CachedCatalog::new(
                    HttpCatalog::new(config.api.clone(), config.currency),
                    config.cache_ttl,
                ))
            }
        };
        Self::with_catalog(config, catalog)
    }

    /// Build the state around an existing catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.inner.catalog.as_ref()
    }

    /// Get the shipping policy.
    #[must_use]
    pub fn shipping(&self) -> &ShippingPolicy {
        &self.inner.config.shipping
    }
}
