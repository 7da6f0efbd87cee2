//! Home feed.

use serde::Serialize;
use tracing::{error, instrument};

use crate::catalog::{CatalogError, CatalogProvider, Collection, Product};

/// Featured products carousel and collections list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeFeed {
    pub featured: Vec<Product>,
    pub collections: Vec<Collection>,
}

impl HomeFeed {
    /// Fetch the feed, surfacing catalog errors.
    ///
    /// Both requests run concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first error from either request.
    #[instrument(skip_all)]
    pub async fn try_load(catalog: &dyn CatalogProvider) -> Result<Self, CatalogError> {
        let (featured, collections) =
            tokio::try_join!(catalog.featured_products(), catalog.collections())?;
        Ok(Self {
            featured,
            collections,
        })
    }

    /// Fetch the feed, falling back to an empty one if the catalog fails.
    pub async fn load(catalog: &dyn CatalogProvider) -> Self {
        Self::try_load(catalog).await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to load home feed");
            Self::default()
        })
    }

    /// Returns `true` if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.collections.is_empty()
    }
}
