//! Catalog listing commands.

use vitrine_storefront::AppState;
use vitrine_storefront::catalog::CatalogProvider;

/// Print the featured products.
///
/// # Errors
///
/// Returns an error if the featured products cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn featured(state: &AppState) -> vitrine_storefront::Result<()> {
    for row in featured_rows(state.catalog()).await? {
        println!("{row}");
    }
    Ok(())
}

/// One aligned row per featured product. Collections are not fetched.
async fn featured_rows(catalog: &dyn CatalogProvider) -> vitrine_storefront::Result<Vec<String>> {
    let rows = catalog
        .featured_products()
        .await?
        .iter()
        .map(|product| {
            format!(
                "{:>3}  {:<22} {:<15} {:>14}",
                product.id,
                product.name,
                product.brand,
                product.price.display()
            )
        })
        .collect();
    Ok(rows)
}

/// Print the collections.
///
/// # Errors
///
/// Returns an error if the catalog cannot be reached.
#[allow(clippy::print_stdout)]
pub async fn collections(state: &AppState) -> vitrine_storefront::Result<()> {
    for collection in state.catalog().collections().await? {
        println!(
            "{:>3}  {:<22} {}",
            collection.id, collection.name, collection.description
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use vitrine_core::{ProductId, Quantity};
    use vitrine_storefront::catalog::{CartAck, CatalogError, Collection, Product, StubCatalog};

    use super::*;

    /// Serves products but its collections endpoint is down.
    struct CollectionsDown(StubCatalog);

    #[async_trait]
    impl CatalogProvider for CollectionsDown {
        async fn featured_products(&self) -> Result<Vec<Product>, CatalogError> {
            self.0.featured_products().await
        }

        async fn collections(&self) -> Result<Vec<Collection>, CatalogError> {
            Err(CatalogError::Unavailable("collections down".to_string()))
        }

        async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
            self.0.product(id).await
        }

        async fn add_to_cart(
            &self,
            product_id: ProductId,
            quantity: Quantity,
        ) -> Result<CartAck, CatalogError> {
            self.0.add_to_cart(product_id, quantity).await
        }
    }

    #[tokio::test]
    async fn test_featured_ignores_collections_outage() {
        let catalog = CollectionsDown(StubCatalog::new());
        let rows = featured_rows(&catalog).await.unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows[0].contains("Jaqueta Oversized"));
        assert!(rows[0].contains("R$ 4.990,00"));
        assert!(catalog.collections().await.is_err());
    }
}
