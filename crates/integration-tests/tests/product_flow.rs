//! Integration tests for the product page to cart flow.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use vitrine_core::{Cart, CurrencyCode, ProductId, Quantity, ShippingPolicy, Size};
use vitrine_storefront::AppError;
use vitrine_storefront::catalog::{
    CartAck, CatalogError, CatalogProvider, Collection, Product, StubCatalog,
};
use vitrine_storefront::screens::{
    AddToCartError, CartView, ProductDetail, recommendations, seed_cart,
};

// =============================================================================
// Helpers
// =============================================================================

/// Catalog that serves the stub's products but refuses every add to cart.
struct SoldOutCatalog(StubCatalog);

#[async_trait]
impl CatalogProvider for SoldOutCatalog {
    async fn featured_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.0.featured_products().await
    }

    async fn collections(&self) -> Result<Vec<Collection>, CatalogError> {
        self.0.collections().await
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.0.product(id).await
    }

    async fn add_to_cart(
        &self,
        _product_id: ProductId,
        _quantity: Quantity,
    ) -> Result<CartAck, CatalogError> {
        Ok(CartAck {
            success: false,
            message: "Produto esgotado".to_string(),
        })
    }
}

async fn detail_for(catalog: &dyn CatalogProvider, id: i32) -> ProductDetail {
    ProductDetail::new(catalog.product(ProductId::new(id)).await.unwrap())
}

// =============================================================================
// Add To Cart
// =============================================================================

#[tokio::test]
async fn test_add_to_seeded_cart_updates_view() {
    let catalog = StubCatalog::new();
    let mut cart = seed_cart(CurrencyCode::BRL).unwrap();

    let mut detail = detail_for(&catalog, 5).await;
    detail.select_size(Size::parse("GG").unwrap());
    detail.increment_quantity();
    let ack = detail.add_to_cart(&catalog, &mut cart).await.unwrap();
    assert_eq!(ack.message, "Produto adicionado ao carrinho");

    let view = CartView::build(&cart, &ShippingPolicy::default());
    assert_eq!(view.items.len(), 4);
    let camiseta = &view.items[3];
    assert_eq!(camiseta.id.as_i32(), 4);
    assert_eq!(camiseta.size, "GG");
    assert_eq!(camiseta.quantity, 2);
    assert_eq!(camiseta.line_price, "R$ 3.980,00");
    assert_eq!(view.item_count, 5);
    assert_eq!(view.subtotal, "R$ 19.050,00");
    assert_eq!(view.shipping, "Grátis");
}

#[tokio::test]
async fn test_adding_an_existing_line_merges() {
    let catalog = StubCatalog::new();
    let mut cart = seed_cart(CurrencyCode::BRL).unwrap();

    let mut detail = detail_for(&catalog, 1).await;
    detail.select_size(Size::parse("M").unwrap());
    detail.add_to_cart(&catalog, &mut cart).await.unwrap();

    assert_eq!(cart.len(), 3);
    assert_eq!(cart.lines()[0].quantity().get(), 2);
}

#[tokio::test]
async fn test_size_is_required() {
    let catalog = StubCatalog::new();
    let mut cart = Cart::default();
    let detail = detail_for(&catalog, 2).await;
    let calls_before = catalog.calls();

    let err = detail.add_to_cart(&catalog, &mut cart).await.unwrap_err();
    assert!(matches!(err, AddToCartError::SizeNotSelected));
    assert_eq!(catalog.calls(), calls_before);
    assert!(catalog.added_to_cart().is_empty());
}

#[tokio::test]
async fn test_rejected_item_is_not_added() {
    let catalog = SoldOutCatalog(StubCatalog::new());
    let mut cart = seed_cart(CurrencyCode::BRL).unwrap();
    let before = cart.clone();

    let mut detail = detail_for(&catalog, 4).await;
    detail.select_size(Size::parse("P").unwrap());
    let err = detail.add_to_cart(&catalog, &mut cart).await.unwrap_err();

    assert!(matches!(&err, AddToCartError::Rejected(message) if message == "Produto esgotado"));
    assert_eq!(AppError::from(err).to_string(), "Produto esgotado");
    assert_eq!(cart, before);
}

// =============================================================================
// Recommendations
// =============================================================================

#[tokio::test]
async fn test_recommendations_track_cart_contents() {
    let catalog = StubCatalog::new();
    let mut cart = seed_cart(CurrencyCode::BRL).unwrap();
    let names = |products: Vec<Product>| -> Vec<String> {
        products.into_iter().map(|p| p.name).collect()
    };

    let before = names(recommendations(&catalog, &cart).await.unwrap());
    assert_eq!(
        before,
        [
            "Vestido Slip",
            "Blazer Estruturado",
            "Camiseta Estampada",
            "Bolsa Estruturada",
        ]
    );

    let mut detail = detail_for(&catalog, 3).await;
    detail.select_size(Size::parse("P").unwrap());
    detail.add_to_cart(&catalog, &mut cart).await.unwrap();

    let after = names(recommendations(&catalog, &cart).await.unwrap());
    assert!(!after.contains(&"Vestido Slip".to_string()));
    assert_eq!(after.len(), 3);
}

#[tokio::test]
async fn test_recommendations_surface_catalog_errors() {
    let catalog = StubCatalog::new().with_failure("offline");
    let cart = Cart::default();
    assert!(matches!(
        recommendations(&catalog, &cart).await,
        Err(CatalogError::Unavailable(_))
    ));
}
