//! Mock catalog data served by [`StubCatalog`](super::StubCatalog).
//!
//! Prices are in BRL.

use vitrine_core::{CollectionId, CurrencyCode, Price, ProductId};

use super::types::{Collection, Product};

const PLACEHOLD: &str = "https://placehold.co";

fn product(id: i32, name: &str, brand: &str, reais: i64, label: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: brand.to_string(),
        price: Price::from_units(reais, CurrencyCode::BRL),
        image_url: format!("{PLACEHOLD}/600x800/111/fff?text={label}"),
    }
}

fn collection(id: i32, name: &str, description: &str, label: &str) -> Collection {
    Collection {
        id: CollectionId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        image_url: format!("{PLACEHOLD}/800x400/111/fff?text={label}"),
    }
}

/// Home feed carousel.
#[must_use]
pub fn featured_products() -> Vec<Product> {
    vec![
        product(1, "Jaqueta Oversized", "Balenciaga", 4990, "Jaqueta"),
        product(2, "Calça Wide Leg", "Prada", 3590, "Calça"),
        product(3, "Vestido Slip", "Saint Laurent", 5790, "Vestido"),
        product(4, "Blazer Estruturado", "Gucci", 7290, "Blazer"),
        product(5, "Camiseta Estampada", "Off-White", 1990, "Camiseta"),
        product(6, "Tênis Chunky", "Balenciaga", 6490, "Tênis"),
    ]
}

/// Products that only show up as cart recommendations.
#[must_use]
pub fn extra_products() -> Vec<Product> {
    vec![product(7, "Bolsa Estruturada", "Prada", 8990, "Bolsa")]
}

/// Home feed collections.
#[must_use]
pub fn collections() -> Vec<Collection> {
    vec![
        collection(
            1,
            "Minimalismo Europeu",
            "Peças essenciais com design atemporal",
            "Minimalismo",
        ),
        collection(
            2,
            "Streetwear de Luxo",
            "A fusão perfeita entre casual e sofisticado",
            "Streetwear",
        ),
        collection(
            3,
            "Alfaiataria Japonesa",
            "Cortes precisos e tecidos premium",
            "Alfaiataria",
        ),
        collection(
            4,
            "Vintage Selecionado",
            "Peças raras de décadas passadas",
            "Vintage",
        ),
    ]
}

/// Products in the cart when the cart screen first opens, with their sizes.
#[must_use]
pub fn initial_cart() -> Vec<(Product, &'static str)> {
    let featured = featured_products();
    [(1, "M"), (2, "P"), (6, "40")]
        .into_iter()
        .filter_map(|(id, size)| {
            featured
                .iter()
                .find(|p| p.id == ProductId::new(id))
                .map(|p| (p.clone(), size))
        })
        .collect()
}
