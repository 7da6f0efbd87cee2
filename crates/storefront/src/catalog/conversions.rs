//! Wire records for the catalog API and their conversion to domain types.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;
use vitrine_core::{CollectionId, CurrencyCode, Price, ProductId};

use super::CatalogError;
use super::types::{CartAck, Collection, Product};

/// Price as the API sends it: a number, a plain decimal string, or a
/// preformatted string such as `"R$ 4.990,00"`.
///
/// Plain decimal strings use `.` as the decimal point whatever the
/// currency. In currencies that group thousands with `.`, a bare string
/// like `"4.990"` could mean either 4.99 or 4990 and is rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WirePrice {
    Units(i64),
    Fractional(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub price: WirePrice,
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRecord {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartAckRecord {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i32,
    pub quantity: u32,
}

pub fn convert_price(price: WirePrice, currency: CurrencyCode) -> Result<Price, CatalogError> {
    match price {
        WirePrice::Units(units) => Ok(Price::from_units(units, currency)),
        WirePrice::Fractional(value) => Decimal::from_f64(value)
            .map(|amount| Price::new(amount, currency))
            .ok_or_else(|| CatalogError::InvalidRecord(format!("price {value} is not finite"))),
        WirePrice::Text(text) if looks_grouped(&text, currency) => Err(
            CatalogError::InvalidRecord(format!("price '{text}' is ambiguous in {currency}")),
        ),
        WirePrice::Text(text) => Decimal::from_str(text.trim()).map_or_else(
            |_| {
                Price::parse_display(&text, currency)
                    .map_err(|e| CatalogError::InvalidRecord(format!("price '{text}': {e}")))
            },
            |amount| Ok(Price::new(amount, currency)),
        ),
    }
}

/// `true` for a bare `d.ddd`, `dd.ddd` or `ddd.ddd` when `currency` groups
/// thousands with `.`.
fn looks_grouped(text: &str, currency: CurrencyCode) -> bool {
    if currency.thousands_separator() != '.' {
        return false;
    }
    let unsigned = text.trim().trim_start_matches('-');
    let Some((whole, fraction)) = unsigned.split_once('.') else {
        return false;
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    (1..=3).contains(&whole.len())
        && !whole.starts_with('0')
        && all_digits(whole)
        && fraction.len() == 3
        && all_digits(fraction)
}

pub fn convert_product(record: ProductRecord, currency: CurrencyCode) -> Result<Product, CatalogError> {
    let price = convert_price(record.price, currency)?;
    if price.is_negative() {
        return Err(CatalogError::InvalidRecord(format!(
            "product {} has a negative price",
            record.id
        )));
    }
    Ok(Product {
        id: ProductId::new(record.id),
        name: record.name,
        brand: record.brand,
        price,
        image_url: record.image,
    })
}

/// Convert a product list, skipping records that cannot be converted.
///
/// One bad record should not empty the home feed.
pub fn convert_products(records: Vec<ProductRecord>, currency: CurrencyCode) -> Vec<Product> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id;
            convert_product(record, currency)
                .inspect_err(|e| warn!(product_id = id, error = %e, "Skipping catalog record"))
                .ok()
        })
        .collect()
}

pub fn convert_collection(record: CollectionRecord) -> Collection {
    Collection {
        id: CollectionId::new(record.id),
        name: record.name,
        description: record.description,
        image_url: record.image,
    }
}

pub fn convert_cart_ack(record: CartAckRecord) -> CartAck {
    let message = record.message.unwrap_or_else(|| {
        if record.success {
            "Produto adicionado ao carrinho".to_string()
        } else {
            "Erro ao adicionar ao carrinho".to_string()
        }
    });
    CartAck {
        success: record.success,
        message,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(price: serde_json::Value) -> ProductRecord {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Jaqueta Oversized",
            "brand": "Balenciaga",
            "price": price,
            "image": "https://placehold.co/600x800/111/fff?text=Jaqueta",
        }))
        .unwrap()
    }

    #[test]
    fn test_price_forms() {
        for price in [json!(4990), json!(4990.0), json!("4990.00"), json!("R$ 4.990,00")] {
            let product = convert_product(record(price.clone()), CurrencyCode::BRL).unwrap();
            assert_eq!(product.price.amount, Decimal::from(4990), "price {price}");
        }
    }

    #[test]
    fn test_bare_dot_grouping_is_ambiguous_in_brl() {
        for price in ["4.990", "12.500", "-999.000"] {
            assert!(
                matches!(
                    convert_price(WirePrice::Text(price.to_string()), CurrencyCode::BRL),
                    Err(CatalogError::InvalidRecord(_))
                ),
                "{price} should be rejected"
            );
        }
        assert!(convert_product(record(json!("4.990")), CurrencyCode::EUR).is_err());

        // Unambiguous forms still parse.
        for (price, expected) in [
            ("4.99", Decimal::new(499, 2)),
            ("0.125", Decimal::new(125, 3)),
            ("4990.000", Decimal::from(4990)),
            ("R$ 4.990", Decimal::from(4990)),
        ] {
            let parsed =
                convert_price(WirePrice::Text(price.to_string()), CurrencyCode::BRL).unwrap();
            assert_eq!(parsed.amount, expected, "{price}");
        }
    }

    #[test]
    fn test_dot_decimal_is_plain_in_usd() {
        let price = convert_price(WirePrice::Text("4.990".to_string()), CurrencyCode::USD).unwrap();
        assert_eq!(price.amount, Decimal::new(499, 2));
    }

    #[test]
    fn test_fractional_price() {
        let product = convert_product(record(json!(19.9)), CurrencyCode::BRL).unwrap();
        assert_eq!(product.price.rounded().amount, Decimal::new(1990, 2));
    }

    #[test]
    fn test_rejects_bad_prices() {
        assert!(matches!(
            convert_product(record(json!("preço sob consulta")), CurrencyCode::BRL),
            Err(CatalogError::InvalidRecord(_))
        ));
        assert!(matches!(
            convert_product(record(json!(-10)), CurrencyCode::BRL),
            Err(CatalogError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_convert_products_skips_bad_records() {
        let products = convert_products(
            vec![record(json!(100)), record(json!("grátis?"))],
            CurrencyCode::BRL,
        );
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_collection_description_defaults() {
        let record: CollectionRecord = serde_json::from_value(json!({
            "id": 2,
            "name": "Streetwear de Luxo",
            "image": "https://placehold.co/800x400/111/fff?text=Streetwear",
        }))
        .unwrap();
        let collection = convert_collection(record);
        assert_eq!(collection.id, CollectionId::new(2));
        assert!(collection.description.is_empty());
    }

    #[test]
    fn test_cart_ack_default_messages() {
        let ok = convert_cart_ack(serde_json::from_value(json!({"success": true})).unwrap());
        assert_eq!(ok.message, "Produto adicionado ao carrinho");
        let rejected = convert_cart_ack(CartAckRecord {
            success: false,
            message: Some("Sem estoque".to_string()),
        });
        assert!(!rejected.success);
        assert_eq!(rejected.message, "Sem estoque");
    }

    #[test]
    fn test_add_to_cart_request_is_camel_case() {
        let body = serde_json::to_value(AddToCartRequest {
            product_id: 3,
            quantity: 2,
        })
        .unwrap();
        assert_eq!(body, json!({"productId": 3, "quantity": 2}));
    }
}
