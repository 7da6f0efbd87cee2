//! Catalog API client over HTTP.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Method | Path                 | Response                |
//! |--------|----------------------|-------------------------|
//! | GET    | `products/featured`  | `[ProductRecord]`       |
//! | GET    | `collections`        | `[CollectionRecord]`    |
//! | GET    | `products/{id}`      | `ProductRecord`         |
//! | POST   | `cart/add`           | `CartAckRecord`         |

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use vitrine_core::{CurrencyCode, ProductId, Quantity};

use super::conversions::{
    AddToCartRequest, CartAckRecord, CollectionRecord, ProductRecord, convert_cart_ack,
    convert_collection, convert_product, convert_products,
};
use super::types::{CartAck, Collection, Product};
use super::{CatalogError, CatalogProvider};
use crate::config::ApiConfig;

/// Longest slice of a response body kept in logs and errors.
const BODY_PREVIEW_CHARS: usize = 500;

/// Client for the catalog JSON API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    api: ApiConfig,
    currency: CurrencyCode,
}

impl HttpCatalog {
    /// Create a client for the API described by `api`.
    ///
    /// Prices in responses are read in `currency`.
    #[must_use]
    pub fn new(api: ApiConfig, currency: CurrencyCode) -> Self {
        Self {
            inner: Arc::new(HttpCatalogInner {
                client: reqwest::Client::new(),
                api,
                currency,
            }),
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn api(&self) -> &ApiConfig {
        &self.inner.api
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.inner.api.endpoint(path)?;
        let request = self
            .inner
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json");
        self.send(request, path).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let url = self.inner.api.endpoint(path)?;
        let request = self.inner.client.post(url).json(body);
        self.send(request, path).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, CatalogError> {
        let mut request = request;
        if let Some(authorization) = self.inner.api.authorization() {
            request = request.header(AUTHORIZATION, authorization);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;
        let preview: String = response_text.chars().take(BODY_PREVIEW_CHARS).collect();

        if !status.is_success() {
            error!(status = %status, body = %preview, "Catalog API returned non-success status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, body = %preview, "Failed to parse catalog response");
            CatalogError::Parse(e)
        })
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    #[instrument(skip(self))]
    async fn featured_products(&self) -> Result<Vec<Product>, CatalogError> {
        let records: Vec<ProductRecord> = self.get_json("products/featured").await?;
        debug!(count = records.len(), "Fetched featured products");
        Ok(convert_products(records, self.inner.currency))
    }

    #[instrument(skip(self))]
    async fn collections(&self) -> Result<Vec<Collection>, CatalogError> {
        let records: Vec<CollectionRecord> = self.get_json("collections").await?;
        Ok(records.into_iter().map(convert_collection).collect())
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let record: ProductRecord = self.get_json(&format!("products/{id}")).await?;
        convert_product(record, self.inner.currency)
    }

    #[instrument(skip_all, fields(product_id = %product_id, quantity = %quantity))]
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<CartAck, CatalogError> {
        let body = AddToCartRequest {
            product_id: product_id.as_i32(),
            quantity: quantity.get(),
        };
        let record: CartAckRecord = self.post_json("cart/add", &body).await?;
        Ok(convert_cart_ack(record))
    }
}
