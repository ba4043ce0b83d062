//! Typed client for the backend REST API.

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::transport::{HttpTransport, Transport};
use fret_core::{
    AffiliateStore, BrandRef, CategoryRef, ComparisonPayload, Product, ProductId, StoreRef,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Typed methods over the consumed backend endpoints.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client over an existing transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client over HTTP from configuration.
    pub fn over_http(config: &ApiConfig) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    fn decode<T: DeserializeOwned>(value: Value) -> Result<T, FetchError> {
        serde_json::from_value(value).map_err(|e| FetchError::Deserialization(e.to_string()))
    }

    /// Look up a product by slug. `GET /products?slugs=<slug>`; the backend
    /// answers with a list, first match wins.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Product, FetchError> {
        debug!(slug, "looking up product by slug");
        let value = self
            .transport
            .get("/products", &[("slugs", slug.to_string())])
            .await?;
        let products: Vec<Product> = Self::decode(value)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::SlugNotFound(slug.to_string()))
    }

    /// Full-text product search. `GET /products?query=<text>`.
    pub async fn search_products(&self, text: &str) -> Result<Vec<Product>, FetchError> {
        debug!(query = text, "searching products");
        let value = self
            .transport
            .get("/products", &[("query", text.to_string())])
            .await?;
        Self::decode(value)
    }

    /// Full product record by id. `GET /products/<id>`.
    pub async fn product_by_id(&self, id: ProductId) -> Result<Product, FetchError> {
        debug!(product = %id, "fetching product");
        let value = self
            .transport
            .get(&format!("/products/{id}"), &[])
            .await?;
        Self::decode(value)
    }

    /// Merged comparison payload. `POST /compare` with the ids to compare.
    pub async fn compare(&self, ids: &[ProductId]) -> Result<ComparisonPayload, FetchError> {
        debug!(?ids, "fetching comparison payload");
        let body = json!(ids.iter().map(|id| id.value()).collect::<Vec<_>>());
        let value = self.transport.post("/compare", &body).await?;
        Self::decode(value)
    }

    /// Affiliate-store list for one product.
    /// `GET /products/<id>/affiliate-stores`.
    pub async fn affiliate_stores(&self, id: ProductId) -> Result<Vec<AffiliateStore>, FetchError> {
        debug!(product = %id, "fetching affiliate stores");
        let value = self
            .transport
            .get(&format!("/products/{id}/affiliate-stores"), &[])
            .await?;
        Self::decode(value)
    }

    /// Affiliate-store list for one product, submitting already-known store
    /// links for the backend to merge and prioritize.
    /// `POST /products/<id>/affiliate-stores`.
    pub async fn affiliate_stores_with_known(
        &self,
        id: ProductId,
        known: &[AffiliateStore],
    ) -> Result<Vec<AffiliateStore>, FetchError> {
        debug!(product = %id, known = known.len(), "merging known affiliate stores");
        let body = serde_json::to_value(known)
            .map_err(|e| FetchError::Deserialization(e.to_string()))?;
        let value = self
            .transport
            .post(&format!("/products/{id}/affiliate-stores"), &body)
            .await?;
        Self::decode(value)
    }

    /// Category reference data. `GET /categories`.
    pub async fn categories(&self) -> Result<Vec<CategoryRef>, FetchError> {
        let value = self.transport.get("/categories", &[]).await?;
        Self::decode(value)
    }

    /// Brand reference data. `GET /brands`.
    pub async fn brands(&self) -> Result<Vec<BrandRef>, FetchError> {
        let value = self.transport.get("/brands", &[]).await?;
        Self::decode(value)
    }

    /// Store directory. `GET /affiliate-stores`.
    pub async fn store_directory(&self) -> Result<Vec<StoreRef>, FetchError> {
        let value = self.transport.get("/affiliate-stores", &[]).await?;
        Self::decode(value)
    }
}
