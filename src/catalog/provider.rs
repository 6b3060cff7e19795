//! Catalog providers
//!
//! The storefront never owns product data; it asks a [`CatalogProvider`]
//! for it. [`HttpCatalogProvider`] talks to the remote product API,
//! [`StaticCatalog`] serves a fixed list (tests, offline demos).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{
    models::{Product, ProductId},
    selectors::categories_of,
};
use crate::error::CatalogError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Source of catalog data. No retries are attempted by callers.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_all_products(&self) -> CatalogResult<Vec<Product>>;

    async fn fetch_categories(&self) -> CatalogResult<Vec<String>>;

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product>;

    async fn fetch_by_category(&self, category: &str) -> CatalogResult<Vec<Product>>;
}

/// Client for a FakeStore-compatible product API.
#[derive(Debug, Clone)]
pub struct HttpCatalogProvider {
    client: Client,
    base_url: String,
}

impl HttpCatalogProvider {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> CatalogResult<Option<T>> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        tracing::debug!(%url, "Catalog request");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.bytes().await?;

        // The API answers unknown ids with an empty 200 body.
        let trimmed = body.trim_ascii();
        if trimmed.is_empty() || trimmed == b"null" {
            return Ok(None);
        }

        serde_json::from_slice(trimmed)
            .map(Some)
            .map_err(|e| CatalogError::InvalidResponse(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn fetch_all_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.get("products").await?.unwrap_or_default())
    }

    async fn fetch_categories(&self) -> CatalogResult<Vec<String>> {
        Ok(self.get("products/categories").await?.unwrap_or_default())
    }

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        self.get(&format!("products/{}", id))
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    async fn fetch_by_category(&self, category: &str) -> CatalogResult<Vec<Product>> {
        Ok(self
            .get(&format!("products/category/{}", category))
            .await?
            .unwrap_or_default())
    }
}

/// In-memory provider over a fixed product list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn fetch_all_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn fetch_categories(&self) -> CatalogResult<Vec<String>> {
        Ok(categories_of(&self.products))
    }

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(id))
    }

    async fn fetch_by_category(&self, category: &str) -> CatalogResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }
}
