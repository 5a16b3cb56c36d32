use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{Product, ProductId},
    protocol::UpstreamListing,
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_UPSTREAM_URL: &str = "https://dummyjson.com";
pub const DEFAULT_UPSTREAM_LIMIT: u32 = 200;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("upstream catalog unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("upstream catalog returned status {0}")]
    Status(u16),
    #[error("upstream catalog payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),
}

/// Where the product list comes from. The server only ever reads from it.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self, limit: u32) -> Result<Vec<Product>, SourceError>;
    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, SourceError>;
}

#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    http: Client,
    base_url: Url,
}

impl HttpCatalogSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let mut base_url = Url::parse(base_url.trim())?;
        // `Url::join` replaces the last segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::Unreachable)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self, limit: u32) -> Result<Vec<Product>, SourceError> {
        let url = self.endpoint("products")?;
        debug!(%url, limit, "fetching upstream catalog");
        let response = self
            .http
            .get(url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(SourceError::Unreachable)?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }
        let body = response.bytes().await.map_err(SourceError::Unreachable)?;
        let listing: UpstreamListing<Product> = serde_json::from_slice(&body)?;
        Ok(listing.products)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, SourceError> {
        let url = self.endpoint(&format!("products/{}", id.0))?;
        debug!(%url, "fetching upstream product");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(SourceError::Unreachable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }
        let body = response.bytes().await.map_err(SourceError::Unreachable)?;
        Ok(Some(serde_json::from_slice(&body)?))
    }
}

/// Fixed in-memory catalog, for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    products: Vec<Product>,
}

impl StaticCatalogSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        let listing: UpstreamListing<Product> = serde_json::from_str(raw)?;
        Ok(Self::new(listing.products))
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_products(&self, limit: u32) -> Result<Vec<Product>, SourceError> {
        Ok(self
            .products
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, SourceError> {
        Ok(self.products.iter().find(|product| product.id == id).cloned())
    }
}
