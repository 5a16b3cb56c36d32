use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Product, ProductId, ProductSummary},
    error::ApiError,
    protocol::ProductPage,
};

use crate::filters::FilterState;

/// HTTP client for the catalog server's `/api/products` endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    server_url: String,
}

impl CatalogClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), server_url)
    }

    pub fn with_http(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub async fn list_products(
        &self,
        filters: &FilterState,
        page: u64,
        per_page: u64,
    ) -> Result<ProductPage<ProductSummary>> {
        let response = self
            .http
            .get(format!("{}/api/products", self.server_url))
            .query(&filters.query_pairs(page, per_page))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.server_url))?;
        decode(response).await
    }

    pub async fn product(&self, id: ProductId) -> Result<Product> {
        let response = self
            .http
            .get(format!("{}/api/products/{}", self.server_url, id.0))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.server_url))?;
        decode(response).await
    }
}

/// Decodes a success body, or surfaces the server's `ApiError` so callers can
/// `downcast_ref::<ApiError>()` on failures.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .context("server returned an unexpected payload");
    }

    let body = response.bytes().await.unwrap_or_default();
    match serde_json::from_slice::<ApiError>(&body) {
        Ok(api_error) => {
            Err(anyhow::Error::new(api_error).context(format!("server returned {status}")))
        }
        Err(_) => Err(anyhow!("server returned {status}")),
    }
}
