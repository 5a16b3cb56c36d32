//! Product listing pipeline: fetch the upstream catalog, filter it in memory,
//! and cut one page out of the result.

use std::sync::Arc;

use shared::{
    domain::{Product, ProductId},
    error::{ApiError, ErrorCode},
    protocol::ProductPage,
};
use tracing::{debug, warn};

pub mod dates;
pub mod filter;
pub mod paginate;
pub mod source;

pub use filter::{ProductFilter, ProductListParams};
pub use paginate::{paginate, PageRequest, PageUrls, PaginationDefaults};
pub use source::{
    CatalogSource, HttpCatalogSource, SourceError, StaticCatalogSource, DEFAULT_UPSTREAM_LIMIT,
    DEFAULT_UPSTREAM_URL,
};

#[derive(Clone)]
pub struct ApiContext {
    pub source: Arc<dyn CatalogSource>,
    pub upstream_limit: u32,
    pub pagination: PaginationDefaults,
}

impl ApiContext {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            upstream_limit: DEFAULT_UPSTREAM_LIMIT,
            pagination: PaginationDefaults::default(),
        }
    }
}

pub async fn list_products(
    ctx: &ApiContext,
    params: &ProductListParams,
    urls: &PageUrls,
) -> Result<ProductPage<Product>, ApiError> {
    // Reject bad input before paying for the upstream round trip.
    let filter = ProductFilter::from_params(params)?;
    let request = PageRequest::from_params(params, ctx.pagination)?;

    let products = ctx
        .source
        .fetch_products(ctx.upstream_limit)
        .await
        .map_err(upstream)?;
    let fetched = products.len();
    let matched = filter.apply(products);
    debug!(
        fetched,
        matched = matched.len(),
        page = request.page,
        per_page = request.per_page,
        "filtered catalog"
    );

    Ok(paginate(matched, request, urls))
}

pub async fn get_product(ctx: &ApiContext, id: ProductId) -> Result<Product, ApiError> {
    ctx.source
        .fetch_product(id)
        .await
        .map_err(upstream)?
        .ok_or_else(|| ApiError::not_found(format!("product {} not found", id.0)))
}

fn upstream(err: SourceError) -> ApiError {
    warn!(error = %err, "upstream catalog request failed");
    ApiError::new(ErrorCode::Upstream, err.to_string())
}
