use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::PathRejection, Path, Query, RawQuery, State},
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use catalog::{
    get_product, list_products, ApiContext, HttpCatalogSource, PageUrls, ProductListParams,
};
use shared::{
    domain::{Product, ProductId},
    error::{ApiError, ErrorCode},
    protocol::ProductPage,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let source = HttpCatalogSource::new(&settings.upstream_url, settings.upstream_timeout())
        .map_err(|error| {
            error!(upstream_url = %settings.upstream_url, %error, "invalid upstream catalog url");
            error
        })?;
    let api = ApiContext {
        source: Arc::new(source),
        upstream_limit: settings.upstream_limit,
        pagination: settings.pagination(),
    };
    let state = AppState {
        api,
        products_path: settings.products_path(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, upstream = %settings.upstream_url, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/products", get(http_list_products))
        .route("/api/products/:product_id", get(http_get_product))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_products(
    State(state): State<Arc<AppState>>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<ProductListParams>,
) -> ApiResult<ProductPage<Product>> {
    let urls = PageUrls::new(state.products_path.as_str(), raw_query.as_deref());
    let page = list_products(&state.api, &params, &urls)
        .await
        .map_err(reject)?;
    Ok(Json(page))
}

async fn http_get_product(
    State(state): State<Arc<AppState>>,
    product_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Product> {
    let Path(product_id) = product_id
        .map_err(|rejection| reject(ApiError::validation(rejection.body_text())))?;
    let product = get_product(&state.api, ProductId(product_id))
        .await
        .map_err(reject)?;
    Ok(Json(product))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
    }
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
