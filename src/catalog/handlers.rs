//! REST API handlers for browsing the catalog

use axum::{
    extract::{Path, Query as QueryParams, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    models::{CatalogStatus, PriceRange, Product, ProductId},
    query::{apply, Query, SortBy, SortOrder},
    selectors::{featured_products, price_range},
};
use crate::{error::ApiResult, state::SharedState};

/// Creates routes for catalog browsing
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/featured", get(list_featured))
        .route("/products/price-range", get(get_price_range))
        .route("/products/:id", get(get_product))
        .route("/products/category/:name", get(list_by_category))
        .route("/categories", get(list_categories))
        .route("/catalog/status", get(get_status))
        .route("/catalog/refresh", post(refresh))
}

/// Query-string form of a catalog query; everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<Decimal>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ProductListParams {
    pub fn into_query(self, default_page_size: usize) -> Query {
        Query {
            search_query: self.search.unwrap_or_default(),
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            sort_by: self.sort_by,
            sort_order: self.sort_order.unwrap_or_default(),
            page: self.page.unwrap_or(1),
            page_size: self.page_size.filter(|s| *s > 0).unwrap_or(default_page_size),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Endpoint: GET /products
async fn list_products(
    State(state): State<SharedState>,
    QueryParams(params): QueryParams<ProductListParams>,
) -> Json<ProductPage> {
    let query = params.into_query(state.config.default_page_size);
    let catalog = state.catalog().await;
    let view = apply(&catalog.products, &query);

    Json(ProductPage {
        items: view.page.into_iter().cloned().collect(),
        page: query.page,
        page_size: query.page_size,
        total_items: view.filtered.len(),
        total_pages: view.total_pages,
    })
}

/// Endpoint: GET /products/featured
async fn list_featured(State(state): State<SharedState>) -> Json<Vec<Product>> {
    let catalog = state.catalog().await;
    Json(featured_products(&catalog.products).into_iter().cloned().collect())
}

/// Endpoint: GET /products/price-range
async fn get_price_range(State(state): State<SharedState>) -> Json<PriceRange> {
    Json(price_range(&state.catalog().await.products))
}

/// Endpoint: GET /products/:id
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    state.find_product(id).await.map(Json)
}

/// Endpoint: GET /products/category/:name
///
/// Asks the product API directly instead of filtering the snapshot.
async fn list_by_category(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.products_in_category(&name).await?))
}

/// Endpoint: GET /categories
async fn list_categories(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(state.catalog().await.categories.clone())
}

/// Endpoint: GET /catalog/status
async fn get_status(State(state): State<SharedState>) -> Json<CatalogStatus> {
    Json(state.catalog().await.status.clone())
}

/// Endpoint: POST /catalog/refresh
async fn refresh(State(state): State<SharedState>) -> ApiResult<Json<CatalogStatus>> {
    state.refresh_catalog().await?;
    Ok(Json(state.catalog().await.status.clone()))
}
