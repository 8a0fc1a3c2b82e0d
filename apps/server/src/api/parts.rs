use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use partshub_catalog::{CatalogPage, CatalogQuery, Part, DEFAULT_PAGE_SIZE};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Debug, Deserialize)]
struct CatalogParams {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    year: Option<i32>,
}

/// Paginated, filterable view of the merged catalog.
async fn get_catalog(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogParams>,
) -> Json<CatalogPage> {
    let query = CatalogQuery {
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        search: params.search,
        brand: params.brand,
        model: params.model,
        year: params.year,
    };
    Json(state.parts.get_catalog(&query).await)
}

/// Single merged part by SKU.
async fn get_part(
    State(state): State<Arc<AppState>>,
    Path(sku): Path<String>,
) -> ApiResult<Json<Part>> {
    let sku = sku.trim();
    if sku.is_empty() {
        return Err(ApiError::BadRequest("SKU is required".to_string()));
    }
    let part = state
        .parts
        .get_part(sku)
        .await
        .ok_or_else(|| ApiError::BadRequest("Part not found".to_string()))?;
    Ok(Json(part))
}

/// Admin invalidation hook: drop all cached catalog and part results.
async fn clear_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    state.parts.clear_cache();
    StatusCode::NO_CONTENT
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/parts/catalog", get(get_catalog))
        .route("/parts/cache/clear", post(clear_cache))
        .route("/parts/{sku}", get(get_part))
}
