//! Product Footprint Handlers
//!
//! The three footprint actions of the exchange: create, get-by-id, and the
//! paginated list. Responses wrap their payload in a `data` envelope; the
//! list adds `meta.total` and relies on the pagination layer for the `Link`
//! header.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::middleware::AuthUser;
use crate::api::pagination::{paginate, RawPageParams};
use crate::api::AppState;
use crate::models::footprint::ProductFootprint;
use crate::utils::error::{AppError, AppResult};

/// Envelope for single-resource responses.
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Envelope for list responses.
#[derive(Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Serialize)]
pub struct PageMeta {
    pub total: i64,
}

/// Store a new product footprint aggregate.
pub async fn create_product_footprint(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    ApiJson(footprint): ApiJson<ProductFootprint>,
) -> AppResult<Json<&'static str>> {
    footprint
        .validate()
        .map_err(|e| AppError::Validation(format!("Invalid product footprint: {}", e)))?;

    state.footprint_service.create(&footprint).await?;
    Ok(Json("Success"))
}

/// Fetch one product footprint. An id that is not even a UUID cannot match
/// anything, so it is the same NoSuchFootprint as an unknown id.
pub async fn read_product_footprint(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ProductFootprint>>> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NoSuchFootprint)?;

    match state.footprint_service.get_by_id(id).await? {
        Some(footprint) => Ok(Json(DataResponse { data: footprint })),
        None => Err(AppError::NoSuchFootprint),
    }
}

/// List product footprints through the pagination window. An empty store is
/// a 200 with an empty page, not an error.
pub async fn list_product_footprints(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    ApiQuery(params): ApiQuery<RawPageParams>,
) -> AppResult<Json<PageResponse<ProductFootprint>>> {
    let page = params.validated()?;

    let total = state.footprint_service.count().await?;
    let footprints = state.footprint_service.list().await?;
    let data = paginate(footprints, &page);

    Ok(Json(PageResponse {
        data,
        meta: PageMeta { total },
    }))
}
