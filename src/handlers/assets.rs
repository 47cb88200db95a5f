use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{Asset, CountAction, TransactionRecord};
use crate::store;
use crate::{ApiResponse, ApiResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route("/low-stock", get(low_stock))
        .route("/:id/count", post(update_count))
        .route("/:id/threshold", put(update_threshold))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AssetListQuery {
    /// Restrict to one location id
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    #[validate(length(min = 1, message = "Item name cannot be empty"))]
    pub item: String,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: String,
    pub threshold: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCountRequest {
    pub operation: CountAction,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub san_numbers: Option<Vec<String>>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountUpdateResponse {
    pub asset: Asset,
    pub transaction: TransactionRecord,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThresholdRequest {
    pub threshold: u32,
}

/// List assets, optionally restricted to one location
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    params(AssetListQuery),
    responses(
        (status = 200, description = "Asset list returned"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<AssetListQuery>,
) -> ApiResult<Vec<Asset>> {
    let mut assets: Vec<Asset> = state.store.get_collection(store::ASSETS);
    if let Some(location) = query.location {
        assets.retain(|a| a.location == location);
    }
    Ok(Json(ApiResponse::success(assets)))
}

/// Create a new asset with zero counts
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    request_body = CreateAssetRequest,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn create_asset(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssetRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let asset = state
        .inventory_service()
        .add_asset(&payload.item, &payload.location, payload.threshold)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(asset))))
}

/// Apply a quantity change to an asset
///
/// The central inventory operation: enforces serial-asset-number rules for
/// items that require them, clamps subtractions at zero, and records one
/// transaction-log entry.
#[utoipa::path(
    post,
    path = "/api/v1/assets/{id}/count",
    params(("id" = String, Path, description = "Asset id")),
    request_body = UpdateCountRequest,
    responses(
        (status = 200, description = "Count updated", body = CountUpdateResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Asset or serial number not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Serial number already registered", body = crate::errors::ErrorResponse),
        (status = 422, description = "Serial number registered under another item", body = crate::errors::ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn update_count(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCountRequest>,
) -> ApiResult<CountUpdateResponse> {
    let update = state
        .inventory_service()
        .update_asset_count(
            &id,
            payload.operation,
            payload.quantity,
            payload.san_numbers.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::success(CountUpdateResponse {
        asset: update.asset,
        transaction: update.transaction,
    })))
}

/// Change an asset's restock threshold
#[utoipa::path(
    put,
    path = "/api/v1/assets/{id}/threshold",
    params(("id" = String, Path, description = "Asset id")),
    request_body = UpdateThresholdRequest,
    responses(
        (status = 200, description = "Threshold updated", body = Asset),
        (status = 404, description = "Asset not found", body = crate::errors::ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn update_threshold(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateThresholdRequest>,
) -> ApiResult<Asset> {
    let asset = state
        .inventory_service()
        .update_threshold(&id, payload.threshold)
        .await?;
    Ok(Json(ApiResponse::success(asset)))
}

/// Assets below their restock threshold, across all locations
#[utoipa::path(
    get,
    path = "/api/v1/assets/low-stock",
    responses((status = 200, description = "Low stock assets returned")),
    tag = "assets"
)]
pub async fn low_stock(State(state): State<AppState>) -> ApiResult<Vec<Asset>> {
    Ok(Json(ApiResponse::success(
        state.inventory_service().get_low_stock_items(),
    )))
}
