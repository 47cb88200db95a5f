//! Thin CRUD over the serial-asset-number registry.
//!
//! These routes mirror the table-storage function surface: direct reads and
//! writes with existence checks only. They do not enforce the inventory
//! engine's format or count invariants and are not authoritative for them;
//! engine-driven changes go through the asset count operation instead.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::SanRecord;
use crate::store;
use crate::{ApiResponse, ApiResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sans).post(create_san))
        .route("/:san_number", delete(delete_san))
        .route("/check/:san_number", get(check_san))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SanListQuery {
    /// Restrict to one location id
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSanRequest {
    #[validate(length(min = 1, message = "Serial number cannot be empty"))]
    pub san_number: String,
    #[validate(length(min = 1, message = "Item name cannot be empty"))]
    pub item: String,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckSanResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// List registry entries, optionally restricted to one location
#[utoipa::path(
    get,
    path = "/api/v1/sans",
    params(SanListQuery),
    responses((status = 200, description = "Registry entries returned")),
    tag = "sans"
)]
pub async fn list_sans(
    State(state): State<AppState>,
    Query(query): Query<SanListQuery>,
) -> ApiResult<Vec<SanRecord>> {
    let mut records: Vec<SanRecord> = state.store.get_collection(store::SANS);
    if let Some(location) = query.location {
        records.retain(|r| r.location == location);
    }
    Ok(Json(ApiResponse::success(records)))
}

/// Register a serial number directly (existence check only)
#[utoipa::path(
    post,
    path = "/api/v1/sans",
    request_body = CreateSanRequest,
    responses(
        (status = 201, description = "Registry entry created", body = SanRecord),
        (status = 409, description = "Serial number already registered", body = crate::errors::ErrorResponse)
    ),
    tag = "sans"
)]
pub async fn create_san(
    State(state): State<AppState>,
    Json(payload): Json<CreateSanRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let mut records: Vec<SanRecord> = state.store.get_collection(store::SANS);
    if records.iter().any(|r| r.san_number == payload.san_number) {
        return Err(ServiceError::DuplicateSan(payload.san_number));
    }

    let record = SanRecord {
        san_number: payload.san_number,
        item: payload.item,
        timestamp: Utc::now(),
        location: payload.location,
    };
    records.push(record.clone());
    state.store.put_collection(store::SANS, &records)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}

/// Remove a registry entry by serial number
#[utoipa::path(
    delete,
    path = "/api/v1/sans/{sanNumber}",
    params(("sanNumber" = String, Path, description = "Serial asset number")),
    responses(
        (status = 200, description = "Registry entry removed"),
        (status = 404, description = "Serial number not registered", body = crate::errors::ErrorResponse)
    ),
    tag = "sans"
)]
pub async fn delete_san(
    State(state): State<AppState>,
    Path(san_number): Path<String>,
) -> ApiResult<()> {
    let mut records: Vec<SanRecord> = state.store.get_collection(store::SANS);
    let before = records.len();
    records.retain(|r| r.san_number != san_number);
    if records.len() == before {
        return Err(ServiceError::SanNotFound(san_number));
    }
    state.store.put_collection(store::SANS, &records)?;
    Ok(Json(ApiResponse::message("Registry entry removed")))
}

/// Check whether a serial number is registered
#[utoipa::path(
    get,
    path = "/api/v1/sans/check/{sanNumber}",
    params(("sanNumber" = String, Path, description = "Serial asset number")),
    responses((status = 200, description = "Lookup result", body = CheckSanResponse)),
    tag = "sans"
)]
pub async fn check_san(
    State(state): State<AppState>,
    Path(san_number): Path<String>,
) -> Json<CheckSanResponse> {
    let records: Vec<SanRecord> = state.store.get_collection(store::SANS);
    match records.into_iter().find(|r| r.san_number == san_number) {
        Some(record) => Json(CheckSanResponse {
            exists: true,
            item: Some(record.item),
            location: Some(record.location),
        }),
        None => Json(CheckSanResponse {
            exists: false,
            item: None,
            location: None,
        }),
    }
}
