use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::warn;
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::ServiceError;
use crate::events::Event;
use crate::workspace::{
    AssetNumberConfig, AssetNumberConfigUpdate, AssetTypeConfig, AssetTypeUpdate, LocationUpdate,
    WorkspaceConfig, WorkspaceLocation, WorkspacePreset,
};
use crate::{ApiResponse, ApiResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_workspace).post(setup_workspace).delete(delete_workspace))
        .route("/name", put(update_name))
        .route("/locations", post(add_location))
        .route("/locations/:id", put(update_location).delete(remove_location))
        .route("/asset-types", post(add_asset_type))
        .route(
            "/asset-types/:id",
            put(update_asset_type).delete(remove_asset_type),
        )
        .route("/asset-number-config", put(update_asset_number_config))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNameRequest {
    #[validate(length(min = 1, message = "Workspace name cannot be empty"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddLocationRequest {
    #[validate(length(min = 1, message = "Location name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Short name cannot be empty"))]
    pub short_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddAssetTypeRequest {
    #[validate(length(min = 1, message = "Asset type name cannot be empty"))]
    pub name: String,
    pub requires_asset_number: bool,
    pub category: Option<String>,
}

/// Current workspace configuration
#[utoipa::path(
    get,
    path = "/api/v1/workspace",
    responses(
        (status = 200, description = "Workspace configuration returned", body = WorkspaceConfig),
        (status = 404, description = "Workspace not configured", body = crate::errors::ErrorResponse)
    ),
    tag = "workspace"
)]
pub async fn get_workspace(State(state): State<AppState>) -> ApiResult<WorkspaceConfig> {
    let config = state
        .workspace_service()
        .config()
        .ok_or_else(|| ServiceError::NotFound("workspace is not configured".to_string()))?;
    Ok(Json(ApiResponse::success(config)))
}

/// Install a starting configuration (demo or blank preset)
#[utoipa::path(
    post,
    path = "/api/v1/workspace",
    request_body = WorkspacePreset,
    responses(
        (status = 201, description = "Workspace configured", body = WorkspaceConfig),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "workspace"
)]
pub async fn setup_workspace(
    State(state): State<AppState>,
    Json(preset): Json<WorkspacePreset>,
) -> Result<impl IntoResponse, ServiceError> {
    let config = state.workspace_service().install_preset(preset)?;

    if let Err(err) = state
        .event_sender
        .send(Event::WorkspaceConfigured {
            name: config.name.clone(),
        })
        .await
    {
        warn!(error = %err, "event publication failed");
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::success(config))))
}

/// Delete the workspace configuration (stored collections are untouched)
#[utoipa::path(
    delete,
    path = "/api/v1/workspace",
    responses((status = 200, description = "Workspace configuration deleted")),
    tag = "workspace"
)]
pub async fn delete_workspace(State(state): State<AppState>) -> ApiResult<()> {
    state.workspace_service().delete_config()?;
    Ok(Json(ApiResponse::message("Workspace configuration deleted")))
}

/// Rename the workspace
#[utoipa::path(
    put,
    path = "/api/v1/workspace/name",
    request_body = UpdateNameRequest,
    responses(
        (status = 200, description = "Workspace renamed"),
        (status = 404, description = "Workspace not configured", body = crate::errors::ErrorResponse)
    ),
    tag = "workspace"
)]
pub async fn update_name(
    State(state): State<AppState>,
    Json(payload): Json<UpdateNameRequest>,
) -> ApiResult<()> {
    payload.validate()?;
    state.workspace_service().update_name(&payload.name)?;
    Ok(Json(ApiResponse::message("Workspace renamed")))
}

/// Add a location
#[utoipa::path(
    post,
    path = "/api/v1/workspace/locations",
    request_body = AddLocationRequest,
    responses(
        (status = 201, description = "Location added", body = WorkspaceLocation),
        (status = 404, description = "Workspace not configured", body = crate::errors::ErrorResponse)
    ),
    tag = "workspace"
)]
pub async fn add_location(
    State(state): State<AppState>,
    Json(payload): Json<AddLocationRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let location = state
        .workspace_service()
        .add_location(&payload.name, &payload.short_name)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(location))))
}

/// Update a location's display names
#[utoipa::path(
    put,
    path = "/api/v1/workspace/locations/{id}",
    params(("id" = String, Path, description = "Location id")),
    request_body = LocationUpdate,
    responses(
        (status = 200, description = "Location updated"),
        (status = 404, description = "Location not found", body = crate::errors::ErrorResponse)
    ),
    tag = "workspace"
)]
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<LocationUpdate>,
) -> ApiResult<()> {
    state.workspace_service().update_location(&id, updates)?;
    Ok(Json(ApiResponse::message("Location updated")))
}

/// Remove a location
#[utoipa::path(
    delete,
    path = "/api/v1/workspace/locations/{id}",
    params(("id" = String, Path, description = "Location id")),
    responses((status = 200, description = "Location removed")),
    tag = "workspace"
)]
pub async fn remove_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.workspace_service().remove_location(&id)?;
    Ok(Json(ApiResponse::message("Location removed")))
}

/// Add an asset type to the catalog
#[utoipa::path(
    post,
    path = "/api/v1/workspace/asset-types",
    request_body = AddAssetTypeRequest,
    responses(
        (status = 201, description = "Asset type added", body = AssetTypeConfig),
        (status = 404, description = "Workspace not configured", body = crate::errors::ErrorResponse)
    ),
    tag = "workspace"
)]
pub async fn add_asset_type(
    State(state): State<AppState>,
    Json(payload): Json<AddAssetTypeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let asset_type = state.workspace_service().add_asset_type(
        &payload.name,
        payload.requires_asset_number,
        payload.category,
    )?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(asset_type))))
}

/// Update a catalog entry
#[utoipa::path(
    put,
    path = "/api/v1/workspace/asset-types/{id}",
    params(("id" = String, Path, description = "Asset type id")),
    request_body = AssetTypeUpdate,
    responses(
        (status = 200, description = "Asset type updated"),
        (status = 404, description = "Asset type not found", body = crate::errors::ErrorResponse)
    ),
    tag = "workspace"
)]
pub async fn update_asset_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<AssetTypeUpdate>,
) -> ApiResult<()> {
    state.workspace_service().update_asset_type(&id, updates)?;
    Ok(Json(ApiResponse::message("Asset type updated")))
}

/// Remove a catalog entry
#[utoipa::path(
    delete,
    path = "/api/v1/workspace/asset-types/{id}",
    params(("id" = String, Path, description = "Asset type id")),
    responses((status = 200, description = "Asset type removed")),
    tag = "workspace"
)]
pub async fn remove_asset_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.workspace_service().remove_asset_type(&id)?;
    Ok(Json(ApiResponse::message("Asset type removed")))
}

/// Update the serial-asset-number format
#[utoipa::path(
    put,
    path = "/api/v1/workspace/asset-number-config",
    request_body = AssetNumberConfigUpdate,
    responses(
        (status = 200, description = "Format updated", body = AssetNumberConfig),
        (status = 404, description = "Workspace not configured", body = crate::errors::ErrorResponse)
    ),
    tag = "workspace"
)]
pub async fn update_asset_number_config(
    State(state): State<AppState>,
    Json(updates): Json<AssetNumberConfigUpdate>,
) -> ApiResult<AssetNumberConfig> {
    let updated = state
        .workspace_service()
        .update_asset_number_config(updates)?;
    Ok(Json(ApiResponse::success(updated)))
}
