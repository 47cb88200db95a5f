use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::SanReturn;
use crate::queries;
use crate::services::inventory::NewSanReturn;
use crate::store;
use crate::{ApiResponse, ApiResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_returns).post(create_return))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSanReturnRequest {
    #[validate(length(min = 1, message = "Serial number cannot be empty"))]
    pub san_number: String,
    pub generation: String,
    #[validate(length(min = 1, message = "Returned-by cannot be empty"))]
    pub returned_by: String,
    #[validate(length(min = 1, message = "Returned-to cannot be empty"))]
    pub returned_to: String,
    #[serde(default)]
    pub notes: String,
}

/// Return feed, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/returns",
    responses((status = 200, description = "Return records returned")),
    tag = "returns"
)]
pub async fn list_returns(State(state): State<AppState>) -> ApiResult<Vec<SanReturn>> {
    let mut returns: Vec<SanReturn> = state.store.get_collection(store::RETURNS);
    queries::sort_returns_desc(&mut returns);
    Ok(Json(ApiResponse::success(returns)))
}

/// Record a physical hand-back
///
/// Pure audit trail: independent of the live registry and asset counts, and
/// the serial number is not checked against the registry.
#[utoipa::path(
    post,
    path = "/api/v1/returns",
    request_body = CreateSanReturnRequest,
    responses(
        (status = 201, description = "Return recorded", body = SanReturn),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "returns"
)]
pub async fn create_return(
    State(state): State<AppState>,
    Json(payload): Json<CreateSanReturnRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let record = state
        .inventory_service()
        .add_san_return(NewSanReturn {
            san_number: payload.san_number,
            generation: payload.generation,
            returned_by: payload.returned_by,
            returned_to: payload.returned_to,
            notes: payload.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}
