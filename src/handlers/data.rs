//! Data management: export, import, reset, and dashboard derivations.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::queries::{self, KpiSummary, Snapshot};
use crate::services::data_transfer::{ExportDocument, ImportSummary};
use crate::store;
use crate::{ApiResponse, ApiResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(export_data))
        .route("/import", post(import_data))
        .route("/reset", post(reset_data))
        .route("/stats", get(stats))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// Restrict to one location id
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SnapshotQuery {
    /// Location id to scope the view to
    pub location: String,
}

/// Export every stored collection as one document
///
/// The body is the raw interchange document (no response envelope) so an
/// export can be re-imported unchanged.
#[utoipa::path(
    get,
    path = "/api/v1/data/export",
    responses((status = 200, description = "Export document returned", body = ExportDocument)),
    tag = "data"
)]
pub async fn export_data(State(state): State<AppState>) -> Json<ExportDocument> {
    Json(state.data_transfer_service().export())
}

/// Import an exported document
///
/// Collections present in the document are replaced wholesale; omitted keys
/// leave the stored collection untouched. A malformed payload changes
/// nothing.
#[utoipa::path(
    post,
    path = "/api/v1/data/import",
    request_body = String,
    responses(
        (status = 200, description = "Import applied", body = ImportSummary),
        (status = 400, description = "Malformed payload", body = crate::errors::ErrorResponse)
    ),
    tag = "data"
)]
pub async fn import_data(State(state): State<AppState>, payload: String) -> ApiResult<ImportSummary> {
    let summary = state.data_transfer_service().import_json(&payload).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// Clear all stored data and the workspace configuration
#[utoipa::path(
    post,
    path = "/api/v1/data/reset",
    responses((status = 200, description = "All data cleared")),
    tag = "data"
)]
pub async fn reset_data(State(state): State<AppState>) -> ApiResult<()> {
    state.data_transfer_service().reset().await?;
    Ok(Json(ApiResponse::message("All data cleared")))
}

/// Headline numbers for the dashboard
#[utoipa::path(
    get,
    path = "/api/v1/data/stats",
    params(StatsQuery),
    responses((status = 200, description = "KPI summary returned", body = KpiSummary)),
    tag = "data"
)]
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<KpiSummary> {
    let mut assets: Vec<crate::models::Asset> = state.store.get_collection(store::ASSETS);
    let mut transactions: Vec<crate::models::TransactionRecord> =
        state.store.get_collection(store::TRANSACTIONS);
    let san_records: Vec<crate::models::SanRecord> = state.store.get_collection(store::SANS);

    if let Some(location) = query.location {
        assets = queries::assets_at(&assets, &location);
        transactions = queries::transactions_at(&transactions, &location);
    }

    let summary = queries::kpi_summary(&assets, &transactions, &san_records, Utc::now());
    Ok(Json(ApiResponse::success(summary)))
}

/// Full view state for one location
///
/// The wholesale reload clients perform after every mutation: assets and
/// transactions scoped to the location, the registry and return feed global,
/// feeds sorted most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/snapshot",
    params(SnapshotQuery),
    responses((status = 200, description = "Snapshot returned", body = Snapshot)),
    tag = "data"
)]
pub async fn get_snapshot(
    State(state): State<AppState>,
    Query(query): Query<SnapshotQuery>,
) -> ApiResult<Snapshot> {
    Ok(Json(ApiResponse::success(Snapshot::load(
        &state.store,
        &query.location,
    ))))
}
