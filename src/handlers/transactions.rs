//! Thin CRUD over the transaction log.
//!
//! The inventory engine is the authoritative writer of this collection;
//! `POST` here is a direct table append (used for server-side sync of
//! externally recorded movements) and enforces none of the engine's
//! invariants.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{CountAction, TransactionRecord};
use crate::queries;
use crate::store;
use crate::{ApiResponse, ApiResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_transactions).post(create_transaction))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TransactionListQuery {
    /// Restrict to one location id
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[validate(length(min = 1, message = "Item name cannot be empty"))]
    pub item: String,
    pub action: CountAction,
    pub san_number: Option<String>,
    #[validate(range(min = 1, message = "Volume must be a positive integer"))]
    pub volume: u32,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: String,
}

/// Transaction feed, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    params(TransactionListQuery),
    responses((status = 200, description = "Transactions returned")),
    tag = "transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> ApiResult<Vec<TransactionRecord>> {
    let mut transactions: Vec<TransactionRecord> = state.store.get_collection(store::TRANSACTIONS);
    if let Some(location) = query.location {
        transactions.retain(|t| t.location == location);
    }
    queries::sort_transactions_desc(&mut transactions);
    Ok(Json(ApiResponse::success(transactions)))
}

/// Append a transaction entry directly
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionRecord),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let record = TransactionRecord {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now(),
        item: payload.item,
        action: payload.action,
        san_number: payload.san_number.filter(|s| !s.is_empty()),
        volume: payload.volume,
        location: payload.location,
    };

    let mut transactions: Vec<TransactionRecord> = state.store.get_collection(store::TRANSACTIONS);
    transactions.insert(0, record.clone());
    state
        .store
        .put_collection(store::TRANSACTIONS, &transactions)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}
