//! Stockroom API Library
//!
//! Inventory backend for tracking IT equipment counts, serial asset numbers,
//! and stock movements across physical locations. The inventory engine in
//! [`services::inventory`] is the authoritative writer; everything else is
//! thin plumbing around it.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod presets;
pub mod queries;
pub mod services;
pub mod store;
pub mod workspace;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::events::EventSender;
use crate::handlers::AppServices;
use crate::services::data_transfer::DataTransferService;
use crate::services::inventory::InventoryService;
use crate::store::Store;
use crate::workspace::WorkspaceService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: config::AppConfig,
    pub event_sender: EventSender,
    pub services: AppServices,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn inventory_service(&self) -> &InventoryService {
        &self.services.inventory
    }

    pub fn workspace_service(&self) -> &WorkspaceService {
        &self.services.workspace
    }

    pub fn data_transfer_service(&self) -> &DataTransferService {
        &self.services.data_transfer
    }
}

// Common response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// The versioned API surface, nested under `/api/v1` by the binary.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/assets", handlers::assets::router())
        .nest("/sans", handlers::sans::router())
        .nest("/returns", handlers::returns::router())
        .nest("/transactions", handlers::transactions::router())
        .nest("/workspace", handlers::workspace::router())
        .nest("/data", handlers::data::router())
        .route("/snapshot", get(handlers::data::get_snapshot))
}
