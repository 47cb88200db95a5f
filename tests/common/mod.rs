#![allow(dead_code)]

use std::sync::Arc;

use axum::{routing::get, Router};
use chrono::Utc;
use tokio::sync::mpsc;

use stockroom_api::config::AppConfig;
use stockroom_api::events::{Event, EventSender};
use stockroom_api::handlers::AppServices;
use stockroom_api::models::Asset;
use stockroom_api::store::{self, Store};
use stockroom_api::workspace::{AssetNumberConfigUpdate, WorkspacePreset};
use stockroom_api::{api_v1_routes, AppState};

pub struct TestContext {
    pub store: Arc<Store>,
    pub services: AppServices,
    pub event_sender: EventSender,
    _events: mpsc::Receiver<Event>,
    _dir: tempfile::TempDir,
}

pub fn test_context() -> TestContext {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(Store::open(dir.path().join("store")).expect("open store"));
    let (tx, rx) = mpsc::channel(1024);
    let event_sender = EventSender::new(tx);
    let services = AppServices::new(store.clone(), event_sender.clone());
    TestContext {
        store,
        services,
        event_sender,
        _events: rx,
        _dir: dir,
    }
}

/// Installs a minimal workspace: numeric 5-6 digit serial format, a build
/// room location, one SAN-requiring laptop type and one dock type that
/// tracks counts only.
pub fn configure_workspace(ctx: &TestContext) {
    ctx.services
        .workspace
        .install_preset(WorkspacePreset::Blank {
            name: "Test Workspace".to_string(),
        })
        .expect("install preset");
    ctx.services
        .workspace
        .update_asset_number_config(AssetNumberConfigUpdate {
            display_name: Some("SAN".to_string()),
            pattern: Some(r"^\d{5,6}$".to_string()),
            description: Some("5-6 digit serial asset number".to_string()),
            ..AssetNumberConfigUpdate::default()
        })
        .expect("configure serial format");
    ctx.services
        .workspace
        .add_location("Build Room", "BR")
        .expect("add location");
    ctx.services
        .workspace
        .add_asset_type("Laptop 840 G10", true, Some("Laptops".to_string()))
        .expect("add laptop type");
    ctx.services
        .workspace
        .add_asset_type("Dock Thunderbolt G4", false, Some("Docks".to_string()))
        .expect("add dock type");
}

/// Writes an asset record directly, bypassing the engine, so tests can start
/// from arbitrary counts.
pub fn insert_asset(
    ctx: &TestContext,
    id: &str,
    item: &str,
    last_count: u32,
    new_count: u32,
    threshold: u32,
    location: &str,
) -> Asset {
    let asset = Asset {
        id: id.to_string(),
        item: item.to_string(),
        last_count,
        new_count,
        threshold,
        location: location.to_string(),
    };
    let mut assets: Vec<Asset> = ctx.store.get_collection(store::ASSETS);
    assets.push(asset.clone());
    ctx.store
        .put_collection(store::ASSETS, &assets)
        .expect("write assets");
    asset
}

/// Router wired like the binary's, for request-level tests.
pub fn test_app(ctx: &TestContext) -> Router {
    let state = AppState {
        store: ctx.store.clone(),
        config: AppConfig::default(),
        event_sender: ctx.event_sender.clone(),
        services: ctx.services.clone(),
        started_at: Utc::now(),
    };
    Router::new()
        .route("/health", get(stockroom_api::handlers::health::health))
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
}
