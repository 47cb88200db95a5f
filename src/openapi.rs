use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = r#"
Inventory backend for tracking IT equipment counts across physical locations.

Count changes flow through the inventory engine, which enforces
serial-asset-number (SAN) rules for items that require them, clamps
subtractions at zero, and records every movement in an immutable transaction
log. The registry, return, and transaction collections are also exposed as
thin table-style CRUD for sync tooling; those routes bypass the engine and
are not authoritative for its invariants.
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::assets::list_assets,
        crate::handlers::assets::create_asset,
        crate::handlers::assets::update_count,
        crate::handlers::assets::update_threshold,
        crate::handlers::assets::low_stock,
        crate::handlers::sans::list_sans,
        crate::handlers::sans::create_san,
        crate::handlers::sans::delete_san,
        crate::handlers::sans::check_san,
        crate::handlers::returns::list_returns,
        crate::handlers::returns::create_return,
        crate::handlers::transactions::list_transactions,
        crate::handlers::transactions::create_transaction,
        crate::handlers::workspace::get_workspace,
        crate::handlers::workspace::setup_workspace,
        crate::handlers::workspace::delete_workspace,
        crate::handlers::workspace::update_name,
        crate::handlers::workspace::add_location,
        crate::handlers::workspace::update_location,
        crate::handlers::workspace::remove_location,
        crate::handlers::workspace::add_asset_type,
        crate::handlers::workspace::update_asset_type,
        crate::handlers::workspace::remove_asset_type,
        crate::handlers::workspace::update_asset_number_config,
        crate::handlers::data::export_data,
        crate::handlers::data::import_data,
        crate::handlers::data::reset_data,
        crate::handlers::data::stats,
        crate::handlers::data::get_snapshot,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::models::Asset,
        crate::models::CountAction,
        crate::models::SanRecord,
        crate::models::SanReturn,
        crate::models::TransactionRecord,
        crate::workspace::WorkspaceConfig,
        crate::workspace::WorkspaceLocation,
        crate::workspace::AssetTypeConfig,
        crate::workspace::AssetNumberConfig,
        crate::workspace::WorkspacePreset,
        crate::workspace::LocationUpdate,
        crate::workspace::AssetTypeUpdate,
        crate::workspace::AssetNumberConfigUpdate,
        crate::handlers::assets::CreateAssetRequest,
        crate::handlers::assets::UpdateCountRequest,
        crate::handlers::assets::CountUpdateResponse,
        crate::handlers::assets::UpdateThresholdRequest,
        crate::handlers::sans::CreateSanRequest,
        crate::handlers::sans::CheckSanResponse,
        crate::handlers::returns::CreateSanReturnRequest,
        crate::handlers::transactions::CreateTransactionRequest,
        crate::handlers::workspace::UpdateNameRequest,
        crate::handlers::workspace::AddLocationRequest,
        crate::handlers::workspace::AddAssetTypeRequest,
        crate::handlers::health::HealthInfo,
        crate::handlers::health::HealthStatus,
        crate::services::data_transfer::ExportDocument,
        crate::services::data_transfer::ImportSummary,
        crate::queries::KpiSummary,
        crate::queries::Snapshot,
    )),
    tags(
        (name = "assets", description = "Asset counts and engine operations"),
        (name = "sans", description = "Serial-asset-number registry"),
        (name = "returns", description = "Device hand-back audit trail"),
        (name = "transactions", description = "Stock movement log"),
        (name = "workspace", description = "Tenant configuration"),
        (name = "data", description = "Export, import, reset, and dashboard stats"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the document at
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
