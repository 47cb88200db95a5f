//! Engine-level scenarios: SAN invariants, count clamping, transaction
//! fidelity, and the all-or-nothing validation guarantee.

mod common;

use common::{configure_workspace, insert_asset, test_context};
use stockroom_api::errors::ServiceError;
use stockroom_api::models::{Asset, CountAction, SanRecord, SanReturn, TransactionRecord};
use stockroom_api::services::inventory::NewSanReturn;
use stockroom_api::store;

fn sans(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn adding_san_required_stock_registers_serials_and_logs_one_transaction() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Laptop 840 G10", 5, 5, 10, "build-room");

    let supplied = sans(&["12345", "12346"]);
    let update = ctx
        .services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 2, Some(&supplied))
        .await
        .expect("add should succeed");

    assert_eq!(update.asset.last_count, 5);
    assert_eq!(update.asset.new_count, 7);

    let registry: Vec<SanRecord> = ctx.store.get_collection(store::SANS);
    assert_eq!(registry.len(), 2);
    assert!(registry
        .iter()
        .all(|r| r.item == "Laptop 840 G10" && r.location == "build-room"));

    let transactions: Vec<TransactionRecord> = ctx.store.get_collection(store::TRANSACTIONS);
    assert_eq!(transactions.len(), 1);
    let entry = &transactions[0];
    assert_eq!(entry.action, CountAction::Add);
    assert_eq!(entry.volume, 2);
    assert_eq!(entry.san_number.as_deref(), Some("12345, 12346"));
    assert_eq!(entry.item, "Laptop 840 G10");
    assert_eq!(entry.location, "build-room");
}

#[tokio::test]
async fn san_count_must_match_quantity() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Laptop 840 G10", 5, 5, 10, "build-room");

    let supplied = sans(&["12345"]);
    let err = ctx
        .services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 2, Some(&supplied))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingSans { expected: 2, .. }));
    assert_eq!(err.to_string(), "Please provide 2 SAN number(s)");

    // No state change on failure
    let assets: Vec<Asset> = ctx.store.get_collection(store::ASSETS);
    assert_eq!(assets[0].new_count, 5);
    assert!(ctx.store.get_collection::<SanRecord>(store::SANS).is_empty());
    assert!(ctx
        .store
        .get_collection::<TransactionRecord>(store::TRANSACTIONS)
        .is_empty());
}

#[tokio::test]
async fn one_invalid_serial_aborts_the_whole_batch() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Laptop 840 G10", 5, 5, 10, "build-room");

    let supplied = sans(&["12345", "12a46"]);
    let err = ctx
        .services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 2, Some(&supplied))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidSanFormat { .. }));
    assert_eq!(
        err.to_string(),
        "12a46 is invalid (5-6 digit serial asset number)"
    );

    assert!(ctx.store.get_collection::<SanRecord>(store::SANS).is_empty());
    let assets: Vec<Asset> = ctx.store.get_collection(store::ASSETS);
    assert_eq!(assets[0].new_count, 5);
}

#[tokio::test]
async fn duplicate_serial_in_registry_aborts_with_no_partial_writes() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Laptop 840 G10", 5, 5, 10, "build-room");

    let first = sans(&["99901"]);
    ctx.services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 1, Some(&first))
        .await
        .expect("first add");

    let registry_before: Vec<SanRecord> = ctx.store.get_collection(store::SANS);
    let transactions_before: Vec<TransactionRecord> = ctx.store.get_collection(store::TRANSACTIONS);

    // Two fresh serials plus one that already exists: nothing may change.
    let supplied = sans(&["12345", "12346", "99901"]);
    let err = ctx
        .services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 3, Some(&supplied))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateSan(ref san) if san == "99901"));
    assert_eq!(err.to_string(), "99901 already exists in system");

    let assets: Vec<Asset> = ctx.store.get_collection(store::ASSETS);
    assert_eq!(assets[0].new_count, 6);
    assert_eq!(
        ctx.store.get_collection::<SanRecord>(store::SANS),
        registry_before
    );
    assert_eq!(
        ctx.store
            .get_collection::<TransactionRecord>(store::TRANSACTIONS),
        transactions_before
    );
}

#[tokio::test]
async fn duplicate_serial_within_one_batch_is_rejected() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Laptop 840 G10", 0, 0, 10, "build-room");

    let supplied = sans(&["12345", "12345"]);
    let err = ctx
        .services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 2, Some(&supplied))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateSan(_)));
    assert!(ctx.store.get_collection::<SanRecord>(store::SANS).is_empty());
}

#[tokio::test]
async fn registry_never_holds_two_records_for_one_serial() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Laptop 840 G10", 0, 0, 10, "build-room");
    insert_asset(&ctx, "a-2", "Laptop 840 G10", 0, 0, 10, "build-room");

    let supplied = sans(&["55555"]);
    ctx.services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 1, Some(&supplied))
        .await
        .expect("first registration");

    // Same serial against a different asset must be refused.
    let err = ctx
        .services
        .inventory
        .update_asset_count("a-2", CountAction::Add, 1, Some(&supplied))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateSan(_)));

    let registry: Vec<SanRecord> = ctx.store.get_collection(store::SANS);
    assert_eq!(
        registry
            .iter()
            .filter(|r| r.san_number == "55555")
            .count(),
        1
    );
}

#[tokio::test]
async fn subtracting_requires_registered_serials_of_the_same_item() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "laptop", "Laptop 840 G10", 1, 1, 10, "build-room");

    let unknown = sans(&["44444"]);
    let err = ctx
        .services
        .inventory
        .update_asset_count("laptop", CountAction::Subtract, 1, Some(&unknown))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::SanNotFound(_)));
    assert_eq!(err.to_string(), "44444 not found in system");
}

#[tokio::test]
async fn subtracting_a_serial_registered_under_another_item_fails() {
    let ctx = test_context();
    configure_workspace(&ctx);
    ctx.services
        .workspace
        .add_asset_type("Laptop 840 G9", true, Some("Laptops".to_string()))
        .expect("add second laptop type");
    insert_asset(&ctx, "g9", "Laptop 840 G9", 0, 0, 5, "build-room");
    insert_asset(&ctx, "g10", "Laptop 840 G10", 1, 1, 5, "build-room");

    let supplied = sans(&["77777"]);
    ctx.services
        .inventory
        .update_asset_count("g9", CountAction::Add, 1, Some(&supplied))
        .await
        .expect("register under G9");

    let err = ctx
        .services
        .inventory
        .update_asset_count("g10", CountAction::Subtract, 1, Some(&supplied))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::SanItemMismatch { .. }));
    assert_eq!(
        err.to_string(),
        "77777 belongs to Laptop 840 G9, not Laptop 840 G10"
    );

    // The registry entry survives the failed removal.
    let registry: Vec<SanRecord> = ctx.store.get_collection(store::SANS);
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn subtracting_releases_registry_entries() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Laptop 840 G10", 0, 0, 10, "build-room");

    let supplied = sans(&["12345", "12346"]);
    ctx.services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 2, Some(&supplied))
        .await
        .expect("add");

    let removed = sans(&["12345"]);
    let update = ctx
        .services
        .inventory
        .update_asset_count("a-1", CountAction::Subtract, 1, Some(&removed))
        .await
        .expect("subtract");
    assert_eq!(update.asset.last_count, 2);
    assert_eq!(update.asset.new_count, 1);

    let registry: Vec<SanRecord> = ctx.store.get_collection(store::SANS);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry[0].san_number, "12346");
}

#[tokio::test]
async fn subtracting_more_than_on_hand_clamps_at_zero() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "dock", "Dock Thunderbolt G4", 3, 3, 5, "build-room");

    let update = ctx
        .services
        .inventory
        .update_asset_count("dock", CountAction::Subtract, 10, None)
        .await
        .expect("clamped subtract succeeds");

    assert_eq!(update.asset.last_count, 3);
    assert_eq!(update.asset.new_count, 0);
    assert_eq!(update.transaction.action, CountAction::Subtract);
    assert_eq!(update.transaction.volume, 10);
    assert!(update.transaction.san_number.is_none());
}

#[tokio::test]
async fn items_without_san_requirement_skip_the_registry() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "dock", "Dock Thunderbolt G4", 0, 0, 5, "build-room");

    let update = ctx
        .services
        .inventory
        .update_asset_count("dock", CountAction::Add, 4, None)
        .await
        .expect("add without serials");
    assert_eq!(update.asset.new_count, 4);
    assert!(ctx.store.get_collection::<SanRecord>(store::SANS).is_empty());
    assert!(update.transaction.san_number.is_none());
}

#[tokio::test]
async fn free_text_items_never_require_serials() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "misc", "Donated Keyboard", 0, 0, 2, "build-room");

    ctx.services
        .inventory
        .update_asset_count("misc", CountAction::Add, 1, None)
        .await
        .expect("free-text item adds without serials");
}

#[tokio::test]
async fn unknown_asset_and_zero_quantity_are_rejected() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Dock Thunderbolt G4", 0, 0, 5, "build-room");

    let err = ctx
        .services
        .inventory
        .update_asset_count("missing", CountAction::Add, 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AssetNotFound(_)));

    let err = ctx
        .services
        .inventory
        .update_asset_count("a-1", CountAction::Add, 0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn every_successful_update_appends_exactly_one_transaction() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "dock", "Dock Thunderbolt G4", 0, 0, 5, "build-room");

    for quantity in [1_u32, 3, 2] {
        ctx.services
            .inventory
            .update_asset_count("dock", CountAction::Add, quantity, None)
            .await
            .expect("add");
    }

    let transactions: Vec<TransactionRecord> = ctx.store.get_collection(store::TRANSACTIONS);
    assert_eq!(transactions.len(), 3);
    // Newest first, volumes match the requested quantities.
    let volumes: Vec<u32> = transactions.iter().map(|t| t.volume).collect();
    assert_eq!(volumes, [2, 3, 1]);
}

#[tokio::test]
async fn threshold_updates_leave_no_transaction_entry() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "dock", "Dock Thunderbolt G4", 7, 7, 5, "build-room");

    let asset = ctx
        .services
        .inventory
        .update_threshold("dock", 12)
        .await
        .expect("update threshold");
    assert_eq!(asset.threshold, 12);
    assert_eq!(asset.new_count, 7);
    assert!(ctx
        .store
        .get_collection::<TransactionRecord>(store::TRANSACTIONS)
        .is_empty());
}

#[tokio::test]
async fn new_assets_start_at_zero_with_default_threshold() {
    let ctx = test_context();
    configure_workspace(&ctx);

    let asset = ctx
        .services
        .inventory
        .add_asset("Laptop 840 G10", "build-room", None)
        .await
        .expect("add asset");
    assert_eq!(asset.last_count, 0);
    assert_eq!(asset.new_count, 0);
    assert_eq!(asset.threshold, 10);
    assert!(!asset.id.is_empty());

    let assets: Vec<Asset> = ctx.store.get_collection(store::ASSETS);
    assert_eq!(assets.len(), 1);
}

#[tokio::test]
async fn returns_are_decoupled_bookkeeping() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "a-1", "Laptop 840 G10", 4, 4, 10, "build-room");

    // The serial was never registered; the return is recorded anyway.
    let record = ctx
        .services
        .inventory
        .add_san_return(NewSanReturn {
            san_number: "31337".to_string(),
            generation: "G8".to_string(),
            returned_by: "A. Chen".to_string(),
            returned_to: "Stockroom".to_string(),
            notes: String::new(),
        })
        .await
        .expect("record return");
    assert_eq!(record.san_number, "31337");

    let returns: Vec<SanReturn> = ctx.store.get_collection(store::RETURNS);
    assert_eq!(returns.len(), 1);
    assert!(ctx.store.get_collection::<SanRecord>(store::SANS).is_empty());
    assert!(ctx
        .store
        .get_collection::<TransactionRecord>(store::TRANSACTIONS)
        .is_empty());
    let assets: Vec<Asset> = ctx.store.get_collection(store::ASSETS);
    assert_eq!(assets[0].new_count, 4);
}

#[tokio::test]
async fn low_stock_uses_strict_inequality() {
    let ctx = test_context();
    configure_workspace(&ctx);
    insert_asset(&ctx, "below", "Dock Thunderbolt G4", 0, 4, 5, "build-room");
    insert_asset(&ctx, "at", "Laptop 840 G10", 0, 5, 5, "build-room");
    insert_asset(&ctx, "above", "Donated Keyboard", 0, 6, 5, "build-room");

    let low = ctx.services.inventory.get_low_stock_items();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].id, "below");
}
