//! Starting configurations for new workspaces, plus the demo seed data.

use chrono::{Duration, Utc};

use crate::errors::ServiceError;
use crate::models::{Asset, CountAction, SanRecord, SanReturn, TransactionRecord};
use crate::store::{self, Store};
use crate::workspace::{
    AssetNumberConfig, AssetTypeConfig, WorkspaceConfig, WorkspaceLocation, CONFIG_VERSION,
};

fn location(id: &str, name: &str, short_name: &str) -> WorkspaceLocation {
    WorkspaceLocation {
        id: id.to_string(),
        name: name.to_string(),
        short_name: short_name.to_string(),
    }
}

fn asset_type(id: &str, name: &str, category: &str, requires_asset_number: bool) -> AssetTypeConfig {
    AssetTypeConfig {
        id: id.to_string(),
        name: name.to_string(),
        category: Some(category.to_string()),
        requires_asset_number,
    }
}

/// Demo workspace: an IT stockroom spread over five locations, with serial
/// numbers required on current-generation laptops and desktops.
pub fn demo_config() -> WorkspaceConfig {
    WorkspaceConfig {
        version: CONFIG_VERSION,
        name: "Demo IT Inventory".to_string(),
        created_at: Utc::now(),
        locations: vec![
            location("basement-4.2", "Basement 4.2", "4.2"),
            location("build-room", "Build Room", "BR"),
            location("darwin", "Darwin", "DRW"),
            location("level-17", "Level 17", "L17"),
            location("basement-4.3", "Basement 4.3", "4.3"),
        ],
        asset_types: vec![
            asset_type("desktop-mini-g9", "Desktop Mini G9", "Desktops", true),
            asset_type("laptop-840-g10", "Laptop 840 G10", "Laptops", true),
            asset_type("laptop-840-g9", "Laptop 840 G9", "Laptops", true),
            asset_type("laptop-840-g6", "Laptop 840 G6", "Laptops", false),
            asset_type("laptop-x360-g8", "Laptop x360 G8", "Laptops", true),
            asset_type("dock-thunderbolt-slim", "Dock Thunderbolt Slim", "Docks", false),
            asset_type("dock-thunderbolt-g2", "Dock Thunderbolt G2", "Docks", false),
            asset_type("dock-thunderbolt-g4", "Dock Thunderbolt G4", "Docks", false),
            asset_type("monitor-24", "Monitor 24\"", "Monitors", false),
            asset_type("monitor-34-ultrawide", "Monitor 34\" Ultrawide", "Monitors", false),
            asset_type("laptop-bag", "Laptop Bag", "Accessories", false),
            asset_type("laptop-charger", "Laptop Charger", "Accessories", false),
            asset_type("usb-dvd-rw-drive", "USB DVD-RW Drive", "Accessories", false),
            asset_type("wired-headset-poly", "Wired Headset Poly", "Peripherals", false),
            asset_type("wired-keyboard", "Wired Keyboard", "Peripherals", false),
            asset_type("wired-mouse", "Wired Mouse", "Peripherals", false),
            asset_type("wireless-headset-poly", "Wireless Headset Poly", "Peripherals", false),
            asset_type("wireless-kb-mouse", "Wireless KB & Mouse", "Peripherals", false),
        ],
        asset_number_config: AssetNumberConfig {
            display_name: "SAN".to_string(),
            pattern: r"^\d{5,6}$".to_string(),
            ocr_pattern: r"\b(\d{5,6})\b".to_string(),
            prefix: None,
            placeholder: "e.g. 12345".to_string(),
            description: "5-6 digit serial asset number".to_string(),
        },
    }
}

/// Fresh custom workspace: no locations or catalog yet, alphanumeric asset
/// numbers accepted until the tenant configures a stricter format.
pub fn blank_config(name: String) -> WorkspaceConfig {
    WorkspaceConfig {
        version: CONFIG_VERSION,
        name,
        created_at: Utc::now(),
        locations: Vec::new(),
        asset_types: Vec::new(),
        asset_number_config: AssetNumberConfig {
            display_name: "Asset Number".to_string(),
            pattern: r"^[A-Za-z0-9\-]{3,20}$".to_string(),
            ocr_pattern: r"\b([A-Za-z0-9\-]{3,20})\b".to_string(),
            prefix: None,
            placeholder: "e.g. A-001".to_string(),
            description: "Alphanumeric, 3-20 characters".to_string(),
        },
    }
}

fn seed_asset(id: &str, item: &str, last: u32, new: u32, threshold: u32, loc: &str) -> Asset {
    Asset {
        id: id.to_string(),
        item: item.to_string(),
        last_count: last,
        new_count: new,
        threshold,
        location: loc.to_string(),
    }
}

/// Writes sample inventory data for the demo workspace. Replaces the
/// collections wholesale.
pub fn seed_demo_data(store: &Store) -> Result<(), ServiceError> {
    let now = Utc::now();
    let days = |n: i64| now - Duration::days(n);

    let assets = vec![
        seed_asset("asset-0001", "Desktop Mini G9", 60, 62, 10, "basement-4.2"),
        seed_asset("asset-0002", "Dock Thunderbolt Slim", 18, 19, 4, "basement-4.2"),
        seed_asset("asset-0003", "Dock Thunderbolt G4", 78, 75, 20, "basement-4.2"),
        seed_asset("asset-0004", "Laptop 840 G10", 43, 45, 30, "basement-4.2"),
        seed_asset("asset-0005", "Laptop 840 G9", 8, 8, 3, "basement-4.2"),
        seed_asset("asset-0006", "Monitor 24\"", 12, 9, 10, "basement-4.2"),
        seed_asset("asset-0007", "Laptop 840 G10", 6, 5, 8, "build-room"),
        seed_asset("asset-0008", "Wired Keyboard", 30, 28, 5, "build-room"),
        seed_asset("asset-0009", "Laptop Charger", 2, 2, 6, "level-17"),
    ];

    let san = |number: &str, item: &str, loc: &str, age: i64| SanRecord {
        san_number: number.to_string(),
        item: item.to_string(),
        timestamp: days(age),
        location: loc.to_string(),
    };
    let sans = vec![
        san("100234", "Laptop 840 G10", "basement-4.2", 40),
        san("100235", "Laptop 840 G10", "basement-4.2", 40),
        san("100310", "Laptop 840 G9", "basement-4.2", 25),
        san("100402", "Desktop Mini G9", "basement-4.2", 12),
        san("100518", "Laptop 840 G10", "build-room", 3),
    ];

    let returns = vec![SanReturn {
        id: "return-0001".to_string(),
        san_number: "100118".to_string(),
        generation: "G8".to_string(),
        returned_by: "J. Whitfield".to_string(),
        returned_to: "Stockroom".to_string(),
        notes: "Screen replaced before re-shelving".to_string(),
        timestamp: days(9),
    }];

    let transaction = |id: &str,
                       age: i64,
                       item: &str,
                       action: CountAction,
                       san_number: Option<&str>,
                       volume: u32,
                       loc: &str| TransactionRecord {
        id: id.to_string(),
        timestamp: days(age),
        item: item.to_string(),
        action,
        san_number: san_number.map(str::to_string),
        volume,
        location: loc.to_string(),
    };
    let transactions = vec![
        transaction(
            "txn-0006",
            1,
            "Monitor 24\"",
            CountAction::Subtract,
            None,
            3,
            "basement-4.2",
        ),
        transaction(
            "txn-0005",
            3,
            "Laptop 840 G10",
            CountAction::Add,
            Some("100518"),
            1,
            "build-room",
        ),
        transaction(
            "txn-0004",
            5,
            "Dock Thunderbolt G4",
            CountAction::Subtract,
            None,
            3,
            "basement-4.2",
        ),
        transaction(
            "txn-0003",
            12,
            "Desktop Mini G9",
            CountAction::Add,
            Some("100402"),
            1,
            "basement-4.2",
        ),
        transaction(
            "txn-0002",
            18,
            "Dock Thunderbolt Slim",
            CountAction::Add,
            None,
            1,
            "basement-4.2",
        ),
        transaction(
            "txn-0001",
            40,
            "Laptop 840 G10",
            CountAction::Add,
            Some("100234, 100235"),
            2,
            "basement-4.2",
        ),
    ];

    store.put_collection(store::SANS, &sans)?;
    store.put_collection(store::RETURNS, &returns)?;
    store.put_collection(store::TRANSACTIONS, &transactions)?;
    store.put_collection(store::ASSETS, &assets)?;
    Ok(())
}
