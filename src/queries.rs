//! Read-side derivations: pure functions over loaded snapshots.
//!
//! Nothing here caches or invalidates; callers reload the snapshot after
//! every mutation and recompute. O(n) per call is acceptable for the
//! expected tens-to-hundreds of records.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Asset, SanRecord, SanReturn, TransactionRecord};
use crate::store::{self, Store};

/// Number of trailing days counted as "recent" activity.
pub const RECENT_ACTIVITY_DAYS: i64 = 30;

/// Assets below their restock threshold. Strict inequality: an asset sitting
/// exactly at its threshold is not low stock.
pub fn low_stock(assets: &[Asset]) -> Vec<Asset> {
    assets
        .iter()
        .filter(|a| a.new_count < a.threshold)
        .cloned()
        .collect()
}

pub fn assets_at(assets: &[Asset], location: &str) -> Vec<Asset> {
    assets
        .iter()
        .filter(|a| a.location == location)
        .cloned()
        .collect()
}

pub fn transactions_at(transactions: &[TransactionRecord], location: &str) -> Vec<TransactionRecord> {
    transactions
        .iter()
        .filter(|t| t.location == location)
        .cloned()
        .collect()
}

/// Most recent first; ties keep their original insertion order.
pub fn sort_transactions_desc(transactions: &mut [TransactionRecord]) {
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Most recent first; ties keep their original insertion order.
pub fn sort_returns_desc(returns: &mut [SanReturn]) {
    returns.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Headline numbers for a location's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Sum of current counts across the visible assets.
    pub total_units: u64,
    pub low_stock_count: usize,
    pub registered_san_count: usize,
    /// Transactions within the trailing 30-day window.
    pub recent_transaction_count: usize,
}

pub fn kpi_summary(
    assets: &[Asset],
    transactions: &[TransactionRecord],
    san_records: &[SanRecord],
    now: DateTime<Utc>,
) -> KpiSummary {
    let window_start = now - Duration::days(RECENT_ACTIVITY_DAYS);
    KpiSummary {
        total_units: assets.iter().map(|a| u64::from(a.new_count)).sum(),
        low_stock_count: assets.iter().filter(|a| a.new_count < a.threshold).count(),
        registered_san_count: san_records.len(),
        recent_transaction_count: transactions
            .iter()
            .filter(|t| t.timestamp > window_start)
            .count(),
    }
}

/// Full view state for one location, reloaded wholesale after every
/// mutation. Assets and transactions are location-scoped; the registry and
/// return feed are global.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub assets: Vec<Asset>,
    pub san_records: Vec<SanRecord>,
    pub san_returns: Vec<SanReturn>,
    pub transactions: Vec<TransactionRecord>,
}

impl Snapshot {
    pub fn load(store: &Store, location: &str) -> Self {
        let all_assets: Vec<Asset> = store.get_collection(store::ASSETS);
        let all_transactions: Vec<TransactionRecord> = store.get_collection(store::TRANSACTIONS);
        let san_records: Vec<SanRecord> = store.get_collection(store::SANS);
        let mut san_returns: Vec<SanReturn> = store.get_collection(store::RETURNS);

        let mut transactions = transactions_at(&all_transactions, location);
        sort_transactions_desc(&mut transactions);
        sort_returns_desc(&mut san_returns);

        Snapshot {
            assets: assets_at(&all_assets, location),
            san_records,
            san_returns,
            transactions,
        }
    }
}
