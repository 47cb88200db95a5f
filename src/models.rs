//! Domain records persisted by the store.
//!
//! Field names serialize in camelCase so stored documents, the HTTP API, and
//! the export/import format all share one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CountAction {
    Add,
    Subtract,
}

/// One tracked item type at one location.
///
/// `last_count` is a rolling snapshot of the count before the most recent
/// mutation; the transaction log is the authoritative history. By convention
/// there is at most one asset per (item, location) pair, though callers are
/// responsible for not creating duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub item: String,
    pub last_count: u32,
    pub new_count: u32,
    pub threshold: u32,
    pub location: String,
}

/// Registry entry binding a serial asset number to the unit currently
/// carrying it. `san_number` is unique across the registry at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SanRecord {
    pub san_number: String,
    pub item: String,
    pub timestamp: DateTime<Utc>,
    pub location: String,
}

/// Audit record of a device physically handed back to a custodian or stock
/// pool. Append-only and intentionally decoupled from the live registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SanReturn {
    pub id: String,
    pub san_number: String,
    pub generation: String,
    pub returned_by: String,
    pub returned_to: String,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

/// Immutable audit entry for a count change. `san_number` holds the
/// comma-joined serial numbers involved in the movement, absent when none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub item: String,
    pub action: CountAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub san_number: Option<String>,
    pub volume: u32,
    pub location: String,
}
