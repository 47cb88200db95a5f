//! Persistence adapter over an embedded sled database.
//!
//! Each collection lives under a single key as one JSON array; the only
//! operations are whole-collection read and whole-collection replace, so
//! every higher-level mutation is a read-modify-write cycle. There is no
//! transaction spanning collections: a multi-collection operation that fails
//! midway can leave collections mutually inconsistent. Callers that
//! introduce concurrent writers must add their own serialization on top.
//!
//! Reads are lenient: missing or malformed stored data is treated as an
//! empty collection (or absent config) and logged, never surfaced as an
//! error.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::errors::ServiceError;
use crate::workspace::WorkspaceConfig;

/// Collection keys. The full key set is enumerated by [`Store::clear_all`].
pub const ASSETS: &str = "assets";
pub const SANS: &str = "sans";
pub const RETURNS: &str = "returns";
pub const TRANSACTIONS: &str = "transactions";
pub const WORKSPACE_CONFIG: &str = "workspace_config";

const ALL_KEYS: [&str; 5] = [ASSETS, SANS, RETURNS, TRANSACTIONS, WORKSPACE_CONFIG];

pub struct Store {
    db: sled::Db,
}

impl Store {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let db = sled::Config::new()
            .path(path)
            .mode(sled::Mode::HighThroughput)
            .flush_every_ms(Some(1000))
            .open()?;
        db.flush()?;
        Ok(Self { db })
    }

    /// Reads a whole collection. Missing or undecodable data reads as empty.
    pub fn get_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let bytes = match self.db.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key, error = %err, "collection read failed, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(err) => {
                warn!(key, error = %err, "stored collection is malformed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replaces a whole collection and flushes to disk.
    pub fn put_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), ServiceError> {
        let json = serde_json::to_vec(items)?;
        self.db.insert(key, json)?;
        self.db.flush()?;
        Ok(())
    }

    /// Reads the workspace configuration, `None` when absent or malformed.
    pub fn get_config(&self) -> Option<WorkspaceConfig> {
        let bytes = match self.db.get(WORKSPACE_CONFIG) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "workspace config read failed");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(error = %err, "stored workspace config is malformed");
                None
            }
        }
    }

    pub fn put_config(&self, config: &WorkspaceConfig) -> Result<(), ServiceError> {
        let json = serde_json::to_vec(config)?;
        self.db.insert(WORKSPACE_CONFIG, json)?;
        self.db.flush()?;
        Ok(())
    }

    pub fn delete_config(&self) -> Result<(), ServiceError> {
        self.db.remove(WORKSPACE_CONFIG)?;
        self.db.flush()?;
        Ok(())
    }

    /// Cheap liveness probe against the underlying database.
    pub fn health_check(&self) -> Result<(), ServiceError> {
        self.db.contains_key(WORKSPACE_CONFIG)?;
        Ok(())
    }

    /// Removes every collection and the workspace configuration.
    pub fn clear_all(&self) -> Result<(), ServiceError> {
        for key in ALL_KEYS {
            self.db.remove(key)?;
        }
        self.db.flush()?;
        Ok(())
    }
}
