//! Export, import, and full reset of the stored data set.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{Asset, SanRecord, SanReturn, TransactionRecord};
use crate::store::{self, Store};
use crate::workspace::WorkspaceConfig;

/// The single-document interchange format. Everything the service stores,
/// in one JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_config: Option<WorkspaceConfig>,
    pub assets: Vec<Asset>,
    pub sans: Vec<SanRecord>,
    pub returns: Vec<SanReturn>,
    pub transactions: Vec<TransactionRecord>,
    pub exported_at: DateTime<Utc>,
}

/// Import payload: any key may be omitted, and an omitted key leaves the
/// corresponding stored collection untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub workspace_config: Option<WorkspaceConfig>,
    #[serde(default)]
    pub assets: Option<Vec<Asset>>,
    #[serde(default)]
    pub sans: Option<Vec<SanRecord>>,
    #[serde(default)]
    pub returns: Option<Vec<SanReturn>>,
    #[serde(default)]
    pub transactions: Option<Vec<TransactionRecord>>,
}

/// Collection sizes after an import, for the response body and event.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub assets: usize,
    pub sans: usize,
    pub returns: usize,
    pub transactions: usize,
}

#[derive(Clone)]
pub struct DataTransferService {
    store: Arc<Store>,
    event_sender: EventSender,
}

impl DataTransferService {
    pub fn new(store: Arc<Store>, event_sender: EventSender) -> Self {
        Self {
            store,
            event_sender,
        }
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            workspace_config: self.store.get_config(),
            assets: self.store.get_collection(store::ASSETS),
            sans: self.store.get_collection(store::SANS),
            returns: self.store.get_collection(store::RETURNS),
            transactions: self.store.get_collection(store::TRANSACTIONS),
            exported_at: Utc::now(),
        }
    }

    pub fn export_json(&self) -> Result<String, ServiceError> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Replaces stored collections from an exported document.
    ///
    /// The whole payload is parsed before anything is written: a malformed
    /// document fails with [`ServiceError::ImportParse`] and leaves every
    /// stored collection untouched. Keys present in the document replace
    /// their collection wholesale; absent keys change nothing.
    #[instrument(skip(self, payload), fields(payload_bytes = payload.len()))]
    pub async fn import_json(&self, payload: &str) -> Result<ImportSummary, ServiceError> {
        let document: ImportDocument = serde_json::from_str(payload)
            .map_err(|err| ServiceError::ImportParse(err.to_string()))?;

        if let Some(config) = &document.workspace_config {
            self.store.put_config(config)?;
        }
        if let Some(assets) = &document.assets {
            self.store.put_collection(store::ASSETS, assets)?;
        }
        if let Some(sans) = &document.sans {
            self.store.put_collection(store::SANS, sans)?;
        }
        if let Some(returns) = &document.returns {
            self.store.put_collection(store::RETURNS, returns)?;
        }
        if let Some(transactions) = &document.transactions {
            self.store.put_collection(store::TRANSACTIONS, transactions)?;
        }

        let summary = ImportSummary {
            assets: self.count(store::ASSETS, &document.assets),
            sans: self.count(store::SANS, &document.sans),
            returns: self.count(store::RETURNS, &document.returns),
            transactions: self.count(store::TRANSACTIONS, &document.transactions),
        };

        if let Err(err) = self
            .event_sender
            .send(Event::DataImported {
                assets: summary.assets,
                sans: summary.sans,
                returns: summary.returns,
                transactions: summary.transactions,
            })
            .await
        {
            tracing::warn!(error = %err, "event publication failed");
        }

        Ok(summary)
    }

    fn count<T>(&self, key: &str, imported: &Option<Vec<T>>) -> usize {
        match imported {
            Some(items) => items.len(),
            None => self.store.get_collection::<serde_json::Value>(key).len(),
        }
    }

    /// Removes every stored collection and the workspace configuration.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), ServiceError> {
        self.store.clear_all()?;
        if let Err(err) = self.event_sender.send(Event::DataCleared).await {
            tracing::warn!(error = %err, "event publication failed");
        }
        Ok(())
    }
}
