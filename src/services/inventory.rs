//! The inventory engine: reconciles quantity changes, serial-asset-number
//! registry constraints, and the transaction log as one logical operation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{Asset, CountAction, SanRecord, SanReturn, TransactionRecord};
use crate::queries;
use crate::store::{self, Store};
use crate::workspace::WorkspaceService;

/// Restock threshold applied when a new asset is created without one.
pub const DEFAULT_THRESHOLD: u32 = 10;

/// Result of a successful count mutation: the updated asset and the
/// transaction-log entry that recorded it.
#[derive(Debug, Clone)]
pub struct CountUpdate {
    pub asset: Asset,
    pub transaction: TransactionRecord,
}

/// Fields supplied when recording a physical hand-back.
#[derive(Debug, Clone)]
pub struct NewSanReturn {
    pub san_number: String,
    pub generation: String,
    pub returned_by: String,
    pub returned_to: String,
    pub notes: String,
}

/// Service for managing inventory counts and the SAN registry.
///
/// The sole writer of the asset, SAN, and transaction collections in normal
/// operation. Every operation validates fully before its first write, so a
/// failed call leaves no user-visible state change. The individual
/// collection writes of one operation are not atomic as a group (the store
/// has no cross-collection transaction); with a single writer this is
/// latent, but concurrent writers would need explicit serialization.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<Store>,
    workspace: WorkspaceService,
    event_sender: EventSender,
}

impl InventoryService {
    /// Creates a new inventory service instance
    pub fn new(store: Arc<Store>, workspace: WorkspaceService, event_sender: EventSender) -> Self {
        Self {
            store,
            workspace,
            event_sender,
        }
    }

    /// Applies a quantity change to an asset.
    ///
    /// For items whose catalog entry requires serial-asset-number evidence,
    /// `san_numbers` must hold exactly `quantity` entries: on `add` each must
    /// match the workspace's configured format and be absent from the
    /// registry; on `subtract` each must exist in the registry under the same
    /// item. All validation happens before any write, so a single bad serial
    /// in a multi-unit batch aborts the whole operation.
    ///
    /// Subtracting more than is on hand clamps the count at zero; that is
    /// the floor policy, not an error.
    #[instrument(skip(self, san_numbers))]
    pub async fn update_asset_count(
        &self,
        asset_id: &str,
        operation: CountAction,
        quantity: u32,
        san_numbers: Option<&[String]>,
    ) -> Result<CountUpdate, ServiceError> {
        if quantity == 0 {
            return Err(ServiceError::ValidationError(
                "quantity must be a positive integer".to_string(),
            ));
        }

        let mut assets: Vec<Asset> = self.store.get_collection(store::ASSETS);
        let index = assets
            .iter()
            .position(|a| a.id == asset_id)
            .ok_or_else(|| ServiceError::AssetNotFound(asset_id.to_string()))?;
        let item = assets[index].item.clone();
        let location = assets[index].location.clone();

        let san_required = self.workspace.requires_asset_number(&item);
        let applied_sans = if san_required {
            let supplied = san_numbers.unwrap_or(&[]);
            self.validate_sans(&item, operation, quantity, supplied)?;
            self.apply_registry_delta(&item, &location, operation, supplied)?;
            supplied
        } else {
            san_numbers.unwrap_or(&[])
        };

        let previous_count = assets[index].new_count;
        let new_count = match operation {
            CountAction::Add => previous_count.saturating_add(quantity),
            CountAction::Subtract => previous_count.saturating_sub(quantity),
        };
        assets[index].last_count = previous_count;
        assets[index].new_count = new_count;
        self.store.put_collection(store::ASSETS, &assets)?;
        let asset = assets[index].clone();

        let transaction = TransactionRecord {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            item: item.clone(),
            action: operation,
            san_number: Some(applied_sans.join(", ")).filter(|joined| !joined.is_empty()),
            volume: quantity,
            location: location.clone(),
        };
        let mut transactions: Vec<TransactionRecord> =
            self.store.get_collection(store::TRANSACTIONS);
        transactions.insert(0, transaction.clone());
        self.store
            .put_collection(store::TRANSACTIONS, &transactions)?;

        if san_required {
            for san in applied_sans {
                let event = match operation {
                    CountAction::Add => Event::SanRegistered {
                        san_number: san.clone(),
                        item: item.clone(),
                        location: location.clone(),
                    },
                    CountAction::Subtract => Event::SanReleased {
                        san_number: san.clone(),
                        item: item.clone(),
                    },
                };
                self.publish(event).await;
            }
        }
        self.publish(Event::AssetCountAdjusted {
            asset_id: asset.id.clone(),
            item,
            location,
            action: operation,
            volume: quantity,
            previous_count,
            new_count,
        })
        .await;

        Ok(CountUpdate { asset, transaction })
    }

    /// Validation pass over the supplied serials. Runs in full before any
    /// registry write; duplicates within one batch are rejected here so the
    /// registry's uniqueness invariant survives multi-unit requests.
    fn validate_sans(
        &self,
        item: &str,
        operation: CountAction,
        quantity: u32,
        supplied: &[String],
    ) -> Result<(), ServiceError> {
        let format = self.workspace.asset_number_config();
        if supplied.len() != quantity as usize {
            return Err(ServiceError::MissingSans {
                expected: quantity,
                display_name: format.display_name,
            });
        }

        let registry: Vec<SanRecord> = self.store.get_collection(store::SANS);
        let mut seen: HashSet<&str> = HashSet::with_capacity(supplied.len());

        match operation {
            CountAction::Add => {
                for san in supplied {
                    if !format.is_valid(san) {
                        return Err(ServiceError::InvalidSanFormat {
                            san: san.clone(),
                            description: format.description,
                        });
                    }
                    if !seen.insert(san.as_str()) || registry.iter().any(|r| &r.san_number == san) {
                        return Err(ServiceError::DuplicateSan(san.clone()));
                    }
                }
            }
            CountAction::Subtract => {
                for san in supplied {
                    let record = registry
                        .iter()
                        .find(|r| &r.san_number == san)
                        .ok_or_else(|| ServiceError::SanNotFound(san.clone()))?;
                    if record.item != item {
                        return Err(ServiceError::SanItemMismatch {
                            san: san.clone(),
                            registered_item: record.item.clone(),
                            requested_item: item.to_string(),
                        });
                    }
                    if !seen.insert(san.as_str()) {
                        return Err(ServiceError::SanNotFound(san.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Writes the registry delta for an already-validated batch.
    fn apply_registry_delta(
        &self,
        item: &str,
        location: &str,
        operation: CountAction,
        supplied: &[String],
    ) -> Result<(), ServiceError> {
        let mut registry: Vec<SanRecord> = self.store.get_collection(store::SANS);
        match operation {
            CountAction::Add => {
                let now = Utc::now();
                for san in supplied {
                    registry.push(SanRecord {
                        san_number: san.clone(),
                        item: item.to_string(),
                        timestamp: now,
                        location: location.to_string(),
                    });
                }
            }
            CountAction::Subtract => {
                registry.retain(|r| !supplied.contains(&r.san_number));
            }
        }
        self.store.put_collection(store::SANS, &registry)?;

        Ok(())
    }

    /// Changes an asset's restock threshold. Threshold edits are not
    /// inventory movements and leave no transaction-log entry.
    #[instrument(skip(self))]
    pub async fn update_threshold(
        &self,
        asset_id: &str,
        threshold: u32,
    ) -> Result<Asset, ServiceError> {
        let mut assets: Vec<Asset> = self.store.get_collection(store::ASSETS);
        let asset = assets
            .iter_mut()
            .find(|a| a.id == asset_id)
            .ok_or_else(|| ServiceError::AssetNotFound(asset_id.to_string()))?;
        asset.threshold = threshold;
        let updated = asset.clone();
        self.store.put_collection(store::ASSETS, &assets)?;

        self.publish(Event::ThresholdUpdated {
            asset_id: updated.id.clone(),
            threshold,
        })
        .await;

        Ok(updated)
    }

    /// Creates a new asset with zero counts. No SAN interaction; serials are
    /// only collected once stock is added.
    #[instrument(skip(self))]
    pub async fn add_asset(
        &self,
        item: &str,
        location: &str,
        threshold: Option<u32>,
    ) -> Result<Asset, ServiceError> {
        let asset = Asset {
            id: Uuid::new_v4().to_string(),
            item: item.to_string(),
            last_count: 0,
            new_count: 0,
            threshold: threshold.unwrap_or(DEFAULT_THRESHOLD),
            location: location.to_string(),
        };
        let mut assets: Vec<Asset> = self.store.get_collection(store::ASSETS);
        assets.push(asset.clone());
        self.store.put_collection(store::ASSETS, &assets)?;

        self.publish(Event::AssetCreated {
            asset_id: asset.id.clone(),
            item: asset.item.clone(),
            location: asset.location.clone(),
        })
        .await;

        Ok(asset)
    }

    /// Records a physical hand-back. Deliberately decoupled bookkeeping: it
    /// touches neither asset counts, the live registry, nor the transaction
    /// log, and does not verify the serial ever existed in the registry.
    #[instrument(skip(self, data))]
    pub async fn add_san_return(&self, data: NewSanReturn) -> Result<SanReturn, ServiceError> {
        let record = SanReturn {
            id: Uuid::new_v4().to_string(),
            san_number: data.san_number,
            generation: data.generation,
            returned_by: data.returned_by,
            returned_to: data.returned_to,
            notes: data.notes,
            timestamp: Utc::now(),
        };
        let mut returns: Vec<SanReturn> = self.store.get_collection(store::RETURNS);
        returns.insert(0, record.clone());
        self.store.put_collection(store::RETURNS, &returns)?;

        self.publish(Event::SanReturnRecorded {
            id: record.id.clone(),
            san_number: record.san_number.clone(),
        })
        .await;

        Ok(record)
    }

    /// Assets below their restock threshold, across all locations.
    pub fn get_low_stock_items(&self) -> Vec<Asset> {
        let assets: Vec<Asset> = self.store.get_collection(store::ASSETS);
        queries::low_stock(&assets)
    }

    async fn publish(&self, event: Event) {
        if let Err(err) = self.event_sender.send(event).await {
            warn!(error = %err, "event publication failed");
        }
    }
}
