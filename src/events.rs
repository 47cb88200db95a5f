//! Domain events published after successful mutations.
//!
//! Publication is best-effort: operations never fail because the event
//! channel is gone, and a reported success always reflects persisted state.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

use crate::models::CountAction;

/// Events emitted by the inventory engine and surrounding services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    AssetCreated {
        asset_id: String,
        item: String,
        location: String,
    },
    AssetCountAdjusted {
        asset_id: String,
        item: String,
        location: String,
        action: CountAction,
        volume: u32,
        previous_count: u32,
        new_count: u32,
    },
    ThresholdUpdated {
        asset_id: String,
        threshold: u32,
    },
    SanRegistered {
        san_number: String,
        item: String,
        location: String,
    },
    SanReleased {
        san_number: String,
        item: String,
    },
    SanReturnRecorded {
        id: String,
        san_number: String,
    },
    WorkspaceConfigured {
        name: String,
    },
    DataImported {
        assets: usize,
        sans: usize,
        returns: usize,
        transactions: usize,
    },
    DataCleared,
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Runs until every sender is
/// dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(event = ?event, "event processed");
    }
    info!("event channel closed, processor exiting");
}
