pub mod assets;
pub mod data;
pub mod health;
pub mod returns;
pub mod sans;
pub mod transactions;
pub mod workspace;

use std::sync::Arc;

use crate::events::EventSender;
use crate::services::data_transfer::DataTransferService;
use crate::services::inventory::InventoryService;
use crate::store::Store;
use crate::workspace::WorkspaceService;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub workspace: WorkspaceService,
    pub inventory: InventoryService,
    pub data_transfer: DataTransferService,
}

impl AppServices {
    pub fn new(store: Arc<Store>, event_sender: EventSender) -> Self {
        let workspace = WorkspaceService::new(store.clone());
        let inventory =
            InventoryService::new(store.clone(), workspace.clone(), event_sender.clone());
        let data_transfer = DataTransferService::new(store, event_sender);
        Self {
            workspace,
            inventory,
            data_transfer,
        }
    }
}
