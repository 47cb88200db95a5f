//! Workspace configuration: the tenant-level singleton owning locations,
//! the asset-type catalog, and the serial-asset-number format.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::presets;
use crate::store::Store;

pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    pub version: u32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub locations: Vec<WorkspaceLocation>,
    pub asset_types: Vec<AssetTypeConfig>,
    pub asset_number_config: AssetNumberConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceLocation {
    pub id: String,
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetTypeConfig {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub requires_asset_number: bool,
}

/// Serial-asset-number format, stored as data so each workspace can carry
/// its own validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetNumberConfig {
    pub display_name: String,
    pub pattern: String,
    pub ocr_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub placeholder: String,
    pub description: String,
}

impl Default for AssetNumberConfig {
    fn default() -> Self {
        Self {
            display_name: "Asset Number".to_string(),
            pattern: r"^\d{5,6}$".to_string(),
            ocr_pattern: r"\b(\d{5,6})\b".to_string(),
            prefix: None,
            placeholder: "e.g. 12345".to_string(),
            description: "5-6 digit number".to_string(),
        }
    }
}

impl AssetNumberConfig {
    /// Applies the configured pattern to `value`. A pattern that does not
    /// compile validates nothing.
    pub fn is_valid(&self, value: &str) -> bool {
        match Regex::new(&self.pattern) {
            Ok(re) => re.is_match(value),
            Err(err) => {
                warn!(pattern = %self.pattern, error = %err, "asset number pattern does not compile");
                false
            }
        }
    }
}

/// Derives a stable identifier from a display name: lower-cased, runs of
/// non-alphanumeric characters collapsed to a single `-`, leading and
/// trailing separators trimmed. Idempotent, so the same name always yields
/// the same id.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Which starting configuration to install for a new workspace.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", tag = "preset")]
pub enum WorkspacePreset {
    /// Demo workspace with locations, a full asset-type catalog, and seeded
    /// inventory data.
    Demo,
    /// Empty workspace with an alphanumeric asset-number format.
    Blank { name: String },
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetTypeUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub requires_asset_number: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetNumberConfigUpdate {
    pub display_name: Option<String>,
    pub pattern: Option<String>,
    pub ocr_pattern: Option<String>,
    pub prefix: Option<String>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
}

/// Owns the workspace configuration singleton. The sole writer of the
/// `workspace_config` record; every mutator is a read-modify-write of the
/// whole config object.
#[derive(Clone)]
pub struct WorkspaceService {
    store: Arc<Store>,
}

impl WorkspaceService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn config(&self) -> Option<WorkspaceConfig> {
        self.store.get_config()
    }

    pub fn has_config(&self) -> bool {
        self.store.get_config().is_some()
    }

    pub fn save_config(&self, config: &WorkspaceConfig) -> Result<(), ServiceError> {
        self.store.put_config(config)
    }

    pub fn delete_config(&self) -> Result<(), ServiceError> {
        self.store.delete_config()
    }

    fn require_config(&self) -> Result<WorkspaceConfig, ServiceError> {
        self.config()
            .ok_or_else(|| ServiceError::NotFound("workspace is not configured".to_string()))
    }

    /// Installs a starting configuration. The demo preset also seeds the
    /// inventory collections with sample data.
    #[instrument(skip(self))]
    pub fn install_preset(&self, preset: WorkspacePreset) -> Result<WorkspaceConfig, ServiceError> {
        let config = match preset {
            WorkspacePreset::Demo => {
                let config = presets::demo_config();
                self.save_config(&config)?;
                presets::seed_demo_data(&self.store)?;
                config
            }
            WorkspacePreset::Blank { name } => {
                let config = presets::blank_config(name);
                self.save_config(&config)?;
                config
            }
        };
        Ok(config)
    }

    // Location helpers

    pub fn locations(&self) -> Vec<WorkspaceLocation> {
        self.config().map(|c| c.locations).unwrap_or_default()
    }

    pub fn find_location(&self, id: &str) -> Option<WorkspaceLocation> {
        self.locations().into_iter().find(|l| l.id == id)
    }

    #[instrument(skip(self))]
    pub fn add_location(
        &self,
        name: &str,
        short_name: &str,
    ) -> Result<WorkspaceLocation, ServiceError> {
        let mut config = self.require_config()?;
        let location = WorkspaceLocation {
            id: slugify(name),
            name: name.to_string(),
            short_name: short_name.to_string(),
        };
        config.locations.push(location.clone());
        self.save_config(&config)?;
        Ok(location)
    }

    #[instrument(skip(self))]
    pub fn update_location(&self, id: &str, updates: LocationUpdate) -> Result<(), ServiceError> {
        let mut config = self.require_config()?;
        let location = config
            .locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("location {id} not found")))?;
        if let Some(name) = updates.name {
            location.name = name;
        }
        if let Some(short_name) = updates.short_name {
            location.short_name = short_name;
        }
        self.save_config(&config)
    }

    #[instrument(skip(self))]
    pub fn remove_location(&self, id: &str) -> Result<(), ServiceError> {
        let mut config = self.require_config()?;
        config.locations.retain(|l| l.id != id);
        self.save_config(&config)
    }

    // Asset type helpers

    pub fn asset_types(&self) -> Vec<AssetTypeConfig> {
        self.config().map(|c| c.asset_types).unwrap_or_default()
    }

    pub fn find_asset_type(&self, id: &str) -> Option<AssetTypeConfig> {
        self.asset_types().into_iter().find(|t| t.id == id)
    }

    /// Whether stocking `item_name` requires serial-asset-number evidence.
    ///
    /// Resolution is by exact catalog name; items absent from the catalog
    /// (free-text entries) never require one. Renaming a catalog entry
    /// detaches existing records that reference the old name, so renames
    /// should be treated as catalog removals plus additions.
    pub fn requires_asset_number(&self, item_name: &str) -> bool {
        self.asset_types()
            .iter()
            .find(|t| t.name == item_name)
            .map(|t| t.requires_asset_number)
            .unwrap_or(false)
    }

    #[instrument(skip(self))]
    pub fn add_asset_type(
        &self,
        name: &str,
        requires_asset_number: bool,
        category: Option<String>,
    ) -> Result<AssetTypeConfig, ServiceError> {
        let mut config = self.require_config()?;
        let asset_type = AssetTypeConfig {
            id: slugify(name),
            name: name.to_string(),
            category,
            requires_asset_number,
        };
        config.asset_types.push(asset_type.clone());
        self.save_config(&config)?;
        Ok(asset_type)
    }

    #[instrument(skip(self))]
    pub fn update_asset_type(&self, id: &str, updates: AssetTypeUpdate) -> Result<(), ServiceError> {
        let mut config = self.require_config()?;
        let asset_type = config
            .asset_types
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("asset type {id} not found")))?;
        if let Some(name) = updates.name {
            asset_type.name = name;
        }
        if let Some(category) = updates.category {
            asset_type.category = Some(category);
        }
        if let Some(requires) = updates.requires_asset_number {
            asset_type.requires_asset_number = requires;
        }
        self.save_config(&config)
    }

    #[instrument(skip(self))]
    pub fn remove_asset_type(&self, id: &str) -> Result<(), ServiceError> {
        let mut config = self.require_config()?;
        config.asset_types.retain(|t| t.id != id);
        self.save_config(&config)
    }

    // Asset number format

    /// The configured serial-number format, or the numeric default when the
    /// workspace has not been configured yet.
    pub fn asset_number_config(&self) -> AssetNumberConfig {
        self.config()
            .map(|c| c.asset_number_config)
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub fn update_asset_number_config(
        &self,
        updates: AssetNumberConfigUpdate,
    ) -> Result<AssetNumberConfig, ServiceError> {
        let mut config = self.require_config()?;
        let current = &mut config.asset_number_config;
        if let Some(display_name) = updates.display_name {
            current.display_name = display_name;
        }
        if let Some(pattern) = updates.pattern {
            current.pattern = pattern;
        }
        if let Some(ocr_pattern) = updates.ocr_pattern {
            current.ocr_pattern = ocr_pattern;
        }
        if let Some(prefix) = updates.prefix {
            current.prefix = Some(prefix);
        }
        if let Some(placeholder) = updates.placeholder {
            current.placeholder = placeholder;
        }
        if let Some(description) = updates.description {
            current.description = description;
        }
        let updated = current.clone();
        self.save_config(&config)?;
        Ok(updated)
    }

    pub fn validate_asset_number(&self, value: &str) -> bool {
        self.asset_number_config().is_valid(value)
    }

    #[instrument(skip(self))]
    pub fn update_name(&self, name: &str) -> Result<(), ServiceError> {
        let mut config = self.require_config()?;
        config.name = name.to_string();
        self.save_config(&config)
    }
}
