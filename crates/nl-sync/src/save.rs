//! The save blob: one JSON object wrapping every store's snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use nl_character::CharacterSnapshot;
use nl_inventory::{Inventory, InventorySnapshot};
use nl_map::{CityMap, MapSnapshot};
use nl_memory::NarrativeMemory;

use crate::error::{SyncError, SyncResult};

/// Version tag written into every save. Loading requires an exact match.
pub const SAVE_VERSION: &str = "1.0.0";

const SECTIONS: [&str; 5] = ["character", "map", "inventory", "narrative", "timestamp"];

/// Top-level layout of a save blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Character store.
    pub character: CharacterSnapshot,
    /// Map store.
    pub map: MapSnapshot,
    /// Inventory store.
    pub inventory: InventorySnapshot,
    /// Narrative memory.
    pub narrative: NarrativeMemory,
    /// When the save was written.
    pub timestamp: DateTime<Utc>,
    /// Format version, see [`SAVE_VERSION`].
    pub version: String,
}

impl SaveFile {
    /// Wrap store snapshots, stamped with the current time and version.
    pub fn new(
        character: CharacterSnapshot,
        map: MapSnapshot,
        inventory: InventorySnapshot,
        narrative: NarrativeMemory,
    ) -> Self {
        Self {
            character,
            map,
            inventory,
            narrative,
            timestamp: Utc::now(),
            version: SAVE_VERSION.to_string(),
        }
    }

    /// Serialize to the JSON blob.
    pub fn to_json(&self) -> SyncResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a blob and check every section.
    ///
    /// The version is checked before anything else, so a blob from another
    /// version is reported as such even if its layout differs.
    pub fn from_json(blob: &str) -> SyncResult<Self> {
        let value: Value = serde_json::from_str(blob)?;
        match value.get("version").and_then(Value::as_str) {
            None => return Err(SyncError::MissingSection("version")),
            Some(found) if found != SAVE_VERSION => {
                return Err(SyncError::VersionMismatch {
                    found: found.to_string(),
                });
            }
            Some(_) => {}
        }
        if let Some(missing) = SECTIONS.iter().find(|key| value.get(**key).is_none()) {
            return Err(SyncError::MissingSection(*missing));
        }
        let save: Self = serde_json::from_value(value)?;
        save.validate()?;
        Ok(save)
    }

    /// Run every store's snapshot check.
    pub fn validate(&self) -> SyncResult<()> {
        self.character.validate()?;
        Inventory::validate(&self.inventory)?;
        CityMap::validate(&self.map)?;
        Ok(())
    }
}
