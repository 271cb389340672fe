//! Saved filter presets, persisted as one JSON file.
//!
//! The file holds a flat array of presets. Loading is per-entry tolerant: a
//! malformed entry (wrong shape, unknown enum member) is dropped while the
//! rest survive, so one bad write never wipes the collection.

use crate::errors::PresetError;
use serde::{Deserialize, Serialize};
use shared_types::TimeSource;
use std::path::PathBuf;
use std::sync::Arc;
use tm_03_store::FilterCriteria;
use tracing::{debug, warn};
use uuid::Uuid;

/// A named, saved set of filter criteria.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    pub id: String,
    pub name: String,
    pub filters: FilterCriteria,
    /// Creation instant, epoch milliseconds. Presets list newest first.
    pub created_at: i64,
}

/// File-backed preset collection.
pub struct PresetStore {
    path: PathBuf,
    time: Arc<dyn TimeSource>,
}

impl PresetStore {
    pub fn new(path: PathBuf, time: Arc<dyn TimeSource>) -> Self {
        Self { path, time }
    }

    /// Loads all valid presets, newest first. A missing or unreadable file
    /// yields an empty collection.
    pub fn load(&self) -> Vec<FilterPreset> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        let Ok(entries) = serde_json::from_str::<Vec<serde_json::Value>>(&raw) else {
            warn!(path = %self.path.display(), "Preset file is not a JSON array, ignoring");
            return Vec::new();
        };

        let total = entries.len();
        let mut presets: Vec<FilterPreset> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if presets.len() < total {
            warn!(
                dropped = total - presets.len(),
                "Dropped malformed preset entries"
            );
        }

        presets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        presets
    }

    /// Saves a new preset and returns the updated collection.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank after trimming
    /// - `Io`/`Serialize` when the file cannot be written
    pub fn save(
        &self,
        name: &str,
        filters: FilterCriteria,
    ) -> Result<Vec<FilterPreset>, PresetError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PresetError::EmptyName);
        }

        let preset = FilterPreset {
            id: Uuid::new_v4().to_string(),
            name: trimmed.to_string(),
            filters,
            created_at: self.time.now_millis(),
        };
        debug!(name = %preset.name, "Saving preset");

        let mut presets = self.load();
        presets.insert(0, preset);
        self.persist(&presets)?;
        Ok(presets)
    }

    /// Deletes a preset by id (a no-op for unknown ids) and returns the
    /// updated collection.
    pub fn delete(&self, id: &str) -> Result<Vec<FilterPreset>, PresetError> {
        let mut presets = self.load();
        presets.retain(|p| p.id != id);
        self.persist(&presets)?;
        Ok(presets)
    }

    fn persist(&self, presets: &[FilterPreset]) -> Result<(), PresetError> {
        let json = serde_json::to_string_pretty(presets)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
