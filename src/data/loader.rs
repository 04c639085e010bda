//! RON data loader
//!
//! Loads creature and item tables from the data directory, with fallback
//! to the built-in defaults. Tables may be authored as RON or JSON.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::creatures::{default_creature_templates, CreatureTemplate, CreatureTemplates};
use super::items::{default_item_templates, ItemTemplate, ItemTemplates};
use crate::error::DataError;

/// Manages all external game data
#[derive(Debug, Clone, Default)]
pub struct DataManager {
    pub creatures: CreatureTemplates,
    pub items: ItemTemplates,
}

impl DataManager {
    /// Load from `dir`, logging any failure and using defaults instead
    pub fn new(dir: &Path) -> Self {
        Self::load(dir).unwrap_or_else(|e| {
            log::warn!("Failed to load data files: {}. Using defaults.", e);
            Self::defaults()
        })
    }

    /// Built-in tables only
    pub fn defaults() -> Self {
        Self {
            creatures: default_creature_templates(),
            items: default_item_templates(),
        }
    }

    /// Load every table from `dir`. Missing files fall back to defaults;
    /// files that exist but do not parse are errors.
    pub fn load(dir: &Path) -> Result<Self, DataError> {
        Ok(Self {
            creatures: load_table(dir, "creatures", default_creature_templates)?,
            items: load_table(dir, "items", default_item_templates)?,
        })
    }

    /// Creature row by name
    pub fn creature(&self, name: &str) -> Result<&CreatureTemplate, DataError> {
        self.creatures
            .find(name)
            .ok_or_else(|| DataError::UnknownCreature(name.to_string()))
    }

    /// Item row by name
    pub fn item(&self, name: &str) -> Result<&ItemTemplate, DataError> {
        self.items
            .find(name)
            .ok_or_else(|| DataError::UnknownItem(name.to_string()))
    }
}

/// Read `<stem>.ron`, else `<stem>.json`, else the default table
fn load_table<T: DeserializeOwned>(
    dir: &Path,
    stem: &str,
    default: fn() -> T,
) -> Result<T, DataError> {
    let ron_path = dir.join(format!("{stem}.ron"));
    if ron_path.exists() {
        let content = read(&ron_path)?;
        let table = ron::from_str(&content).map_err(|source| DataError::Ron {
            path: ron_path.clone(),
            source,
        })?;
        log::info!("Loaded {}", ron_path.display());
        return Ok(table);
    }

    let json_path = dir.join(format!("{stem}.json"));
    if json_path.exists() {
        let content = read(&json_path)?;
        let table = serde_json::from_str(&content).map_err(|source| DataError::Json {
            path: json_path.clone(),
            source,
        })?;
        log::info!("Loaded {}", json_path.display());
        return Ok(table);
    }

    log::info!("No {} table in {}, using built-in defaults", stem, dir.display());
    Ok(default())
}

fn read(path: &Path) -> Result<String, DataError> {
    fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_ron<T: Serialize>(dir: &Path, file: &str, what: &'static str, value: &T) -> Result<(), DataError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|source| DataError::Serialize { what, source })?;
    let path = dir.join(file);
    fs::write(&path, text).map_err(|source| DataError::Io { path, source })
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(dir: &Path) -> Result<(), DataError> {
    fs::create_dir_all(dir).map_err(|source| DataError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    write_ron(dir, "creatures.ron", "creatures", &default_creature_templates())?;
    write_ron(dir, "items.ron", "items", &default_item_templates())?;
    log::info!("Exported default data to {}", dir.display());
    Ok(())
}
