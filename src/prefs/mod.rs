//! Category preference persistence
//!
//! A small facade over on-device storage of the user's selected event
//! categories, plus the opt-in flag controlling whether selections are
//! persisted at all.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Storage backend for the category selection
pub trait CategoryStore: Send + Sync {
    /// Load the saved category identifiers
    fn load_categories(&self) -> Result<Vec<String>>;

    /// Persist the category identifiers
    fn save_categories(&self, items: &[String]) -> Result<()>;

    /// Whether saving selections is currently enabled
    fn save_preference_enabled(&self) -> bool;

    /// Enable or disable persisting selections
    fn set_save_preference(&self, enabled: bool) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPrefs {
    #[serde(default)]
    save_preference_enabled: bool,
    #[serde(default)]
    categories: Vec<String>,
}

/// JSON file-backed category store
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over a JSON file path; the file is created lazily
    /// on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<StoredPrefs> {
        if !self.path.exists() {
            return Ok(StoredPrefs::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let prefs = serde_json::from_str(&raw)
            .map_err(|e| Error::store(format!("corrupt preference file: {e}")))?;
        Ok(prefs)
    }

    fn write(&self, prefs: &StoredPrefs) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl CategoryStore for JsonFileStore {
    fn load_categories(&self) -> Result<Vec<String>> {
        Ok(self.read()?.categories)
    }

    fn save_categories(&self, items: &[String]) -> Result<()> {
        let mut prefs = self.read()?;
        prefs.categories = items.to_vec();
        self.write(&prefs)
    }

    fn save_preference_enabled(&self) -> bool {
        self.read().map(|p| p.save_preference_enabled).unwrap_or(false)
    }

    fn set_save_preference(&self, enabled: bool) -> Result<()> {
        let mut prefs = self.read()?;
        prefs.save_preference_enabled = enabled;
        self.write(&prefs)
    }
}

/// Working category selection backed by a [`CategoryStore`].
///
/// Holds the in-progress selection for a category picker and writes it
/// through to the store when the user confirms, honoring the
/// save-preference flag.
pub struct CategorySelection {
    items: Vec<String>,
    store: Arc<dyn CategoryStore>,
}

impl CategorySelection {
    /// Create a selection seeded from the store's saved categories
    pub fn new(store: Arc<dyn CategoryStore>) -> Result<Self> {
        let items = store.load_categories()?;
        Ok(Self { items, store })
    }

    /// The current working selection
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replace the working selection
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
    }

    /// Persist the working selection, if saving is enabled
    pub fn save(&self) -> Result<()> {
        if !self.store.save_preference_enabled() {
            debug!("save preference disabled, selection not persisted");
            return Ok(());
        }
        self.store.save_categories(&self.items)
    }

    /// Enable or disable persisting selections
    pub fn set_save_preference(&self, enabled: bool) -> Result<()> {
        self.store.set_save_preference(enabled)
    }

    /// Refresh the working selection from the store
    pub fn reload_items(&mut self) -> Result<()> {
        self.items = self.store.load_categories()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
