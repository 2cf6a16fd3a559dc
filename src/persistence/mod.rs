//! Settings storage behind an injected trait
//!
//! The simulation never reads storage itself: the host loads `Settings`
//! through a [`SettingsStore`] and passes them into `MatchConfig::new`. Any
//! storage failure falls back to defaults.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::settings::Settings;

/// Backend that can load and save settings
pub trait SettingsStore {
    /// Stored settings, or `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<Settings>, StoreError>;
    fn save(&self, settings: &Settings) -> Result<(), StoreError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Option<Settings>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(settings)?;
        // Atomic replace via sibling temp file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

/// In-process store for tests and hosts without storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw JSON (may be partial or invalid)
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(json.into())),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<Settings>, StoreError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        match slot.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let json = serde_json::to_string(settings)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        *slot = Some(json);
        Ok(())
    }
}

/// Load settings, falling back to defaults on any problem
pub fn load_or_default(store: &dyn SettingsStore) -> Settings {
    match store.load() {
        Ok(Some(settings)) => match settings.validate() {
            Ok(()) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Stored settings rejected ({e}), using defaults");
                Settings::default()
            }
        },
        Ok(None) => {
            log::info!("No stored settings, using defaults");
            Settings::default()
        }
        Err(e) => {
            log::warn!("Failed to load settings ({e}), using defaults");
            Settings::default()
        }
    }
}

/// Merge `update` into the stored settings and save
pub fn update_settings(
    store: &dyn SettingsStore,
    update: impl FnOnce(&mut Settings),
) -> Result<Settings, StoreError> {
    let mut settings = load_or_default(store);
    update(&mut settings);
    store.save(&settings)?;
    Ok(settings)
}
