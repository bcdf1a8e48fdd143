//! Persistent key-value stores backing [`AppSettings`](crate::AppSettings).
//!
//! Values are plain JSON so a store never needs to know the setting types;
//! the settings service decodes them with serde and treats anything that
//! fails to decode as absent.

use crate::error::{Result, SettingsError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Durability layer for settings.
pub trait SettingsStore {
    /// Read the raw stored value for `key`, if any.
    fn read(&self, key: &str) -> Option<Value>;

    /// Persist `value` under `key`.
    ///
    /// Must not return before the value is durable (or has failed to be).
    fn write(&mut self, key: &str, value: Value) -> Result<()>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`.
    pub fn with_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// The whole file is rewritten on every write, via a temporary file and a
/// rename so a crash mid-save never leaves a truncated file behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the first
    /// write. A file that is not a JSON object is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            log::info!("Loading settings from {:?}", path);
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Map::new()
            } else {
                serde_json::from_str::<Map<String, Value>>(&contents)?
            }
        } else {
            log::info!("Settings file not found, starting empty at {:?}", path);
            Map::new()
        };

        Ok(Self { path, entries })
    }

    /// Open the store at the platform default location.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path())
    }

    /// Default settings file path: `<config dir>/jotpad/settings.json`.
    pub fn default_path() -> PathBuf {
        Self::settings_dir().join("settings.json")
    }

    /// Directory holding the settings file.
    pub fn settings_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("jotpad")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("jotpad")
            } else {
                PathBuf::from(".")
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            // Keep the in-memory map in step with what is on disk.
            match previous {
                Some(old) => {
                    self.entries.insert(key.to_string(), old);
                }
                None => {
                    self.entries.remove(key);
                }
            }
            log::error!("Failed to save settings to {:?}: {}", self.path, e);
            return Err(match e {
                SettingsError::Io(io) => SettingsError::Persist {
                    key: key.to_string(),
                    reason: io.to_string(),
                },
                other => other,
            });
        }
        log::trace!("Persisted setting '{}'", key);
        Ok(())
    }
}
