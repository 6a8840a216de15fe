//! Sidebar settings and their persistence adapter.
//!
//! The sidebar settings object is the only persisted piece of dashboard state.
//! It is stored as a flat, unversioned JSON object under the
//! [`SIDEBAR_SETTINGS_KEY`] slot of a key-value [`SettingsStore`].
//!
//! Loading is fail-soft: a missing, unreadable or malformed value yields the
//! default settings and a log event, never an error.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage slot holding the sidebar settings.
pub const SIDEBAR_SETTINGS_KEY: &str = "sidebarSettings";

/// Error type for settings storage operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid settings key: {0}")]
    InvalidKey(String),
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value storage for serialized settings.
pub trait SettingsStore {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Delete the value under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), SettingsError>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        (**self).remove(key)
    }
}

/// In-process settings store, used by tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one raw value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, SettingsError> {
        self.values
            .lock()
            .map_err(|e| SettingsError::Unavailable(e.to_string()))
    }
}

impl SettingsStore for MemorySettingsStore {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Which edge of the screen the sidebar is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarPosition {
    #[default]
    Left,
    Right,
}

/// Dashboard colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

/// Persisted sidebar preferences.
///
/// Missing fields take their defaults and unknown fields are ignored, so a
/// value written by an older or newer build still loads.
// Allow: each flag is an independent toggle in the settings panel.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarSettings {
    pub position: SidebarPosition,
    pub theme: Theme,
    pub collapsed: bool,
    pub show_icons: bool,
    pub show_labels: bool,
    pub show_badges: bool,
    pub compact_mode: bool,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            position: SidebarPosition::Left,
            theme: Theme::Light,
            collapsed: false,
            show_icons: true,
            show_labels: true,
            show_badges: true,
            compact_mode: false,
        }
    }
}

/// Load/save boundary between a settings object and a [`SettingsStore`].
#[derive(Debug)]
pub struct SettingsAdapter<S, T = SidebarSettings> {
    store: S,
    key: String,
    _settings: PhantomData<fn() -> T>,
}

impl<S: SettingsStore> SettingsAdapter<S> {
    /// Adapter for the sidebar settings slot.
    pub fn sidebar(store: S) -> Self {
        Self::new(store, SIDEBAR_SETTINGS_KEY)
    }
}

impl<S, T> SettingsAdapter<S, T>
where
    S: SettingsStore,
    T: Serialize + DeserializeOwned + Default,
{
    /// Adapter for an arbitrary key.
    pub fn new(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            _settings: PhantomData,
        }
    }

    /// The storage key this adapter reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored settings, falling back to defaults.
    ///
    /// Never fails: read errors and malformed JSON are logged and replaced by
    /// `T::default()`.
    pub fn load(&self) -> T {
        let raw = match self.store.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored settings, using defaults");
                return T::default();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read settings, using defaults");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "malformed stored settings, using defaults");
            T::default()
        })
    }

    /// Serialize and store the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, settings: &T) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(settings)?;
        self.store.write(&self.key, &raw)
    }

    /// Delete the stored settings so the next load returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn reset(&self) -> Result<(), SettingsError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Store whose reads always fail.
    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, SettingsError> {
            Err(SettingsError::Unavailable("disk on fire".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), SettingsError> {
            Err(SettingsError::Unavailable("disk on fire".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), SettingsError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_returns_default() {
        let adapter = SettingsAdapter::sidebar(MemorySettingsStore::new());
        assert_eq!(adapter.load(), SidebarSettings::default());
    }

    #[test]
    fn test_load_malformed_returns_default() {
        let store = MemorySettingsStore::with_value(SIDEBAR_SETTINGS_KEY, "{ not json");
        let adapter = SettingsAdapter::sidebar(store);
        assert_eq!(adapter.load(), SidebarSettings::default());
    }

    #[test]
    fn test_load_wrong_shape_returns_default() {
        let store =
            MemorySettingsStore::with_value(SIDEBAR_SETTINGS_KEY, r#"{"theme": "neon"}"#);
        let adapter = SettingsAdapter::sidebar(store);
        assert_eq!(adapter.load(), SidebarSettings::default());
    }

    #[test]
    fn test_load_read_error_returns_default() {
        let adapter = SettingsAdapter::sidebar(BrokenStore);
        assert_eq!(adapter.load(), SidebarSettings::default());
        assert!(adapter.save(&SidebarSettings::default()).is_err());
    }

    #[test]
    fn test_load_partial_object_fills_defaults() {
        let store = MemorySettingsStore::with_value(
            SIDEBAR_SETTINGS_KEY,
            r#"{"position": "right", "collapsed": true, "legacyFlag": 1}"#,
        );
        let settings = SettingsAdapter::sidebar(store).load();

        assert_eq!(settings.position, SidebarPosition::Right);
        assert!(settings.collapsed);
        assert!(settings.show_icons);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn test_save_then_load() {
        let adapter = SettingsAdapter::sidebar(MemorySettingsStore::new());
        let settings = SidebarSettings {
            theme: Theme::Dark,
            compact_mode: true,
            ..SidebarSettings::default()
        };

        adapter.save(&settings).unwrap();
        assert_eq!(adapter.load(), settings);

        adapter.reset().unwrap();
        assert_eq!(adapter.load(), SidebarSettings::default());
    }

    #[test]
    fn test_serialized_shape_is_flat_camel_case() {
        let json = serde_json::to_value(SidebarSettings::default()).unwrap();
        assert_eq!(json["position"], "left");
        assert_eq!(json["showIcons"], true);
        assert_eq!(json["compactMode"], false);
        assert_eq!(json["showBadges"], true);
        assert_eq!(json.as_object().unwrap().len(), 7);
        assert!(json.get("version").is_none());
    }
}
