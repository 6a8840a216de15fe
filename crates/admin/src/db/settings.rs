//! File-backed settings storage.
//!
//! Each key is stored as `<dir>/<key>.json`. The directory is created on the
//! first write.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use storedesk_core::{SettingsError, SettingsStore};
use tempfile::NamedTempFile;

/// Settings store keeping one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    dir: PathBuf,
}

impl FileSettingsStore {
    /// Store rooted at `dir`. Nothing is touched until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the settings files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidKey`] unless the key is a non-empty run
    /// of ASCII letters, digits, `-` and `_`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SettingsError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SettingsError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SettingsStore for FileSettingsStore {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // One temp file per writer, renamed into place.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        tracing::debug!(path = %path.display(), "settings written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storedesk_core::{SettingsAdapter, SidebarPosition, SidebarSettings, Theme};

    use super::*;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("nested"));
        assert_eq!(store.read("sidebarSettings").unwrap(), None);
        assert!(store.remove("sidebarSettings").is_ok());
    }

    #[test]
    fn test_write_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("nested"));

        store.write("sidebarSettings", r#"{"theme":"dark"}"#).unwrap();
        assert!(dir.path().join("nested/sidebarSettings.json").exists());
        assert_eq!(
            store.read("sidebarSettings").unwrap().as_deref(),
            Some(r#"{"theme":"dark"}"#)
        );

        store.remove("sidebarSettings").unwrap();
        assert_eq!(store.read("sidebarSettings").unwrap(), None);
    }

    #[test]
    fn test_concurrent_writes_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path());

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|writer| {
                    let store = &store;
                    scope.spawn(move || {
                        (0..50)
                            .filter(|round| {
                                let value = format!(r#"{{"writer":{writer},"round":{round}}}"#);
                                store.write("sidebarSettings", &value).is_err()
                            })
                            .count()
                    })
                })
                .collect();
            let failures: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
            assert_eq!(failures, 0);
        });

        let stored = store.read("sidebarSettings").unwrap().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&stored).is_ok());

        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path());

        for key in ["", "../escape", "a/b", "sidebar.json"] {
            assert!(matches!(
                store.write(key, "{}"),
                Err(SettingsError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_adapter_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SidebarSettings {
            position: SidebarPosition::Right,
            theme: Theme::Dark,
            ..SidebarSettings::default()
        };

        SettingsAdapter::sidebar(FileSettingsStore::new(dir.path()))
            .save(&settings)
            .unwrap();
        let reloaded = SettingsAdapter::sidebar(FileSettingsStore::new(dir.path())).load();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sidebarSettings.json"), "{not json").unwrap();

        let loaded = SettingsAdapter::sidebar(FileSettingsStore::new(dir.path())).load();
        assert_eq!(loaded, SidebarSettings::default());
    }
}
