//! Sidebar settings commands.
//!
//! Operates on the same file store the admin server reads, so a running
//! server picks up changes on its next settings request.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use thiserror::Error;
use tracing::info;

use storedesk_admin::db::FileSettingsStore;
use storedesk_core::{SettingsAdapter, SettingsError, SidebarPosition, SidebarSettings, Theme};

/// Errors from settings commands.
#[derive(Debug, Error)]
pub enum SettingsCommandError {
    #[error("Settings store error: {0}")]
    Store(#[from] SettingsError),

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Nothing to change: pass --theme, --position or --collapsed")]
    NothingToChange,
}

/// Theme accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
            ThemeArg::System => Self::System,
        }
    }
}

/// Sidebar position accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PositionArg {
    Left,
    Right,
}

impl From<PositionArg> for SidebarPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Left => Self::Left,
            PositionArg::Right => Self::Right,
        }
    }
}

fn adapter(dir: &Path) -> SettingsAdapter<FileSettingsStore> {
    SettingsAdapter::sidebar(FileSettingsStore::new(dir.to_path_buf()))
}

fn print(settings: &SidebarSettings, out: &mut impl Write) -> Result<(), SettingsCommandError> {
    writeln!(out, "{}", serde_json::to_string_pretty(settings)?)?;
    Ok(())
}

/// Print the effective sidebar settings as JSON.
///
/// Missing or malformed stored values print the defaults.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn show(dir: &Path, out: &mut impl Write) -> Result<(), SettingsCommandError> {
    print(&adapter(dir).load(), out)
}

/// Delete the stored sidebar settings.
///
/// # Errors
///
/// Returns an error if the settings file cannot be removed.
pub fn reset(dir: &Path) -> Result<(), SettingsCommandError> {
    adapter(dir).reset()?;
    info!(dir = %dir.display(), "Sidebar settings reset to defaults");
    Ok(())
}

/// Update the given fields, save, and print the result.
///
/// Fields not passed keep their current value.
///
/// # Errors
///
/// Returns an error if no field is given or the settings cannot be saved.
pub fn set(
    dir: &Path,
    theme: Option<ThemeArg>,
    position: Option<PositionArg>,
    collapsed: Option<bool>,
    out: &mut impl Write,
) -> Result<(), SettingsCommandError> {
    if theme.is_none() && position.is_none() && collapsed.is_none() {
        return Err(SettingsCommandError::NothingToChange);
    }

    let adapter = adapter(dir);
    let mut settings = adapter.load();
    if let Some(theme) = theme {
        settings.theme = theme.into();
    }
    if let Some(position) = position {
        settings.position = position.into();
    }
    if let Some(collapsed) = collapsed {
        settings.collapsed = collapsed;
    }

    adapter.save(&settings)?;
    info!(dir = %dir.display(), "Sidebar settings saved");
    print(&settings, out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shown(dir: &Path) -> SidebarSettings {
        let mut out = Vec::new();
        show(dir, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_show_without_file_prints_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(shown(dir.path()), SidebarSettings::default());
    }

    #[test]
    fn test_set_keeps_unspecified_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        set(dir.path(), Some(ThemeArg::Dark), None, Some(true), &mut out).unwrap();
        set(dir.path(), None, Some(PositionArg::Right), None, &mut out).unwrap();

        let settings = shown(dir.path());
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.position, SidebarPosition::Right);
        assert!(settings.collapsed);
        assert!(settings.show_icons);
    }

    #[test]
    fn test_set_without_fields_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        let result = set(dir.path(), None, None, None, &mut out);
        assert!(matches!(result, Err(SettingsCommandError::NothingToChange)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        set(dir.path(), Some(ThemeArg::System), None, None, &mut out).unwrap();

        reset(dir.path()).unwrap();
        assert_eq!(shown(dir.path()), SidebarSettings::default());

        // Resetting again is fine.
        reset(dir.path()).unwrap();
    }
}
