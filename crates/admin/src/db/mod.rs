//! Durable storage for the dashboard.
//!
//! Page collections live in memory for the lifetime of the process. The only
//! state written to disk is the settings store.

pub mod settings;

pub use settings::FileSettingsStore;
