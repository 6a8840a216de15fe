//! StoreDesk Core - Shared types and state primitives.
//!
//! This crate provides the pieces every StoreDesk component builds on:
//! - `admin` - Dashboard API server (one collection per dashboard page)
//! - `cli` - Command-line tools for settings and seed data
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no network,
//! no filesystem. Durable storage is reached through the [`SettingsStore`]
//! trait, which binaries implement on top of real I/O.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`collection`] - The per-page entity store and its mutation operations
//! - [`derive`] - Filter criteria and stable sorting over a collection
//! - [`settings`] - Sidebar settings and the fail-soft persistence adapter

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod derive;
pub mod settings;
pub mod types;

pub use collection::{Collection, CollectionError, Record, Toggle};
pub use derive::{Criteria, NoCriteria, Predicate, SortDirection, derive, derive_sorted};
pub use settings::{
    MemorySettingsStore, SIDEBAR_SETTINGS_KEY, SettingsAdapter, SettingsError, SettingsStore,
    SidebarPosition, SidebarSettings, Theme,
};
pub use types::*;
