//! Application state shared across handlers.
//!
//! Each dashboard page owns one collection behind its own lock, so a write to
//! the orders table never blocks a read of the product list. Handlers that
//! hold several locks at once acquire them in field order.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use storedesk_core::{Collection, CollectionError, EmailError, SettingsAdapter, SettingsStore};

use crate::config::AdminConfig;
use crate::models::{
    Integration, Moderator, Notification, NotificationPreference, Order, PaymentMethod, Product,
    Session,
};
use crate::seed;

/// Settings store shared between the adapter and anything else that needs it.
pub type SharedSettingsStore = Arc<dyn SettingsStore + Send + Sync>;

/// Seed data could not be loaded into the collections.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed collection: {0}")]
    Collection(#[from] CollectionError),
    #[error("invalid seed email: {0}")]
    Email(#[from] EmailError),
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    products: RwLock<Collection<Product>>,
    orders: RwLock<Collection<Order>>,
    notifications: RwLock<Collection<Notification>>,
    preferences: RwLock<Collection<NotificationPreference>>,
    moderators: RwLock<Collection<Moderator>>,
    payment_methods: RwLock<Collection<PaymentMethod>>,
    sessions: RwLock<Collection<Session>>,
    integrations: RwLock<Collection<Integration>>,
    settings: SettingsAdapter<SharedSettingsStore>,
}

impl AppState {
    /// Build state with every collection loaded from the demo seed.
    ///
    /// # Errors
    ///
    /// Returns an error if a seed collection has duplicate ids or a malformed
    /// email.
    pub fn seeded(config: AdminConfig, store: SharedSettingsStore) -> Result<Self, SeedError> {
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                products: RwLock::new(Collection::from_seed(seed::products())?),
                orders: RwLock::new(Collection::from_seed(seed::orders())?),
                notifications: RwLock::new(Collection::from_seed(seed::notifications())?),
                preferences: RwLock::new(Collection::from_seed(seed::notification_preferences())?),
                moderators: RwLock::new(Collection::from_seed(seed::moderators()?)?),
                payment_methods: RwLock::new(Collection::from_seed(seed::payment_methods())?),
                sessions: RwLock::new(Collection::from_seed(seed::sessions())?),
                integrations: RwLock::new(Collection::from_seed(seed::integrations())?),
                settings: SettingsAdapter::sidebar(store),
            }),
        })
    }

    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    pub fn products(&self) -> &RwLock<Collection<Product>> {
        &self.inner.products
    }

    pub fn orders(&self) -> &RwLock<Collection<Order>> {
        &self.inner.orders
    }

    pub fn notifications(&self) -> &RwLock<Collection<Notification>> {
        &self.inner.notifications
    }

    pub fn preferences(&self) -> &RwLock<Collection<NotificationPreference>> {
        &self.inner.preferences
    }

    pub fn moderators(&self) -> &RwLock<Collection<Moderator>> {
        &self.inner.moderators
    }

    pub fn payment_methods(&self) -> &RwLock<Collection<PaymentMethod>> {
        &self.inner.payment_methods
    }

    pub fn sessions(&self) -> &RwLock<Collection<Session>> {
        &self.inner.sessions
    }

    pub fn integrations(&self) -> &RwLock<Collection<Integration>> {
        &self.inner.integrations
    }

    /// Sidebar settings persistence.
    pub fn settings(&self) -> &SettingsAdapter<SharedSettingsStore> {
        &self.inner.settings
    }
}
