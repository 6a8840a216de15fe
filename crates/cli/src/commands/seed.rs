//! Export the demo seed data.
//!
//! Prints the records every collection starts with as YAML, either all
//! collections keyed by name or a single collection as a plain list.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use storedesk_admin::models::{
    Integration, Moderator, Notification, NotificationPreference, Order, PaymentMethod, Product,
    Session,
};
use storedesk_admin::seed;
use storedesk_core::EmailError;

/// Errors from seed commands.
#[derive(Debug, Error)]
pub enum SeedCommandError {
    #[error("Invalid seed data: {0}")]
    Seed(#[from] EmailError),

    #[error("Failed to encode YAML: {0}")]
    Encode(#[from] serde_yaml::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Seeded collection selectable with `--collection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectionName {
    Products,
    Orders,
    Notifications,
    Preferences,
    Moderators,
    PaymentMethods,
    Sessions,
    Integrations,
}

#[derive(Debug, Serialize)]
struct SeedExport {
    products: Vec<Product>,
    orders: Vec<Order>,
    notifications: Vec<Notification>,
    preferences: Vec<NotificationPreference>,
    moderators: Vec<Moderator>,
    payment_methods: Vec<PaymentMethod>,
    sessions: Vec<Session>,
    integrations: Vec<Integration>,
}

fn to_yaml(collection: Option<CollectionName>) -> Result<String, SeedCommandError> {
    let yaml = match collection {
        None => serde_yaml::to_string(&SeedExport {
            products: seed::products(),
            orders: seed::orders(),
            notifications: seed::notifications(),
            preferences: seed::notification_preferences(),
            moderators: seed::moderators()?,
            payment_methods: seed::payment_methods(),
            sessions: seed::sessions(),
            integrations: seed::integrations(),
        })?,
        Some(CollectionName::Products) => serde_yaml::to_string(&seed::products())?,
        Some(CollectionName::Orders) => serde_yaml::to_string(&seed::orders())?,
        Some(CollectionName::Notifications) => serde_yaml::to_string(&seed::notifications())?,
        Some(CollectionName::Preferences) => {
            serde_yaml::to_string(&seed::notification_preferences())?
        }
        Some(CollectionName::Moderators) => serde_yaml::to_string(&seed::moderators()?)?,
        Some(CollectionName::PaymentMethods) => serde_yaml::to_string(&seed::payment_methods())?,
        Some(CollectionName::Sessions) => serde_yaml::to_string(&seed::sessions())?,
        Some(CollectionName::Integrations) => serde_yaml::to_string(&seed::integrations())?,
    };
    Ok(yaml)
}

/// Print seed data as YAML.
///
/// # Errors
///
/// Returns an error if the seed is invalid or the output cannot be written.
pub fn export(
    collection: Option<CollectionName>,
    out: &mut impl Write,
) -> Result<(), SeedCommandError> {
    let yaml = to_yaml(collection)?;
    out.write_all(yaml.as_bytes())?;
    info!(?collection, "Exported seed data");
    Ok(())
}
