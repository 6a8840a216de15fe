//! Domain records for each dashboard page.
//!
//! Every page owns one [`storedesk_core::Collection`] of its record type. A
//! record module defines the record, its shallow patch, the flags that can be
//! toggled, and the query criteria used to derive the visible list.

pub mod integration;
pub mod moderator;
pub mod notification;
pub mod order;
pub mod payment_method;
pub mod product;
pub mod session;

use std::fmt::Display;
use std::str::FromStr;

use serde::de::{DeserializeOwned, Error as _, IntoDeserializer, value::StrDeserializer};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub use integration::{Integration, IntegrationFlag, IntegrationPatch, IntegrationQuery};
pub use moderator::{Moderator, ModeratorFlag, ModeratorPatch, ModeratorQuery, NewModerator};
pub use notification::{
    Channel, Notification, NotificationFlag, NotificationPatch, NotificationPreference,
    NotificationQuery, PreferencePatch,
};
pub use order::{Order, OrderPatch, OrderQuery, OrderSort};
pub use payment_method::{
    NewPaymentMethod, PaymentMethod, PaymentMethodFlag, PaymentMethodPatch, PaymentMethodQuery,
};
pub use product::{NewProduct, Product, ProductFlag, ProductPatch, ProductQuery, ProductSort};
pub use session::{Session, SessionPatch};

/// Input rejected before it reaches a collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or blank.
    #[error("{0} is required")]
    Required(&'static str),
    /// A numeric field is below its minimum.
    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: String },
    /// A numeric field is above its maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: String },
    /// A field has the wrong format.
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
    /// A value that must be unique is already taken.
    #[error("{field} '{value}' is already in use")]
    Duplicate { field: &'static str, value: String },
}

/// Trim a required text field, rejecting blank input.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Deserialize an optional query value, treating a blank value as absent.
///
/// Select inputs send `?status=` for "All"; that must not reject the request.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(D::Error::custom),
    }
}

/// Like [`blank_as_none`] for unit enums that only implement `Deserialize`.
pub(crate) fn blank_variant_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let variant: StrDeserializer<'_, D::Error> = value.into_deserializer();
            T::deserialize(variant).map(Some)
        }
    }
}
