//! Third-party app integrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storedesk_core::derive::{matches_eq, matches_text};
use storedesk_core::{Criteria, IntegrationCategory, IntegrationId, Record, Toggle};

use super::blank_as_none;

/// An external service the store can connect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub id: IntegrationId,
    pub name: String,
    pub description: String,
    pub category: IntegrationCategory,
    pub connected: bool,
    /// Set while connected.
    pub connected_at: Option<DateTime<Utc>>,
}

impl Integration {
    fn set_connected(&mut self, connected: bool) {
        if connected == self.connected {
            return;
        }
        self.connected = connected;
        self.connected_at = connected.then(Utc::now);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntegrationPatch {
    pub connected: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationFlag {
    Connected,
}

impl Record for Integration {
    type Id = IntegrationId;
    type Patch = IntegrationPatch;

    fn id(&self) -> IntegrationId {
        self.id
    }

    fn set_id(&mut self, id: IntegrationId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &IntegrationPatch) {
        if let Some(connected) = patch.connected {
            self.set_connected(connected);
        }
    }
}

impl Toggle for Integration {
    type Flag = IntegrationFlag;

    fn flip(&mut self, flag: IntegrationFlag) {
        match flag {
            IntegrationFlag::Connected => self.set_connected(!self.connected),
        }
    }
}

/// Integration catalog query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntegrationQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<IntegrationCategory>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub connected: Option<bool>,
    /// Matches name and description.
    pub search: Option<String>,
}

impl Criteria<Integration> for IntegrationQuery {
    fn matches(&self, i: &Integration) -> bool {
        matches_eq(&i.category, self.category.as_ref())
            && matches_eq(&i.connected, self.connected.as_ref())
            && matches_text(self.search.as_deref(), &[&i.name, &i.description])
    }
}
