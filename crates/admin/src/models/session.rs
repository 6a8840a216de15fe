//! Signed-in admin sessions.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storedesk_core::{Record, SessionId};

/// A device signed in to the admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub device: String,
    pub browser: String,
    pub location: String,
    pub ip_address: IpAddr,
    pub last_active: DateTime<Utc>,
    /// The session making the current request. It cannot be revoked.
    pub current: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionPatch {
    pub last_active: Option<DateTime<Utc>>,
}

impl Record for Session {
    type Id = SessionId;
    type Patch = SessionPatch;

    fn id(&self) -> SessionId {
        self.id
    }

    fn set_id(&mut self, id: SessionId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &SessionPatch) {
        if let Some(last_active) = patch.last_active {
            self.last_active = last_active;
        }
    }
}
