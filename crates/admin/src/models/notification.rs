//! Notification feed and per-channel delivery preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storedesk_core::derive::{matches_eq, matches_text};
use storedesk_core::{Criteria, NotificationCategory, NotificationId, PreferenceId, Record, Toggle};

use super::blank_as_none;

/// An entry in the admin notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationPatch {
    pub read: Option<bool>,
}

impl NotificationPatch {
    /// Patch that marks a notification read.
    #[must_use]
    pub const fn mark_read() -> Self {
        Self { read: Some(true) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationFlag {
    Read,
}

impl Record for Notification {
    type Id = NotificationId;
    type Patch = NotificationPatch;

    fn id(&self) -> NotificationId {
        self.id
    }

    fn set_id(&mut self, id: NotificationId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &NotificationPatch) {
        if let Some(read) = patch.read {
            self.read = read;
        }
    }
}

impl Toggle for Notification {
    type Flag = NotificationFlag;

    fn flip(&mut self, flag: NotificationFlag) {
        match flag {
            NotificationFlag::Read => self.read = !self.read,
        }
    }
}

/// Notification feed query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub read: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<NotificationCategory>,
    /// Matches title and message.
    pub search: Option<String>,
}

impl Criteria<Notification> for NotificationQuery {
    fn matches(&self, n: &Notification) -> bool {
        matches_eq(&n.read, self.read.as_ref())
            && matches_eq(&n.category, self.category.as_ref())
            && matches_text(self.search.as_deref(), &[&n.title, &n.message])
    }
}

/// Delivery channel of a notification preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Push,
    Sms,
}

/// Which channels deliver one kind of event.
// Allow: one independent switch per delivery channel.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreference {
    pub id: PreferenceId,
    pub label: String,
    pub description: String,
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl NotificationPreference {
    /// Whether any channel is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.email || self.push || self.sms
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencePatch {
    pub email: Option<bool>,
    pub push: Option<bool>,
    pub sms: Option<bool>,
}

impl Record for NotificationPreference {
    type Id = PreferenceId;
    type Patch = PreferencePatch;

    fn id(&self) -> PreferenceId {
        self.id
    }

    fn set_id(&mut self, id: PreferenceId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &PreferencePatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(push) = patch.push {
            self.push = push;
        }
        if let Some(sms) = patch.sms {
            self.sms = sms;
        }
    }
}

impl Toggle for NotificationPreference {
    type Flag = Channel;

    fn flip(&mut self, channel: Channel) {
        match channel {
            Channel::Email => self.email = !self.email,
            Channel::Push => self.push = !self.push,
            Channel::Sms => self.sms = !self.sms,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storedesk_core::{Collection, derive};

    use super::*;
    use crate::seed;

    #[test]
    fn test_mark_all_read() {
        let mut feed = Collection::from_seed(seed::notifications()).unwrap();
        assert_eq!(feed.len(), 5);
        assert_eq!(feed.count(|n| !n.read), 2);

        let changed = feed.bulk_update(|n| !n.read, &NotificationPatch::mark_read());
        assert_eq!(changed, 2);
        assert_eq!(feed.count(|n| !n.read), 0);

        let unread = NotificationQuery {
            read: Some(false),
            ..NotificationQuery::default()
        };
        assert!(derive(&feed, &unread).is_empty());
    }

    #[test]
    fn test_mark_all_read_twice_changes_nothing() {
        let mut feed = Collection::from_seed(seed::notifications()).unwrap();
        feed.bulk_update(|n| !n.read, &NotificationPatch::mark_read());
        assert_eq!(
            feed.bulk_update(|n| !n.read, &NotificationPatch::mark_read()),
            0
        );
    }

    #[test]
    fn test_filter_by_category() {
        let feed = Collection::from_seed(seed::notifications()).unwrap();
        let query = NotificationQuery {
            category: Some(NotificationCategory::Order),
            ..NotificationQuery::default()
        };
        let view = derive(&feed, &query);
        assert!(!view.is_empty());
        assert!(view.iter().all(|n| n.category == NotificationCategory::Order));
    }

    #[test]
    fn test_toggle_channel() {
        let mut prefs = Collection::from_seed(seed::notification_preferences()).unwrap();
        let first = prefs.iter().next().unwrap().clone();

        let toggled = prefs.toggle(first.id, Channel::Sms).unwrap();
        assert_eq!(toggled.sms, !first.sms);
        assert_eq!(toggled.email, first.email);
        assert_eq!(toggled.push, first.push);
    }
}
