//! Store moderators and their permissions.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storedesk_core::derive::{matches_eq, matches_text};
use storedesk_core::{Criteria, Email, ModeratorId, ModeratorRole, Permission, Record, Toggle};

use super::{ValidationError, blank_as_none, required};

/// A team member with access to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moderator {
    pub id: ModeratorId,
    pub name: String,
    pub email: Email,
    pub role: ModeratorRole,
    pub permissions: BTreeSet<Permission>,
    pub active: bool,
    pub joined_at: DateTime<Utc>,
}

impl Moderator {
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Profile changes. Changing the role resets permissions to the role's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModeratorPatch {
    pub name: Option<String>,
    pub role: Option<ModeratorRole>,
}

impl ModeratorPatch {
    /// # Errors
    ///
    /// Returns an error for a blank name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            required("name", name)?;
        }
        Ok(())
    }
}

/// Flippable moderator fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeratorFlag {
    Active,
    /// Grant the permission if missing, revoke it if held.
    Permission(Permission),
}

impl Record for Moderator {
    type Id = ModeratorId;
    type Patch = ModeratorPatch;

    fn id(&self) -> ModeratorId {
        self.id
    }

    fn set_id(&mut self, id: ModeratorId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &ModeratorPatch) {
        if let Some(name) = &patch.name {
            name.trim().clone_into(&mut self.name);
        }
        if let Some(role) = patch.role.filter(|role| *role != self.role) {
            self.role = role;
            self.permissions = role.default_permissions().into_iter().collect();
        }
    }
}

impl Toggle for Moderator {
    type Flag = ModeratorFlag;

    fn flip(&mut self, flag: ModeratorFlag) {
        match flag {
            ModeratorFlag::Active => self.active = !self.active,
            ModeratorFlag::Permission(permission) => {
                if !self.permissions.remove(&permission) {
                    self.permissions.insert(permission);
                }
            }
        }
    }
}

/// Invitation form for a new moderator.
#[derive(Debug, Clone, Deserialize)]
pub struct NewModerator {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: ModeratorRole,
}

impl NewModerator {
    /// Validate the invitation and build an active moderator with the role's
    /// default permissions.
    ///
    /// `taken` reports whether an email already belongs to a moderator.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name, a malformed email, or an email that
    /// is already in use.
    pub fn into_moderator(
        self,
        taken: impl Fn(&Email) -> bool,
    ) -> Result<Moderator, ValidationError> {
        let name = required("name", &self.name)?;
        let email = Email::parse(&self.email).map_err(|e| ValidationError::Invalid {
            field: "email",
            reason: e.to_string(),
        })?;
        if taken(&email) {
            return Err(ValidationError::Duplicate {
                field: "email",
                value: email.into(),
            });
        }

        Ok(Moderator {
            id: ModeratorId::new(0),
            name,
            email,
            role: self.role,
            permissions: self.role.default_permissions().into_iter().collect(),
            active: true,
            joined_at: Utc::now(),
        })
    }
}

/// Moderator list query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModeratorQuery {
    /// Matches name and email.
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role: Option<ModeratorRole>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub active: Option<bool>,
}

impl Criteria<Moderator> for ModeratorQuery {
    fn matches(&self, m: &Moderator) -> bool {
        matches_text(self.search.as_deref(), &[&m.name, m.email.as_str()])
            && matches_eq(&m.role, self.role.as_ref())
            && matches_eq(&m.active, self.active.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storedesk_core::{Collection, derive};

    use super::*;
    use crate::seed;

    fn team() -> Collection<Moderator> {
        Collection::from_seed(seed::moderators().unwrap()).unwrap()
    }

    fn invite(name: &str, email: &str) -> NewModerator {
        NewModerator {
            name: name.to_string(),
            email: email.to_string(),
            role: ModeratorRole::Editor,
        }
    }

    #[test]
    fn test_invite_validation() {
        let team = team();
        let taken = |email: &Email| team.iter().any(|m| &m.email == email);
        let existing = team.iter().next().unwrap().email.as_str().to_uppercase();

        assert_eq!(
            invite("", "new@store.io").into_moderator(taken).unwrap_err(),
            ValidationError::Required("name")
        );
        assert!(matches!(
            invite("Kim", "kim@").into_moderator(taken),
            Err(ValidationError::Invalid { field: "email", .. })
        ));
        assert!(matches!(
            invite("Dup", &existing).into_moderator(taken),
            Err(ValidationError::Duplicate { field: "email", .. })
        ));

        let kim = invite("Kim", "kim@store.io").into_moderator(taken).unwrap();
        assert!(kim.active);
        assert!(kim.has_permission(Permission::ManageProducts));
        assert!(!kim.has_permission(Permission::ManageSettings));
    }

    #[test]
    fn test_toggle_permission_round_trip() {
        let mut team = team();
        let first = team.iter().next().unwrap().clone();
        let flag = ModeratorFlag::Permission(Permission::ManageSettings);

        let once = team.toggle(first.id, flag).unwrap();
        assert_ne!(
            once.has_permission(Permission::ManageSettings),
            first.has_permission(Permission::ManageSettings)
        );
        let twice = team.toggle(first.id, flag).unwrap();
        assert_eq!(twice.permissions, first.permissions);
    }

    #[test]
    fn test_role_change_resets_permissions() {
        let mut team = team();
        let admin = team
            .iter()
            .find(|m| m.role == ModeratorRole::Admin)
            .unwrap()
            .clone();
        let patch = ModeratorPatch {
            role: Some(ModeratorRole::Viewer),
            ..ModeratorPatch::default()
        };

        let updated = team.update_field(admin.id, &patch).unwrap();
        assert_eq!(updated.role, ModeratorRole::Viewer);
        assert_eq!(
            updated.permissions.iter().copied().collect::<Vec<_>>(),
            vec![Permission::ViewAnalytics]
        );
    }

    #[test]
    fn test_filter_active_editors() {
        let team = team();
        let query = ModeratorQuery {
            role: Some(ModeratorRole::Editor),
            active: Some(true),
            ..ModeratorQuery::default()
        };
        assert!(
            derive(&team, &query)
                .iter()
                .all(|m| m.role == ModeratorRole::Editor && m.active)
        );
    }
}
