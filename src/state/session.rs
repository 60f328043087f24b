//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the navigation guard on every transition and written by the
//! gateway on login, logout, and 401 responses. The token and the
//! serialized profile live under two storage keys. The token is the
//! presence marker: it is written after the profile and removed before it,
//! so a reader never observes a token without its profile.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::role::{Role, deserialize_role_code, level_of};
use super::storage::{KeyValueStorage, StorageError};
use crate::config::StorageKeys;

/// Identity of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub name: String,
    /// Raw backend role code; see [`Role::from_code`].
    #[serde(deserialize_with = "deserialize_role_code")]
    pub role: String,
}

impl Profile {
    /// Typed role, or `None` for codes outside the known levels.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::from_code(&self.role)
    }
}

/// Token plus profile as read back from storage.
///
/// `profile` is `None` only when the persisted profile could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub profile: Option<Profile>,
}

/// Handle to the persisted session. Clones share the same backend.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    keys: StorageKeys,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    /// Persist a freshly issued token and its profile.
    ///
    /// # Errors
    ///
    /// Returns an error if either write is refused. A failed token write
    /// restores the previous profile, so an existing session stays whole
    /// and an empty store stays empty.
    pub fn save(&self, token: &str, profile: &Profile) -> Result<(), StorageError> {
        let raw = serde_json::to_string(profile).map_err(|e| StorageError::Write(e.to_string()))?;
        let previous = self.storage.get(&self.keys.profile);
        self.storage.set(&self.keys.profile, &raw)?;
        if let Err(e) = self.storage.set(&self.keys.token, token) {
            let restored = match &previous {
                Some(old) => self.storage.set(&self.keys.profile, old),
                None => self.storage.remove(&self.keys.profile),
            };
            if let Err(restore) = restored {
                log::warn!("failed to restore previous profile: {restore}");
            }
            return Err(e);
        }
        log::debug!("session saved for user {}", profile.user_id);
        Ok(())
    }

    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let token = self.token()?;
        Some(Session { token, profile: self.profile() })
    }

    /// Drop the persisted session. Never fails; backend errors are logged.
    pub fn clear(&self) {
        for key in [&self.keys.token, &self.keys.profile] {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("failed to remove session key {key}: {e}");
            }
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get(&self.keys.token).filter(|t| !t.is_empty())
    }

    /// Stored profile. Unparseable data reads as absent.
    #[must_use]
    pub fn profile(&self) -> Option<Profile> {
        let raw = self.storage.get(&self.keys.profile)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::debug!("ignoring malformed stored profile: {e}");
                None
            }
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Whether the signed-in user ranks at least `required`.
    #[must_use]
    pub fn has_role(&self, required: Role) -> bool {
        let Some(session) = self.load() else {
            return false;
        };
        session
            .profile
            .is_some_and(|profile| level_of(&profile.role) >= required.level())
    }
}
