//! Login flag and user profile.
//!
//! This is presence-of-a-flag session state, not an authentication
//! system: there are no credentials to verify.

use packmind_core::StorageError;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::kv::JsonStore;

const LOGIN_KEY: &str = "logged_in";
const PROFILE_KEY: &str = "user_profile";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    /// Name to greet the user with: name, else email, else "User".
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("User")
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    store: JsonStore,
}

impl Session {
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            store: JsonStore::open(dir)?,
        })
    }

    pub fn is_logged_in(&self) -> Result<bool, StorageError> {
        Ok(self.store.read::<bool>(LOGIN_KEY)?.unwrap_or(false))
    }

    pub fn log_in(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.store.write(PROFILE_KEY, profile)?;
        self.store.write(LOGIN_KEY, &true)?;
        tracing::info!("Logged in as {}", profile.display_name());
        Ok(())
    }

    /// Clears the login flag. The profile is kept so a later login can
    /// pre-fill it.
    pub fn log_out(&self) -> Result<(), StorageError> {
        self.store.clear(LOGIN_KEY)?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn profile(&self) -> Result<UserProfile, StorageError> {
        Ok(self.store.read(PROFILE_KEY)?.unwrap_or_default())
    }
}
