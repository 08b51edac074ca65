//! Persisted home location.

use packmind_core::StorageError;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::kv::JsonStore;

const HOME_KEY: &str = "home_location";

/// A user-set reference coordinate for "away from home" checks.
/// At most one instance exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct HomeStore {
    store: JsonStore,
}

impl HomeStore {
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            store: JsonStore::open(dir)?,
        })
    }

    /// The saved home location, if one is set (corrupt data counts as unset).
    pub fn load(&self) -> Result<Option<HomeLocation>, StorageError> {
        self.store.read(HOME_KEY)
    }

    pub fn save(&self, home: &HomeLocation) -> Result<(), StorageError> {
        self.store.write(HOME_KEY, home)?;
        tracing::info!("Home location set to '{}'", home.address);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.clear(HOME_KEY)
    }
}
