//! Packing items and their persisted list.

use chrono::Utc;
use packmind_core::StorageError;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::kv::JsonStore;

const ITEMS_KEY: &str = "reminder_items";

/// When a packing item is relevant.
///
/// The known tags form a closed set; anything else found in stored data
/// is carried through as `Other` and never matches, rather than failing
/// the load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionTag {
    Always,
    Rain,
    Hot,
    Cold,
    LeavingHome,
    #[serde(untagged)]
    Other(String),
}

impl ConditionTag {
    /// Parse a user-entered tag. Unknown tags are rejected here; `Other`
    /// exists only for data already in storage.
    pub fn parse_known(s: &str) -> Option<Self> {
        match s {
            "always" => Some(Self::Always),
            "rain" => Some(Self::Rain),
            "hot" => Some(Self::Hot),
            "cold" => Some(Self::Cold),
            "leaving-home" => Some(Self::LeavingHome),
            _ => None,
        }
    }

    /// Human-readable description for list display.
    pub fn description(&self) -> &str {
        match self {
            Self::Always => "Always",
            Self::Rain => "When it's raining",
            Self::Hot => "When it's hot",
            Self::Cold => "When it's cold",
            Self::LeavingHome => "When leaving home",
            Self::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for ConditionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Always => "always",
            Self::Rain => "rain",
            Self::Hot => "hot",
            Self::Cold => "cold",
            Self::LeavingHome => "leaving-home",
            Self::Other(tag) => tag,
        };
        write!(f, "{}", s)
    }
}

/// A single packing item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Creation-time millisecond timestamp, unique within the list.
    pub id: String,
    pub name: String,
    pub condition: ConditionTag,
}

/// Persisted, insertion-ordered packing item list.
#[derive(Debug, Clone)]
pub struct ItemStore {
    store: JsonStore,
}

impl ItemStore {
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            store: JsonStore::open(dir)?,
        })
    }

    /// Load all items in insertion order. A missing or corrupt list
    /// yields the empty list.
    pub fn load(&self) -> Result<Vec<Item>, StorageError> {
        Ok(self.store.read(ITEMS_KEY)?.unwrap_or_default())
    }

    /// Append a new item and persist the list.
    pub fn add(&self, name: &str, condition: ConditionTag) -> Result<Item, StorageError> {
        let mut items = self.load()?;

        let base = Utc::now().timestamp_millis().to_string();
        let mut id = base.clone();
        let mut n = 1;
        while items.iter().any(|i| i.id == id) {
            id = format!("{}-{}", base, n);
            n += 1;
        }

        let item = Item {
            id,
            name: name.to_string(),
            condition,
        };
        items.push(item.clone());
        self.save(&items)?;

        tracing::info!("Added item '{}' ({})", item.name, item.condition);
        Ok(item)
    }

    /// Remove the item with the given id. Returns whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut items = self.load()?;
        let before = items.len();
        items.retain(|i| i.id != id);

        if items.len() == before {
            return Ok(false);
        }

        self.save(&items)?;
        tracing::info!("Removed item {}", id);
        Ok(true)
    }

    /// Persist the full list, replacing the stored one.
    pub fn save(&self, items: &[Item]) -> Result<(), StorageError> {
        self.store.write(ITEMS_KEY, &items)
    }
}
