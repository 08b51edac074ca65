//! Local persistence for Packmind.
//!
//! All state lives as JSON text under single keys in a storage
//! directory: the packing item list, the home location, and the session
//! (login flag + user profile). There is no schema versioning; a corrupt
//! key is cleared and the feature reverts to its default state.

pub mod home;
pub mod items;
pub mod kv;
pub mod session;

pub use home::{HomeLocation, HomeStore};
pub use items::{ConditionTag, Item, ItemStore};
pub use kv::JsonStore;
pub use session::{Session, UserProfile};
