//! The reminder engine: decides which packing items are relevant for the
//! current weather and location state, and dispatches notifications.
//!
//! Matching itself is pure (`matcher`); `ReminderEngine` adds the stateful
//! parts: explicit location/weather state, stale-response sequencing, and
//! per-condition notification debounce.

pub mod distance;
pub mod engine;
pub mod matcher;
pub mod notify;

pub use distance::{haversine_km, is_away_from_home};
pub use engine::{EngineSettings, ReminderEngine};
pub use matcher::match_items;
pub use notify::{Notification, Notifier};
