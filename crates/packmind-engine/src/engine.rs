//! Stateful reminder evaluation.
//!
//! All mutable application state (current location, home location, last
//! weather reading) lives in `ReminderEngine`; nothing is global.
//!
//! Weather readings are sequence-stamped against location updates and
//! discarded when a newer location arrived while the fetch was in
//! flight. Notifications are debounced per condition tag: a tag
//! re-notifies only when its matched item set changes or it resumes
//! matching.

use std::collections::{BTreeSet, HashMap, HashSet};

use packmind_store::{ConditionTag, HomeLocation, Item};
use packmind_weather::{Coordinates, EnvironmentReading};

use crate::distance;
use crate::matcher;
use crate::notify::{Notification, Notifier};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Distance from home (km) beyond which the user counts as away.
    pub away_threshold_km: f64,
    /// Temperature substituted when no weather reading is available.
    pub fallback_temperature_c: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            away_threshold_km: 0.1,
            fallback_temperature_c: 22.0,
        }
    }
}

pub struct ReminderEngine {
    settings: EngineSettings,
    notifier: Box<dyn Notifier + Send>,
    home: Option<HomeLocation>,
    current: Option<Coordinates>,
    reading: Option<EnvironmentReading>,
    location_seq: u64,
    /// Per condition tag, the item ids last notified for it.
    last_notified: HashMap<ConditionTag, BTreeSet<String>>,
}

impl ReminderEngine {
    pub fn new(settings: EngineSettings, notifier: Box<dyn Notifier + Send>) -> Self {
        Self {
            settings,
            notifier,
            home: None,
            current: None,
            reading: None,
            location_seq: 0,
            last_notified: HashMap::new(),
        }
    }

    pub fn set_home(&mut self, home: Option<HomeLocation>) {
        self.home = home;
    }

    pub fn home(&self) -> Option<&HomeLocation> {
        self.home.as_ref()
    }

    pub fn current_location(&self) -> Option<Coordinates> {
        self.current
    }

    /// Record a location update and return the sequence number a weather
    /// request made for it should be stamped with.
    pub fn update_location(&mut self, coords: Coordinates) -> u64 {
        self.current = Some(coords);
        self.location_seq += 1;
        tracing::debug!("Location update #{}: {}", self.location_seq, coords.label());
        self.location_seq
    }

    /// Sequence of the most recent location update.
    pub fn location_seq(&self) -> u64 {
        self.location_seq
    }

    /// Apply a weather reading stamped with the sequence of the location
    /// it was requested for. Returns false if a newer location update
    /// superseded it, in which case the reading is discarded.
    pub fn apply_reading(&mut self, reading: EnvironmentReading, seq: u64) -> bool {
        if seq < self.location_seq {
            tracing::debug!(
                "Discarding stale weather reading (seq {} < {})",
                seq,
                self.location_seq
            );
            return false;
        }
        self.reading = Some(reading);
        true
    }

    /// The reading substituted when the weather fetch failed.
    pub fn fallback_reading(&self) -> EnvironmentReading {
        EnvironmentReading::fallback(self.settings.fallback_temperature_c)
    }

    pub fn reading(&self) -> Option<&EnvironmentReading> {
        self.reading.as_ref()
    }

    /// Distance from home, when both locations are known.
    pub fn distance_from_home_km(&self) -> Option<f64> {
        let current = self.current?;
        let home = self.home.as_ref()?;
        Some(distance::distance_km(
            current,
            Coordinates::new(home.latitude, home.longitude),
        ))
    }

    /// Whether the user is away from home; `None` until both the current
    /// and home locations are known.
    pub fn away_from_home(&self) -> Option<bool> {
        self.distance_from_home_km()
            .map(|d| d > self.settings.away_threshold_km)
    }

    /// Evaluate the item list against the current state and notify for
    /// each condition tag whose matched set changed.
    ///
    /// When no weather reading is available the fallback reading is
    /// substituted rather than failing the match. Unknown home/away
    /// state counts as at home.
    pub fn evaluate<'a>(&mut self, items: &'a [Item]) -> Vec<&'a Item> {
        let reading = self
            .reading
            .clone()
            .unwrap_or_else(|| self.fallback_reading());
        let away = self.away_from_home().unwrap_or(false);

        let matched = matcher::match_items(items, &reading, away);

        // Group matches by tag, preserving first-appearance order.
        let mut groups: Vec<(ConditionTag, Vec<&Item>)> = Vec::new();
        for &item in &matched {
            match groups.iter_mut().find(|(tag, _)| *tag == item.condition) {
                Some((_, members)) => members.push(item),
                None => groups.push((item.condition.clone(), vec![item])),
            }
        }

        for (tag, members) in &groups {
            let ids: BTreeSet<String> = members.iter().map(|i| i.id.clone()).collect();
            if self.last_notified.get(tag) == Some(&ids) {
                continue;
            }

            let names: Vec<&str> = members.iter().map(|i| i.name.as_str()).collect();
            let notification = Notification::dont_forget(&names);
            tracing::info!("Notify [{}]: {}", tag, notification.body);
            self.notifier.notify(&notification);
            self.last_notified.insert(tag.clone(), ids);
        }

        // Tags that stopped matching may notify again when they resume.
        let active: HashSet<&ConditionTag> = groups.iter().map(|(tag, _)| tag).collect();
        self.last_notified.retain(|tag, _| active.contains(tag));

        matched
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::notify::RecordingNotifier;

    fn item(id: &str, name: &str, condition: ConditionTag) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            condition,
        }
    }

    fn engine() -> (
        ReminderEngine,
        std::sync::Arc<parking_lot::Mutex<Vec<Notification>>>,
    ) {
        let (notifier, log) = RecordingNotifier::new();
        (
            ReminderEngine::new(EngineSettings::default(), Box::new(notifier)),
            log,
        )
    }

    #[test]
    fn test_one_notification_per_matching_tag() {
        let (mut engine, log) = engine();
        let items = [
            item("1", "Umbrella", ConditionTag::Rain),
            item("2", "Water bottle", ConditionTag::Hot),
            item("3", "Keys", ConditionTag::Always),
        ];

        let seq = engine.location_seq();
        assert!(engine.apply_reading(EnvironmentReading::new("light rain", 30.0), seq));

        let matched = engine.evaluate(&items);
        assert_eq!(matched.len(), 3);

        let log = log.lock();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].body, "Remember to take: Umbrella");
        assert_eq!(log[1].body, "Remember to take: Water bottle");
        assert_eq!(log[2].body, "Remember to take: Keys");
        assert!(log.iter().all(|n| n.title == "Don't Forget!"));
    }

    #[test]
    fn test_repeat_evaluation_is_debounced() {
        let (mut engine, log) = engine();
        let items = [item("1", "Umbrella", ConditionTag::Rain)];

        let seq = engine.location_seq();
        engine.apply_reading(EnvironmentReading::new("rain", 15.0), seq);

        engine.evaluate(&items);
        engine.evaluate(&items);
        engine.evaluate(&items);

        assert_eq!(log.lock().len(), 1, "identical state must notify once");
    }

    #[test]
    fn test_changed_match_set_renotifies() {
        let (mut engine, log) = engine();
        let seq = engine.location_seq();
        engine.apply_reading(EnvironmentReading::new("rain", 15.0), seq);

        let one = [item("1", "Umbrella", ConditionTag::Rain)];
        engine.evaluate(&one);

        let two = [
            item("1", "Umbrella", ConditionTag::Rain),
            item("2", "Rain jacket", ConditionTag::Rain),
        ];
        engine.evaluate(&two);

        let log = log.lock();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].body, "Remember to take: Umbrella, Rain jacket");
    }

    #[test]
    fn test_tag_renotifies_after_gap() {
        let (mut engine, log) = engine();
        let items = [item("1", "Umbrella", ConditionTag::Rain)];

        let seq = engine.location_seq();
        engine.apply_reading(EnvironmentReading::new("rain", 15.0), seq);
        engine.evaluate(&items);

        engine.apply_reading(EnvironmentReading::new("clear", 15.0), seq);
        assert!(engine.evaluate(&items).is_empty());

        engine.apply_reading(EnvironmentReading::new("rain", 15.0), seq);
        engine.evaluate(&items);

        assert_eq!(log.lock().len(), 2);
    }

    #[test]
    fn test_stale_reading_discarded() {
        let (mut engine, log) = engine();
        let items = [item("1", "Umbrella", ConditionTag::Rain)];

        let stale_seq = engine.update_location(Coordinates::new(47.0, -122.0));
        engine.update_location(Coordinates::new(48.0, -122.0));

        assert!(!engine.apply_reading(EnvironmentReading::new("rain", 15.0), stale_seq));
        assert!(engine.reading().is_none());

        // With no reading, the fallback ("clear") applies and rain items
        // stay unmatched.
        assert!(engine.evaluate(&items).is_empty());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_fallback_reading_substituted() {
        let (mut engine, log) = engine();
        let items = [
            item("1", "Keys", ConditionTag::Always),
            item("2", "Umbrella", ConditionTag::Rain),
        ];

        // No weather applied at all: fallback is "clear" at 22°C.
        let matched = engine.evaluate(&items);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Keys");
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn test_away_from_home_threshold() {
        let (mut engine, _log) = engine();
        engine.set_home(Some(HomeLocation {
            latitude: 37.7749,
            longitude: -122.4194,
            address: "Home".to_string(),
        }));

        assert_eq!(engine.away_from_home(), None, "unknown until located");

        engine.update_location(Coordinates::new(37.7749, -122.4194));
        assert_eq!(engine.away_from_home(), Some(false));

        // ~1.1 km away.
        engine.update_location(Coordinates::new(37.7849, -122.4194));
        assert_eq!(engine.away_from_home(), Some(true));
    }

    #[test]
    fn test_leaving_home_items_follow_away_state() {
        let (mut engine, log) = engine();
        let items = [item("1", "Badge", ConditionTag::LeavingHome)];

        engine.set_home(Some(HomeLocation {
            latitude: 37.7749,
            longitude: -122.4194,
            address: "Home".to_string(),
        }));

        let seq = engine.update_location(Coordinates::new(37.7749, -122.4194));
        engine.apply_reading(EnvironmentReading::new("clear", 20.0), seq);
        assert!(engine.evaluate(&items).is_empty());

        let seq = engine.update_location(Coordinates::new(37.7849, -122.4194));
        engine.apply_reading(EnvironmentReading::new("clear", 20.0), seq);
        let matched = engine.evaluate(&items);
        assert_eq!(matched.len(), 1);
        assert_eq!(log.lock().len(), 1);
        assert_eq!(log.lock()[0].body, "Remember to take: Badge");
    }
}
