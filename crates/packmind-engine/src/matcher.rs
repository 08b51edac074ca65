//! Pure condition matching.

use packmind_store::{ConditionTag, Item};
use packmind_weather::EnvironmentReading;

/// Hot threshold in °C: strictly above matches `hot`.
pub const HOT_THRESHOLD_C: f64 = 25.0;
/// Cold threshold in °C: strictly below matches `cold`.
pub const COLD_THRESHOLD_C: f64 = 10.0;

/// Whether a single tag matches the current environment.
///
/// Unknown tags never match; they are carried, not rejected.
pub fn tag_matches(tag: &ConditionTag, reading: &EnvironmentReading, away_from_home: bool) -> bool {
    match tag {
        ConditionTag::Always => true,
        ConditionTag::Rain => {
            let condition = reading.condition.to_lowercase();
            condition.contains("rain") || condition.contains("drizzle")
        }
        ConditionTag::Hot => reading.temperature_c > HOT_THRESHOLD_C,
        ConditionTag::Cold => reading.temperature_c < COLD_THRESHOLD_C,
        ConditionTag::LeavingHome => away_from_home,
        ConditionTag::Other(_) => false,
    }
}

/// Filter `items` down to those relevant right now, preserving input
/// order. Pure and idempotent; each item appears at most once.
pub fn match_items<'a>(
    items: &'a [Item],
    reading: &EnvironmentReading,
    away_from_home: bool,
) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| tag_matches(&item.condition, reading, away_from_home))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, condition: ConditionTag) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            condition,
        }
    }

    fn reading(condition: &str, temperature_c: f64) -> EnvironmentReading {
        EnvironmentReading::new(condition, temperature_c)
    }

    #[test]
    fn test_hot_strictly_above_threshold() {
        let items = [item("1", "Water bottle", ConditionTag::Hot)];

        assert_eq!(match_items(&items, &reading("clear", 25.1), false).len(), 1);
        assert_eq!(match_items(&items, &reading("clear", 30.0), false).len(), 1);
        assert!(match_items(&items, &reading("clear", 25.0), false).is_empty());
        assert!(match_items(&items, &reading("clear", 24.9), false).is_empty());
    }

    #[test]
    fn test_cold_strictly_below_threshold() {
        let items = [item("1", "Gloves", ConditionTag::Cold)];

        assert_eq!(match_items(&items, &reading("clear", 9.9), false).len(), 1);
        assert_eq!(match_items(&items, &reading("clear", -5.0), false).len(), 1);
        assert!(match_items(&items, &reading("clear", 10.0), false).is_empty());
        assert!(match_items(&items, &reading("clear", 18.0), false).is_empty());
    }

    #[test]
    fn test_always_matches_any_environment() {
        let items = [item("1", "Keys", ConditionTag::Always)];

        assert_eq!(match_items(&items, &reading("clear", 20.0), false).len(), 1);
        assert_eq!(match_items(&items, &reading("snow", -10.0), true).len(), 1);
    }

    #[test]
    fn test_rain_substring_match() {
        let items = [item("1", "Umbrella", ConditionTag::Rain)];

        assert_eq!(match_items(&items, &reading("light rain", 15.0), false).len(), 1);
        assert_eq!(match_items(&items, &reading("drizzle", 15.0), false).len(), 1);
        assert_eq!(match_items(&items, &reading("Rain", 15.0), false).len(), 1);
        assert!(match_items(&items, &reading("clear", 15.0), false).is_empty());
        assert!(match_items(&items, &reading("snow", 15.0), false).is_empty());
    }

    #[test]
    fn test_leaving_home_requires_away() {
        let items = [item("1", "Badge", ConditionTag::LeavingHome)];

        assert_eq!(match_items(&items, &reading("clear", 20.0), true).len(), 1);
        assert!(match_items(&items, &reading("clear", 20.0), false).is_empty());
    }

    #[test]
    fn test_unknown_tag_never_matches() {
        let items = [item("1", "Kite", ConditionTag::Other("windy".to_string()))];

        assert!(match_items(&items, &reading("windy", 20.0), true).is_empty());
    }

    #[test]
    fn test_order_preserved_mixed_scenario() {
        // rain + hot + always under "light rain" at 30°C.
        let items = [
            item("1", "Umbrella", ConditionTag::Rain),
            item("2", "Water bottle", ConditionTag::Hot),
            item("3", "Keys", ConditionTag::Always),
        ];

        let matched = match_items(&items, &reading("light rain", 30.0), false);
        let names: Vec<&str> = matched.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Umbrella", "Water bottle", "Keys"]);
    }

    #[test]
    fn test_idempotent() {
        let items = [
            item("1", "Umbrella", ConditionTag::Rain),
            item("2", "Keys", ConditionTag::Always),
        ];
        let env = reading("light rain", 12.0);

        let first = match_items(&items, &env, false);
        let second = match_items(&items, &env, false);
        assert_eq!(first, second);
    }
}
