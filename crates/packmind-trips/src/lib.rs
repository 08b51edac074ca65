//! Trip packing recommendations.
//!
//! Given a destination's (mock) forecast and the trip duration, build a
//! packing list: essentials first, then weather-specific items, then
//! duration-specific items.

use packmind_weather::{MockCondition, MockForecast};

/// How long the trip is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TripDuration {
    Day,
    Weekend,
    Week,
    Long,
}

impl TripDuration {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Self::Day),
            "weekend" => Some(Self::Weekend),
            "week" => Some(Self::Week),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    fn overnight(&self) -> bool {
        *self >= Self::Weekend
    }

    fn extended(&self) -> bool {
        *self >= Self::Week
    }
}

/// One recommended packing item with the reason it made the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub name: &'static str,
    pub reason: String,
    pub icon: &'static str,
}

fn rec(name: &'static str, reason: &str, icon: &'static str) -> Recommendation {
    Recommendation {
        name,
        reason: reason.to_string(),
        icon,
    }
}

/// Build the packing list for a forecast and duration.
pub fn recommend(forecast: &MockForecast, duration: TripDuration) -> Vec<Recommendation> {
    let mut recommendations = vec![
        rec("Phone charger", "Essential for staying connected", "📱"),
        rec("Wallet with ID and cards", "For identification and payments", "💳"),
    ];

    match forecast.condition {
        MockCondition::Sunny => {
            recommendations.push(rec("Sunscreen", "Protect your skin from UV rays", "☀️"));
            recommendations.push(rec("Sunglasses", "Protect your eyes on bright days", "😎"));
            recommendations.push(rec("Hat", "Additional sun protection", "👒"));
        }
        MockCondition::Rainy => {
            recommendations.push(rec("Umbrella", "Stay dry in the rain", "☔"));
            recommendations.push(rec("Waterproof jacket", "Essential for rainy weather", "🧥"));
            recommendations.push(rec("Waterproof shoes", "Keep your feet dry", "👟"));
        }
        MockCondition::Cloudy => {
            recommendations.push(rec("Light jacket", "For variable weather conditions", "🧥"));
            recommendations.push(rec("Umbrella", "Just in case it rains", "☔"));
        }
        MockCondition::Snowy => {
            recommendations.push(rec("Winter coat", "Stay warm in cold temperatures", "🧥"));
            recommendations.push(rec("Gloves", "Keep your hands warm", "🧤"));
            recommendations.push(rec("Hat and scarf", "Essential for cold weather", "🧣"));
            recommendations.push(rec("Boots", "Navigate snow and ice safely", "👢"));
        }
        MockCondition::Hot => {
            recommendations.push(rec("Water bottle", "Stay hydrated in hot weather", "💧"));
            recommendations.push(rec("Light clothing", "Stay cool in high temperatures", "👕"));
            recommendations.push(rec("Sunscreen", "Protect your skin from UV rays", "☀️"));
        }
    }

    if duration.overnight() {
        recommendations.push(rec(
            "Toothbrush and toothpaste",
            "Essential for overnight stays",
            "🪥",
        ));

        let trip_kind = match duration {
            TripDuration::Weekend => "2-3 day",
            TripDuration::Week => "week-long",
            _ => "extended",
        };
        recommendations.push(rec(
            "Change of clothes",
            &format!("For a {} trip", trip_kind),
            "👕",
        ));
    }

    if duration.extended() {
        recommendations.push(rec("Laundry supplies", "For longer trips", "🧺"));
        recommendations.push(rec("First aid kit", "For emergencies", "🩹"));
    }

    recommendations
}
