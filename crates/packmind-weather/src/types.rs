use serde::{Deserialize, Serialize};

/// A point on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Coordinate label used wherever a place name is unavailable,
    /// e.g. "47.60620, -122.33210".
    pub fn label(&self) -> String {
        format!("{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// The environmental state reminders are evaluated against. Ephemeral,
/// recomputed on each location/weather update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    /// Lower-cased weather category, free-form ("clear", "light rain", ...).
    pub condition: String,
    pub temperature_c: f64,
}

impl EnvironmentReading {
    pub fn new(condition: impl Into<String>, temperature_c: f64) -> Self {
        let condition: String = condition.into();
        Self {
            condition: condition.to_lowercase(),
            temperature_c,
        }
    }

    /// Reading substituted when the weather fetch fails.
    pub fn fallback(temperature_c: f64) -> Self {
        Self {
            condition: "clear".to_string(),
            temperature_c,
        }
    }
}

/// Current conditions as returned by the weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Lower-cased main category ("rain", "clear", ...).
    pub condition: String,
    /// Longer description ("light rain").
    pub description: String,
    pub temperature_c: f64,
    pub humidity: u8,
    pub wind_speed_ms: f64,
}

impl WeatherObservation {
    pub fn reading(&self) -> EnvironmentReading {
        EnvironmentReading {
            condition: self.condition.clone(),
            temperature_c: self.temperature_c,
        }
    }
}

/// Weather provider errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Weather API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Weather API key not configured")]
    MissingApiKey,
}

impl WeatherError {
    /// User-friendly message for terminal display.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Network(_) => "Weather service unreachable. Showing fallback data.",
            WeatherError::Api { status, .. } if *status == 401 => {
                "Weather API key is invalid. Check settings."
            }
            WeatherError::Api { .. } => "Weather service error. Showing fallback data.",
            WeatherError::Parse(_) => "Weather service sent an unexpected response.",
            WeatherError::MissingApiKey => "Weather API key not set. Showing fallback data.",
        }
    }
}

/// Geocoding errors.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("No results for '{0}'")]
    NotFound(String),
    #[error("Geocoding API error: {status}")]
    Api { status: u16 },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeocodeError {
    pub fn user_message(&self) -> &'static str {
        match self {
            GeocodeError::Network(_) => "Location search unreachable. Check your connection.",
            GeocodeError::NotFound(_) => "Could not find that location.",
            GeocodeError::Api { .. } => "Location search failed. Please try again.",
            GeocodeError::Parse(_) => "Location search sent an unexpected response.",
        }
    }
}
