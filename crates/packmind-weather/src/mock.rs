//! Deterministic mock forecast for the offline/demo flow.
//!
//! The forecast is chosen from a fixed five-entry table by summing the
//! character codes of the destination string modulo 5. Table order,
//! summation, and modulus are load-bearing: the same destination must
//! select the same entry on every call.

use crate::types::EnvironmentReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCondition {
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
    Hot,
}

impl MockCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
            Self::Cloudy => "cloudy",
            Self::Snowy => "snowy",
            Self::Hot => "hot",
        }
    }
}

/// One entry of the mock forecast table. Temperatures are in °F, as the
/// demo data was authored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockForecast {
    pub condition: MockCondition,
    pub temperature_f: f64,
    pub description: &'static str,
    pub high_f: f64,
    pub low_f: f64,
    pub humidity: &'static str,
    pub wind: &'static str,
}

impl MockForecast {
    pub fn temperature_c(&self) -> f64 {
        (self.temperature_f - 32.0) * 5.0 / 9.0
    }

    pub fn reading(&self) -> EnvironmentReading {
        EnvironmentReading {
            condition: self.condition.as_str().to_string(),
            temperature_c: self.temperature_c(),
        }
    }
}

const FORECAST_TABLE: [MockForecast; 5] = [
    MockForecast {
        condition: MockCondition::Sunny,
        temperature_f: 75.0,
        description: "Sunny with clear skies",
        high_f: 80.0,
        low_f: 65.0,
        humidity: "45%",
        wind: "5 mph",
    },
    MockForecast {
        condition: MockCondition::Rainy,
        temperature_f: 55.0,
        description: "Light rain throughout the day",
        high_f: 60.0,
        low_f: 50.0,
        humidity: "85%",
        wind: "10 mph",
    },
    MockForecast {
        condition: MockCondition::Cloudy,
        temperature_f: 65.0,
        description: "Partly cloudy with occasional sun",
        high_f: 70.0,
        low_f: 60.0,
        humidity: "60%",
        wind: "8 mph",
    },
    MockForecast {
        condition: MockCondition::Snowy,
        temperature_f: 30.0,
        description: "Light snow throughout the day",
        high_f: 35.0,
        low_f: 25.0,
        humidity: "80%",
        wind: "12 mph",
    },
    MockForecast {
        condition: MockCondition::Hot,
        temperature_f: 90.0,
        description: "Hot and humid",
        high_f: 95.0,
        low_f: 75.0,
        humidity: "70%",
        wind: "3 mph",
    },
];

/// Select the forecast for a destination: sum of character codes mod 5.
pub fn select_forecast(destination: &str) -> &'static MockForecast {
    let sum: u32 = destination.chars().map(|c| c as u32).sum();
    let index = (sum % FORECAST_TABLE.len() as u32) as usize;
    &FORECAST_TABLE[index]
}
