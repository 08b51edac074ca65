//! Current-weather HTTP client (OpenWeatherMap wire shape).

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::types::{Coordinates, WeatherError, WeatherObservation};

const OPENWEATHERMAP_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    weather: Vec<ApiCondition>,
    main: ApiMain,
    wind: Option<ApiWind>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(api_key: &str) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, OPENWEATHERMAP_URL)
    }

    /// Client against a non-default endpoint (used by tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current conditions at the given coordinates (metric units).
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, coords: Coordinates) -> Result<WeatherObservation, WeatherError> {
        if self.api_key.is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&units=metric&appid={}",
            self.base_url, coords.latitude, coords.longitude, self.api_key
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let condition = body
            .weather
            .first()
            .ok_or_else(|| WeatherError::Parse("empty weather array".to_string()))?;

        let observation = WeatherObservation {
            condition: condition.main.to_lowercase(),
            description: condition.description.clone(),
            temperature_c: body.main.temp,
            humidity: body.main.humidity,
            wind_speed_ms: body.wind.map(|w| w.speed).unwrap_or(0.0),
        };

        tracing::info!(
            "Weather at {}: {}, {:.1}°C",
            coords.label(),
            observation.description,
            observation.temperature_c
        );
        Ok(observation)
    }
}
