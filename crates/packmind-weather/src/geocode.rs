//! Forward and reverse geocoding via Nominatim (OpenStreetMap).
//! Free, no API key required; reverse lookup is best-effort with a
//! coordinate fallback.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::types::{Coordinates, GeocodeError};

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Packmind/0.1.0 (https://github.com/packmind)";

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// A place resolved from a free-form query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub coordinates: Coordinates,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new() -> Result<Self, GeocodeError> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Client against a non-default endpoint (used by tests).
    pub fn with_base_url(base_url: &str) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a free-form location name to coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn forward(&self, query: &str) -> Result<GeocodedPlace, GeocodeError> {
        let url = format!(
            "{}/search?format=json&q={}&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Api {
                status: status.as_u16(),
            });
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

        let latitude: f64 = hit
            .lat
            .parse()
            .map_err(|_| GeocodeError::Parse(format!("bad latitude '{}'", hit.lat)))?;
        let longitude: f64 = hit
            .lon
            .parse()
            .map_err(|_| GeocodeError::Parse(format!("bad longitude '{}'", hit.lon)))?;

        let place = GeocodedPlace {
            coordinates: Coordinates::new(latitude, longitude),
            display_name: hit.display_name.unwrap_or_else(|| query.to_string()),
        };

        tracing::info!("Geocoded '{}' to {}", query, place.coordinates.label());
        Ok(place)
    }

    /// Reverse geocode coordinates to a short address.
    ///
    /// Returns `None` on any failure; callers fall back to coordinates.
    pub async fn reverse(&self, coords: Coordinates) -> Option<String> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=18&addressdetails=1",
            self.base_url, coords.latitude, coords.longitude
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: ReverseResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {}", e);
                return None;
            }
        };

        let display_name = body.display_name?;
        Some(shorten_display_name(&display_name))
    }

    /// Reverse geocode, falling back to a coordinate label.
    pub async fn reverse_or_coords(&self, coords: Coordinates) -> String {
        match self.reverse(coords).await {
            Some(name) => name,
            None => coords.label(),
        }
    }
}

/// First three comma-separated parts of a Nominatim display name.
fn shorten_display_name(display_name: &str) -> String {
    display_name
        .split(',')
        .take(3)
        .collect::<Vec<_>>()
        .join(",")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_display_name() {
        let full = "10 Downing Street, Westminster, London, Greater London, England";
        assert_eq!(
            shorten_display_name(full),
            "10 Downing Street, Westminster, London"
        );
    }

    #[test]
    fn test_shorten_short_name_unchanged() {
        assert_eq!(shorten_display_name("Paris"), "Paris");
    }
}
