//! Weather and geocoding for Packmind.
//!
//! Live weather comes from an OpenWeatherMap-compatible endpoint and
//! place lookup from Nominatim; both are best-effort collaborators whose
//! failures degrade to fallbacks rather than propagate. The offline demo
//! path uses a deterministic mock forecast table instead.

pub mod geocode;
pub mod mock;
pub mod provider;
pub mod types;

pub use geocode::{GeocodeClient, GeocodedPlace};
pub use mock::{select_forecast, MockCondition, MockForecast};
pub use provider::WeatherProvider;
pub use types::*;
