//! Great-circle distance.

use packmind_weather::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two coordinate pairs
/// given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance between two points.
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    haversine_km(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Whether `current` is further than `threshold_km` from `home`.
pub fn is_away_from_home(current: Coordinates, home: Coordinates, threshold_km: f64) -> bool {
    distance_km(current, home) > threshold_km
}
