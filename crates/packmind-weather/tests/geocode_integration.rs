//! Integration tests for GeocodeClient using wiremock.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use packmind_weather::types::{Coordinates, GeocodeError};
use packmind_weather::GeocodeClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_forward_geocode_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "San Francisco"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "lat": "37.7749295",
                "lon": "-122.4194155",
                "display_name": "San Francisco, California, United States"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = GeocodeClient::with_base_url(&mock_server.uri()).unwrap();
    let place = client.forward("San Francisco").await.unwrap();

    assert!((place.coordinates.latitude - 37.7749295).abs() < 1e-9);
    assert!((place.coordinates.longitude - -122.4194155).abs() < 1e-9);
    assert_eq!(place.display_name, "San Francisco, California, United States");
}

#[tokio::test]
async fn test_forward_geocode_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = GeocodeClient::with_base_url(&mock_server.uri()).unwrap();
    let err = client.forward("Nowhereville").await.unwrap_err();

    assert!(matches!(err, GeocodeError::NotFound(_)));
    assert_eq!(err.user_message(), "Could not find that location.");
}

#[tokio::test]
async fn test_forward_geocode_bad_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "not-a-number", "lon": "0", "display_name": "Broken" }
        ])))
        .mount(&mock_server)
        .await;

    let client = GeocodeClient::with_base_url(&mock_server.uri()).unwrap();
    let err = client.forward("Broken").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Parse(_)));
}

#[tokio::test]
async fn test_reverse_geocode_shortens_display_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "Pike Place Market, Pike Street, Seattle, King County, Washington"
        })))
        .mount(&mock_server)
        .await;

    let client = GeocodeClient::with_base_url(&mock_server.uri()).unwrap();
    let name = client.reverse(Coordinates::new(47.6097, -122.3422)).await;

    assert_eq!(name.as_deref(), Some("Pike Place Market, Pike Street, Seattle"));
}

#[tokio::test]
async fn test_reverse_geocode_failure_falls_back_to_coords() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = GeocodeClient::with_base_url(&mock_server.uri()).unwrap();
    let coords = Coordinates::new(47.6062, -122.3321);

    assert!(client.reverse(coords).await.is_none());
    assert_eq!(client.reverse_or_coords(coords).await, "47.60620, -122.33210");
}
