//! Tests for the HTTP geocoders against a mock server.

use fooqawhi_quest::{GeocoderConfig, GeocoderProvider, build_geocoder};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn google_config(server: &MockServer) -> GeocoderConfig {
    GeocoderConfig::new(
        GeocoderProvider::Google,
        Some(format!("{}/maps/api/geocode/json", server.uri())),
    )
}

fn nominatim_config(server: &MockServer) -> GeocoderConfig {
    GeocoderConfig::new(
        GeocoderProvider::Nominatim,
        Some(format!("{}/search", server.uri())),
    )
}

#[tokio::test]
async fn test_google_sends_address_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "Matera, Italy"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "geometry": {"location": {"lat": 40.6664, "lng": 16.6043}},
                "formatted_address": "75100 Matera MT, Italy",
                "place_id": "ChIJ_matera"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder =
        build_geocoder(&google_config(&server), Some("test-key".to_string())).expect("geocoder");
    let hit = geocoder.resolve("Matera, Italy").await.expect("resolved");

    assert_eq!(hit.latitude(), 40.6664);
    assert_eq!(hit.longitude(), 16.6043);
    assert_eq!(hit.formatted_address(), "75100 Matera MT, Italy");
}

#[tokio::test]
async fn test_google_zero_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let geocoder =
        build_geocoder(&google_config(&server), Some("test-key".to_string())).expect("geocoder");
    let err = geocoder.resolve("Atlantis, Ocean").await.unwrap_err();
    assert_eq!(err.reason(), "No location found for 'Atlantis, Ocean'");
}

#[tokio::test]
async fn test_google_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let geocoder =
        build_geocoder(&google_config(&server), Some("test-key".to_string())).expect("geocoder");
    let err = geocoder.resolve("Matera, Italy").await.unwrap_err();
    assert!(err.reason().contains("503"), "{}", err.reason());
}

#[tokio::test]
async fn test_google_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let geocoder =
        build_geocoder(&google_config(&server), Some("test-key".to_string())).expect("geocoder");
    let err = geocoder.resolve("Matera, Italy").await.unwrap_err();
    assert!(err.reason().starts_with("Failed to parse geocoding response"));
}

#[test]
fn test_google_requires_api_key() {
    let config = GeocoderConfig::new(GeocoderProvider::Google, None);
    assert!(build_geocoder(&config, None).is_err());
    assert!(build_geocoder(&config, Some("   ".to_string())).is_err());
}

#[tokio::test]
async fn test_nominatim_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Rome, Italy"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "lat": "41.8933203",
            "lon": "12.4829321",
            "display_name": "Roma, Lazio, Italia",
            "place_id": 123456
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = build_geocoder(&nominatim_config(&server), None).expect("geocoder");
    let hit = geocoder.resolve("Rome, Italy").await.expect("resolved");

    assert!((hit.latitude() - 41.8933203).abs() < 1e-9);
    assert!((hit.longitude() - 12.4829321).abs() < 1e-9);
    assert_eq!(hit.place_id(), "123456");
}

#[tokio::test]
async fn test_nominatim_empty_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let geocoder = build_geocoder(&nominatim_config(&server), None).expect("geocoder");
    let err = geocoder.resolve("Atlantis, Ocean").await.unwrap_err();
    assert!(err.reason().contains("No location found"));
}

#[tokio::test]
async fn test_nominatim_rejects_long_query_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let geocoder = build_geocoder(&nominatim_config(&server), None).expect("geocoder");
    let err = geocoder.resolve(&"x".repeat(500)).await.unwrap_err();
    assert!(err.reason().contains("too long"));
}

#[tokio::test]
async fn test_nominatim_non_finite_coordinates_are_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "lat": "NaN",
            "lon": "inf",
            "display_name": "Nowhere",
            "place_id": 1
        }])))
        .mount(&server)
        .await;

    let geocoder = build_geocoder(&nominatim_config(&server), None).expect("geocoder");
    let err = geocoder.resolve("Nowhere, Void").await.unwrap_err();
    assert!(err.reason().contains("invalid coordinates"), "{}", err.reason());
}

#[tokio::test]
async fn test_google_out_of_range_coordinates_are_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "geometry": {"location": {"lat": 40.6, "lng": 512.0}},
                "formatted_address": "Off the map",
                "place_id": "bogus"
            }]
        })))
        .mount(&server)
        .await;

    let geocoder =
        build_geocoder(&google_config(&server), Some("test-key".to_string())).expect("geocoder");
    let err = geocoder.resolve("Matera, Italy").await.unwrap_err();
    assert!(err.reason().contains("invalid coordinates"));
}
