//! Google Maps Geocoding API client.

use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use super::{GeocodeError, GeocodeHit, Geocoder};

/// Public endpoint of the Geocoding API.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    geometry: GoogleGeometry,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLocation,
}

#[derive(Debug, Deserialize)]
struct GoogleLocation {
    lat: f64,
    lng: f64,
}

/// Geocoder backed by the Google Maps Geocoding API.
#[derive(Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for GoogleGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GoogleGeocoder {
    /// Creates a client against `base_url` (the `.../geocode/json` endpoint).
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl Geocoder for GoogleGeocoder {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn resolve(&self, query: &str) -> Result<GeocodeHit, GeocodeError> {
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[("address", query), ("key", self.api_key.as_str())],
        )
        .map_err(|e| GeocodeError::new(format!("Invalid geocoder URL: {}", e)))?;

        debug!("Sending request to Google Geocoding API");
        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = ?e, "Google geocoding request failed");
            GeocodeError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Google geocoding returned HTTP error");
            return Err(GeocodeError::new(format!(
                "Geocoding service returned HTTP {}",
                status
            )));
        }

        let body: GoogleResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Google geocoding response");
            GeocodeError::new(format!("Failed to parse geocoding response: {}", e))
        })?;

        into_hit(body, query)
    }
}

fn into_hit(body: GoogleResponse, query: &str) -> Result<GeocodeHit, GeocodeError> {
    if body.status != "OK" {
        warn!(status = %body.status, "Google geocoding did not resolve query");
        let reason = match (body.status.as_str(), body.error_message) {
            ("ZERO_RESULTS", _) => format!("No location found for '{}'", query),
            (status, Some(message)) => format!("{}: {}", status, message),
            (status, None) => format!("Geocoding service answered {}", status),
        };
        return Err(GeocodeError::new(reason));
    }

    let first = body
        .results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::new(format!("No location found for '{}'", query)))?;

    debug!(
        lat = first.geometry.location.lat,
        lng = first.geometry.location.lng,
        address = %first.formatted_address,
        "Query resolved"
    );
    GeocodeHit::checked(
        first.geometry.location.lat,
        first.geometry.location.lng,
        first.formatted_address,
        first.place_id,
    )
}
