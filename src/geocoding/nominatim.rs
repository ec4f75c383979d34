//! OpenStreetMap Nominatim search client.

use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use super::{GeocodeError, GeocodeHit, Geocoder};

/// Public Nominatim search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim refuses long free-text queries; fail fast instead.
pub const MAX_QUERY_LEN: usize = 200;

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    place_id: Option<serde_json::Value>,
}

/// Geocoder backed by a Nominatim instance.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Creates a client against `base_url` (the `/search` endpoint).
    ///
    /// Nominatim's usage policy requires an identifying `User-Agent`; set it
    /// on `client`.
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait::async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn resolve(&self, query: &str) -> Result<GeocodeHit, GeocodeError> {
        if query.len() > MAX_QUERY_LEN {
            return Err(GeocodeError::new(format!(
                "Location input too long (max {} chars)",
                MAX_QUERY_LEN
            )));
        }

        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[("q", query), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| GeocodeError::new(format!("Invalid geocoder URL: {}", e)))?;

        debug!("Sending request to Nominatim");
        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = ?e, "Nominatim request failed");
            GeocodeError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Nominatim returned HTTP error");
            return Err(GeocodeError::new(format!(
                "Geocoding service returned HTTP {}",
                status
            )));
        }

        let results: Vec<NominatimResult> = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Nominatim response");
            GeocodeError::new(format!("Failed to parse geocoding response: {}", e))
        })?;

        into_hit(results, query)
    }
}

fn into_hit(results: Vec<NominatimResult>, query: &str) -> Result<GeocodeHit, GeocodeError> {
    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::new(format!("No location found for '{}'", query)))?;

    let lat: f64 = first
        .lat
        .parse()
        .map_err(|_| GeocodeError::new(format!("Unparseable latitude '{}'", first.lat)))?;
    let lon: f64 = first
        .lon
        .parse()
        .map_err(|_| GeocodeError::new(format!("Unparseable longitude '{}'", first.lon)))?;

    // place_id is numeric in the JSON output, a string in some forks.
    let place_id = match first.place_id {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    };

    GeocodeHit::checked(lat, lon, first.display_name, place_id)
}
