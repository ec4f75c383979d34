//! Address resolution behind a provider-neutral trait.
//!
//! The engine only sees [`Geocoder::resolve`]. Every way a provider can fail
//! (transport error, non-success status, unparseable body, empty result set)
//! comes back as a [`GeocodeError`] carrying a readable reason.

mod google;
mod nominatim;

pub use google::GoogleGeocoder;
pub use nominatim::NominatimGeocoder;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use tracing::{info, instrument};

use crate::config::{ConfigError, GeocoderConfig};
use crate::games::quest::Coordinates;

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GeocodeHit {
    /// Latitude in decimal degrees.
    #[getter(skip)]
    latitude: f64,
    /// Longitude in decimal degrees.
    #[getter(skip)]
    longitude: f64,
    /// Canonical address reported by the provider.
    formatted_address: String,
    /// Provider-specific place identifier.
    place_id: String,
}

impl GeocodeHit {
    /// Creates a hit.
    pub fn new(
        latitude: f64,
        longitude: f64,
        formatted_address: impl Into<String>,
        place_id: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            formatted_address: formatted_address.into(),
            place_id: place_id.into(),
        }
    }

    /// Creates a hit from provider output.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the coordinates are not finite or fall
    /// outside latitude/longitude range.
    #[track_caller]
    pub fn checked(
        latitude: f64,
        longitude: f64,
        formatted_address: impl Into<String>,
        place_id: impl Into<String>,
    ) -> Result<Self, GeocodeError> {
        if !Coordinates::new(latitude, longitude).is_valid() {
            return Err(GeocodeError::new(format!(
                "Geocoding service returned invalid coordinates ({}, {})",
                latitude, longitude
            )));
        }
        Ok(Self::new(latitude, longitude, formatted_address, place_id))
    }

    /// Resolved position.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Geocoding failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Geocoding failed: {} at {}:{}", message, file, line)]
pub struct GeocodeError {
    /// Human-readable reason.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GeocodeError {
    /// Creates a new geocoding error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// The reason, without source location.
    pub fn reason(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for GeocodeError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("Geocoding request failed: {}", err))
    }
}

/// Resolves free-text addresses to coordinates.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync + std::fmt::Debug {
    /// Resolves `query` to its best match.
    async fn resolve(&self, query: &str) -> Result<GeocodeHit, GeocodeError>;
}

/// Supported geocoding services.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GeocoderProvider {
    /// Google Maps Geocoding API (needs an API key).
    Google,
    /// OpenStreetMap Nominatim.
    Nominatim,
}

/// Builds the configured geocoder.
///
/// # Errors
///
/// Returns [`ConfigError`] if the Google provider is selected without an API
/// key or the HTTP client cannot be built.
#[instrument(skip(config, api_key), fields(provider = %config.provider()))]
pub fn build_geocoder(
    config: &GeocoderConfig,
    api_key: Option<String>,
) -> Result<Arc<dyn Geocoder>, ConfigError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(*config.timeout_secs()))
        .user_agent(config.user_agent().as_str())
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

    let geocoder: Arc<dyn Geocoder> = match config.provider() {
        GeocoderProvider::Google => {
            let api_key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
                ConfigError::new(
                    "GOOGLE_MAPS_API_KEY environment variable not set".to_string(),
                )
            })?;
            let base_url = config
                .base_url()
                .clone()
                .unwrap_or_else(|| google::DEFAULT_BASE_URL.to_string());
            Arc::new(GoogleGeocoder::new(client, base_url, api_key))
        }
        GeocoderProvider::Nominatim => {
            let base_url = config
                .base_url()
                .clone()
                .unwrap_or_else(|| nominatim::DEFAULT_BASE_URL.to_string());
            Arc::new(NominatimGeocoder::new(client, base_url))
        }
    };

    info!("Geocoder ready");
    Ok(geocoder)
}
