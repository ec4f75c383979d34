//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::catalog::PlaceSelection;
use crate::games::quest::GamePolicy;
use crate::geocoding::GeocoderProvider;

/// Environment variable holding the Google Maps API key.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Path of the place catalog TOML.
    #[serde(default = "default_catalog_path")]
    catalog_path: PathBuf,

    /// How a place is picked for each round.
    #[serde(default)]
    selection: PlaceSelection,

    /// Scoring and map policy.
    #[serde(default)]
    policy: GamePolicy,

    /// Geocoding provider settings.
    #[serde(default)]
    geocoder: GeocoderConfig,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/places.toml")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            selection: PlaceSelection::default(),
            policy: GamePolicy::default(),
            geocoder: GeocoderConfig::default(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(catalog = %config.catalog_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not a valid config.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the scoring policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `policy` is invalid; the config is dropped.
    pub fn with_policy(mut self, policy: GamePolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    /// Replaces the catalog path.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Reads the provider API key from the environment, if set.
    pub fn api_key_from_env(&self) -> Option<String> {
        match self.geocoder.provider {
            GeocoderProvider::Google => std::env::var(GOOGLE_API_KEY_VAR).ok(),
            GeocoderProvider::Nominatim => None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()
    }
}

/// Geocoding provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Which service to call.
    #[serde(default = "default_provider")]
    provider: GeocoderProvider,

    /// Endpoint override; the provider's public endpoint when absent.
    #[serde(default)]
    base_url: Option<String>,

    /// HTTP timeout for one resolution.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    user_agent: String,
}

fn default_provider() -> GeocoderProvider {
    GeocoderProvider::Google
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("fooqawhi_quest/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl GeocoderConfig {
    /// Creates settings for `provider` at an explicit endpoint.
    pub fn new(provider: GeocoderProvider, base_url: Option<String>) -> Self {
        Self {
            provider,
            base_url,
            ..Self::default()
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
