//! Fooqawhi Quest - a geography guessing game engine
//!
//! A hidden place is revealed one hint at a time. Players type a location
//! and a country; each guess is geocoded and scored by great-circle distance
//! against the target.
//!
//! # Architecture
//!
//! - **Games**: the round aggregate, geodesy, achievements and invariants
//! - **Engine**: the live round behind a lock, async guess submission
//! - **Geocoding**: provider-neutral trait with Google and Nominatim clients
//! - **Catalog / Config**: TOML-backed places and policy
//!
//! # Example
//!
//! ```no_run
//! use fooqawhi_quest::{GameConfig, GameEngine, PlaceCatalog, build_geocoder};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load_or_default("fooqawhi.toml")?;
//! let catalog = PlaceCatalog::from_file(config.catalog_path())?;
//! let geocoder = build_geocoder(config.geocoder(), config.api_key_from_env())?;
//!
//! let engine = GameEngine::builder(catalog, geocoder)
//!     .policy(*config.policy())
//!     .build()?;
//!
//! let record = engine.submit_guess("Matera", "Italy").await?;
//! println!("{:?}", record.outcome());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod catalog;
mod clock;
mod config;
mod engine;
mod events;
mod games;
mod geocoding;

// Crate-level exports - Catalog
pub use catalog::{CatalogError, PlaceCatalog, PlaceSelection};

// Crate-level exports - Configuration
pub use config::{ConfigError, GOOGLE_API_KEY_VAR, GameConfig, GeocoderConfig};

// Crate-level exports - Engine
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{EngineError, GameEngine, GameEngineBuilder};
pub use events::SessionEvent;

// Crate-level exports - Geocoding
pub use geocoding::{
    GeocodeError, GeocodeHit, Geocoder, GeocoderProvider, GoogleGeocoder, NominatimGeocoder,
    build_geocoder,
};

// Crate-level exports - Game types
pub use games::quest::geodesy::{
    EARTH_RADIUS_KM, bearing_degrees, compass_direction, distance_km, normalize_degrees,
};
pub use games::quest::invariants::{
    AchievementsUniqueInvariant, GuessBudgetInvariant, HintProgressInvariant, Invariant,
    InvariantSet, InvariantViolation, OutcomeConsistentInvariant, SessionInvariants,
};
pub use games::quest::{
    Achievement, AchievementId, AchievementRule, CompassDirection, Coordinates, FirstGuess,
    GamePolicy, GameState, GameStatus, Guess, GuessApplied, GuessError, GuessOutcome,
    GuessRecord, GuessScore, Hint, HintError, HintMaster, MapView, Place, Resolution, Session,
    SpeedDemon, evaluate as evaluate_achievements, feedback_for, format_elapsed,
};
