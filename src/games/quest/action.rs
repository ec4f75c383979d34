//! Player intents and the errors they can raise.
//!
//! A [`Guess`] is validated when it is built, before anything touches the
//! session or the network. A [`Resolution`] is what the geocoder made of it.

use super::geodesy::{Coordinates, compass_direction};
use super::types::{GameState, GuessOutcome, GuessScore};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A validated guess: both fields non-blank, surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    location: String,
    country: String,
}

impl Guess {
    /// Builds a guess from raw form input.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::Validation`] if either field is empty or
    /// whitespace only.
    #[instrument]
    pub fn new(location: &str, country: &str) -> Result<Self, GuessError> {
        let location = location.trim();
        let country = country.trim();
        if location.is_empty() || country.is_empty() {
            return Err(GuessError::Validation(
                "Please enter both location and country.".to_string(),
            ));
        }
        Ok(Self {
            location: location.to_string(),
            country: country.to_string(),
        })
    }

    /// Location text.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Country text.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Free-text address handed to the geocoder.
    pub fn query(&self) -> String {
        format!("{}, {}", self.location, self.country)
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.location, self.country)
    }
}

/// What the geocoder made of a guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// The guess resolved to a point.
    Located {
        /// Resolved position.
        coordinates: Coordinates,
        /// Address the provider matched.
        formatted_address: String,
    },
    /// The guess could not be resolved.
    Unresolved {
        /// Human-readable reason.
        reason: String,
    },
}

/// Scores a resolution against a target.
///
/// Correct iff the great-circle distance is at most `threshold_km`. The
/// bearing points from the guess toward the target.
pub fn score(
    resolution: Resolution,
    target: Coordinates,
    threshold_km: f64,
) -> (GuessOutcome, Option<GuessScore>) {
    match resolution {
        Resolution::Unresolved { reason } => (GuessOutcome::GeocodeFailed { reason }, None),
        Resolution::Located {
            coordinates,
            formatted_address,
        } => {
            let distance = coordinates.distance_km_to(&target);
            let bearing = coordinates.bearing_to(&target);
            let outcome = if distance <= threshold_km {
                GuessOutcome::Correct
            } else {
                GuessOutcome::Incorrect
            };
            let score = GuessScore::new(
                coordinates,
                formatted_address,
                distance,
                bearing,
                compass_direction(bearing),
            );
            (outcome, Some(score))
        }
    }
}

/// Why a guess was not recorded.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum GuessError {
    /// Empty or whitespace-only input. Costs no attempt.
    #[display("Invalid guess: {}", _0)]
    Validation(String),

    /// The round is no longer accepting guesses.
    #[display("Guess rejected: the game is already {}", _0)]
    IllegalState(GameState),

    /// The round was reset while this guess was being geocoded.
    #[display("Guess discarded: the round was reset while it was in flight")]
    SessionReset,

    /// Recording the guess would have broken a session invariant.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GuessError {}

/// Why no hint was revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum HintError {
    /// Every hint is already visible.
    #[display("No more hints: all {} are revealed", _0)]
    NoMoreHints(usize),

    /// The round has ended.
    #[display("No more hints: the game is already {}", _0)]
    GameOver(GameState),
}

impl std::error::Error for HintError {}
