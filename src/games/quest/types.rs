//! Core domain types for the Fooqawhi hunt.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::geodesy::{CompassDirection, Coordinates};

/// A place the Fooqawhi may be hiding, with its hints in reveal order.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct Place {
    /// Place name, e.g. "Matera".
    name: String,
    /// Country the place belongs to.
    country: String,
    /// Latitude in decimal degrees.
    #[getter(skip)]
    latitude: f64,
    /// Longitude in decimal degrees.
    #[getter(skip)]
    longitude: f64,
    /// Short description shown once the place is revealed.
    #[serde(default)]
    feature: String,
    /// Hints, revealed strictly in this order.
    #[serde(alias = "sarcastic_descriptions")]
    hints: Vec<String>,
}

impl Place {
    /// Creates a place. Validation happens when a catalog is assembled.
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
        feature: impl Into<String>,
        hints: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
            feature: feature.into(),
            hints,
        }
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The place's position.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Number of hints available for this place.
    pub fn hint_count(&self) -> usize {
        self.hints.len()
    }

    /// Hint text by 1-based number.
    pub fn hint(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.hints.get(i))
            .map(String::as_str)
    }
}

/// One revealed hint.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct Hint {
    /// Hint text.
    text: String,
    /// 1-based hint number.
    number: usize,
    /// True when no further hint exists for this place.
    is_last: bool,
}

/// Round state. `Won` and `Lost` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameState {
    /// Hints and guesses are accepted.
    Playing,
    /// A guess landed within the threshold.
    Won,
    /// The guess budget ran out.
    Lost,
}

impl GameState {
    /// Returns true for `Won` and `Lost`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

/// How a recorded guess turned out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuessOutcome {
    /// Within the correctness threshold.
    Correct,
    /// Geocoded, but too far away.
    Incorrect,
    /// The geocoder could not resolve the guess.
    GeocodeFailed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl GuessOutcome {
    /// Returns true for [`GuessOutcome::Correct`].
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessOutcome::Correct)
    }
}

/// Geometry of a successfully geocoded guess relative to the target.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GuessScore {
    /// Where the geocoder placed the guess.
    #[getter(skip)]
    resolved: Coordinates,
    /// Address the provider matched.
    formatted_address: String,
    /// Great-circle distance from the guess to the target.
    #[getter(skip)]
    distance_km: f64,
    /// Initial bearing from the guess toward the target.
    #[getter(skip)]
    bearing_degrees: f64,
    /// 16-point direction of `bearing_degrees`.
    #[getter(skip)]
    direction: CompassDirection,
}

impl GuessScore {
    pub(crate) fn new(
        resolved: Coordinates,
        formatted_address: String,
        distance_km: f64,
        bearing_degrees: f64,
        direction: CompassDirection,
    ) -> Self {
        Self {
            resolved,
            formatted_address,
            distance_km,
            bearing_degrees,
            direction,
        }
    }

    /// Resolved guess position.
    pub fn resolved(&self) -> Coordinates {
        self.resolved
    }

    /// Distance to the target in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Bearing from the guess toward the target.
    pub fn bearing_degrees(&self) -> f64 {
        self.bearing_degrees
    }

    /// Compass direction from the guess toward the target.
    pub fn direction(&self) -> CompassDirection {
        self.direction
    }
}

/// An immutable record of one submitted guess.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GuessRecord {
    /// Unique id, increasing in the order records are created.
    id: u64,
    /// Location text as typed.
    location_text: String,
    /// Country text as typed.
    country_text: String,
    /// When the record was created.
    created_at: DateTime<Utc>,
    /// Scoring outcome.
    outcome: GuessOutcome,
    /// Present whenever geocoding succeeded.
    score: Option<GuessScore>,
}

impl GuessRecord {
    pub(crate) fn new(
        id: u64,
        location_text: String,
        country_text: String,
        created_at: DateTime<Utc>,
        outcome: GuessOutcome,
        score: Option<GuessScore>,
    ) -> Self {
        Self {
            id,
            location_text,
            country_text,
            created_at,
            outcome,
            score,
        }
    }

    /// Returns true when this guess won the round.
    pub fn is_correct(&self) -> bool {
        self.outcome.is_correct()
    }
}

/// Identifier of an unlockable achievement.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AchievementId {
    /// Won in under a minute.
    SpeedDemon,
    /// Won with at most half the hints revealed.
    HintMaster,
    /// Won with the very first guess.
    FirstGuess,
}

/// An unlocked achievement, as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique key.
    #[getter(skip)]
    id: AchievementId,
    /// Short title.
    title: String,
    /// One-line description.
    description: String,
    /// Display icon.
    icon: String,
}

impl Achievement {
    /// Unique key of this achievement.
    pub fn id(&self) -> AchievementId {
        self.id
    }
}

impl From<AchievementId> for Achievement {
    fn from(id: AchievementId) -> Self {
        let (title, description, icon) = match id {
            AchievementId::SpeedDemon => (
                "Speed Demon",
                "Found the Fooqawhi in under 1 minute!",
                "⚡",
            ),
            AchievementId::HintMaster => (
                "Hint Master",
                "Solved with 50% or fewer hints!",
                "🧠",
            ),
            AchievementId::FirstGuess => (
                "First Guess Wonder",
                "Found the Fooqawhi on your first try!",
                "🎯",
            ),
        };
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }
}
