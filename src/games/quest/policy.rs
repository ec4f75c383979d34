//! Tunable rules of a round.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ConfigError;

/// Policy constants consumed by the session engine.
///
/// Every field can be overridden from the `[policy]` table of the game
/// config; missing fields fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GamePolicy {
    /// A guess within this distance of the target wins.
    #[serde(default = "default_threshold_km")]
    correct_guess_threshold_km: f64,
    /// Guess attempts per round.
    #[serde(default = "default_max_guesses")]
    max_guesses: usize,
    /// Map zoom with only the first hint revealed.
    #[serde(default = "default_base_zoom")]
    base_zoom: u8,
    /// Zoom added per additional revealed hint.
    #[serde(default = "default_zoom_increment")]
    zoom_increment: u8,
    /// Zoom never exceeds this.
    #[serde(default = "default_max_zoom")]
    max_zoom: u8,
}

fn default_threshold_km() -> f64 {
    50.0
}

fn default_max_guesses() -> usize {
    5
}

fn default_base_zoom() -> u8 {
    2
}

fn default_zoom_increment() -> u8 {
    1
}

fn default_max_zoom() -> u8 {
    8
}

impl Default for GamePolicy {
    fn default() -> Self {
        Self {
            correct_guess_threshold_km: default_threshold_km(),
            max_guesses: default_max_guesses(),
            base_zoom: default_base_zoom(),
            zoom_increment: default_zoom_increment(),
            max_zoom: default_max_zoom(),
        }
    }
}

impl GamePolicy {
    /// Distance threshold for a correct guess, in kilometers.
    pub fn correct_guess_threshold_km(&self) -> f64 {
        self.correct_guess_threshold_km
    }

    /// Guess attempts per round.
    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    /// Zoom with one hint revealed.
    pub fn base_zoom(&self) -> u8 {
        self.base_zoom
    }

    /// Zoom step per extra hint.
    pub fn zoom_increment(&self) -> u8 {
        self.zoom_increment
    }

    /// Zoom cap.
    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Checks that a round played under this policy can end.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a negative or non-finite threshold, a zero
    /// guess budget, or a base zoom above the cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.correct_guess_threshold_km;
        if !(threshold.is_finite() && threshold >= 0.0) {
            warn!(threshold, "Rejecting policy threshold");
            return Err(ConfigError::new(
                "correct_guess_threshold_km must be a non-negative number".to_string(),
            ));
        }
        if self.max_guesses == 0 {
            return Err(ConfigError::new("max_guesses must be at least 1".to_string()));
        }
        if self.base_zoom > self.max_zoom {
            return Err(ConfigError::new("base_zoom must not exceed max_zoom".to_string()));
        }
        Ok(())
    }

    /// Map zoom for the given number of revealed hints.
    pub fn zoom_for(&self, hints_revealed: usize) -> u8 {
        let extra = hints_revealed.saturating_sub(1);
        let zoom = usize::from(self.base_zoom)
            .saturating_add(extra.saturating_mul(usize::from(self.zoom_increment)));
        zoom.min(usize::from(self.max_zoom)) as u8
    }
}
