//! Player-facing feedback lines for a recorded guess.

use super::types::{GuessOutcome, GuessRecord};

/// Within this distance a miss counts as "very close".
pub const VERY_CLOSE_KM: f64 = 100.0;
/// Within this distance a miss counts as "getting warmer".
pub const WARMER_KM: f64 = 500.0;
/// Within this distance a miss counts as "not quite there".
pub const NOT_QUITE_KM: f64 = 1000.0;

/// One line of feedback describing how close a guess landed.
///
/// Direction is from the guess toward the target, so the player knows which
/// way to move.
pub fn feedback_for(record: &GuessRecord) -> String {
    match (record.outcome(), record.score()) {
        (GuessOutcome::Correct, _) => "Congratulations! You found the Fooqawhi!".to_string(),
        (GuessOutcome::GeocodeFailed { reason }, _) => format!(
            "The cartographers couldn't place \"{}, {}\" ({}). That guess still counts.",
            record.location_text(),
            record.country_text(),
            reason
        ),
        (GuessOutcome::Incorrect, None) => "Not there. Keep looking!".to_string(),
        (GuessOutcome::Incorrect, Some(score)) => {
            let km = score.distance_km().round();
            let direction = score.direction();
            if score.distance_km() < VERY_CLOSE_KM {
                "You're very close! The Fooqawhi are practically within shouting distance."
                    .to_string()
            } else if score.distance_km() < WARMER_KM {
                format!(
                    "You're getting warmer! The Fooqawhi are about {km}km {direction} from your guess."
                )
            } else if score.distance_km() < NOT_QUITE_KM {
                format!(
                    "Not quite there yet. The Fooqawhi are approximately {km}km {direction} from your guess."
                )
            } else {
                format!(
                    "The Fooqawhi are quite far from your guess - about {km}km {direction}."
                )
            }
        }
    }
}
