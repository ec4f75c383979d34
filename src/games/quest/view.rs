//! Read-only projections of a round for the presentation layer.

use chrono::{DateTime, TimeDelta, Utc};
use derive_getters::Getters;
use serde::Serialize;

use super::geodesy::Coordinates;
use super::session::Session;
use super::types::{Achievement, GameState, GuessRecord, Hint, Place};

/// Snapshot of a round. This is the whole contract the UI may depend on.
#[derive(Debug, Clone, PartialEq, Getters, Serialize)]
pub struct GameStatus {
    /// Most recently revealed hint.
    current_hint: Option<Hint>,
    /// Hints revealed so far.
    hints_revealed: usize,
    /// Hints available for the target.
    total_hints: usize,
    /// Guesses recorded so far.
    guesses_made: usize,
    /// Guess attempts per round.
    max_guesses: usize,
    /// Round state.
    state: GameState,
    /// The target, always included; revealing it is the UI's call.
    target_place: Place,
    /// Every recorded guess, oldest first.
    guesses: Vec<GuessRecord>,
    /// Time since the round started, `m:ss`.
    elapsed: String,
    /// Unlocked achievements.
    achievements: Vec<Achievement>,
}

impl GameStatus {
    pub(crate) fn from_session(session: &Session, now: DateTime<Utc>) -> Self {
        Self {
            current_hint: session.current_hint(),
            hints_revealed: session.hints_revealed(),
            total_hints: session.target().hint_count(),
            guesses_made: session.guesses().len(),
            max_guesses: session.policy().max_guesses(),
            state: session.state(),
            target_place: session.target().clone(),
            guesses: session.guesses().to_vec(),
            elapsed: format_elapsed(session.elapsed(now)),
            achievements: session.achievements().to_vec(),
        }
    }

    /// Attempts left before the round is lost.
    pub fn guesses_remaining(&self) -> usize {
        self.max_guesses.saturating_sub(self.guesses_made)
    }

    /// Whether another hint can be revealed right now.
    pub fn can_reveal_hint(&self) -> bool {
        self.state == GameState::Playing && self.hints_revealed < self.total_hints
    }
}

/// Where the map should look.
#[derive(Debug, Clone, Copy, PartialEq, Getters, Serialize)]
pub struct MapView {
    /// Always the target's position.
    center: Coordinates,
    /// Zoom level for the current hint count.
    zoom: u8,
    /// Latest successfully geocoded guess, for a "your guess" marker.
    last_guess: Option<Coordinates>,
}

impl MapView {
    pub(crate) fn from_session(session: &Session) -> Self {
        Self {
            center: session.target().coordinates(),
            zoom: session.policy().zoom_for(session.hints_revealed()),
            last_guess: session.last_located_guess(),
        }
    }
}

/// Formats a duration as `minutes:seconds`, seconds zero-padded.
///
/// Minutes are not wrapped into hours. Negative durations format as `0:00`.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    format!("{}:{:02}", total / 60, total % 60)
}
