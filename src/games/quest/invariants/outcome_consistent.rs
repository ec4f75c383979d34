//! Outcome consistency invariant: the round state agrees with the guess log.

use super::super::session::Session;
use super::super::types::GameState;
use super::Invariant;

/// Invariant: state is a function of the guess log.
///
/// - `Won` iff the last record is the only correct one
/// - `Lost` iff the log is full and holds no correct record
/// - `Playing` otherwise
pub struct OutcomeConsistentInvariant;

impl Invariant<Session> for OutcomeConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let guesses = session.guesses();
        let correct = guesses.iter().filter(|g| g.is_correct()).count();
        let last_correct = guesses.last().is_some_and(|g| g.is_correct());

        let expected = if correct == 1 && last_correct {
            GameState::Won
        } else if correct == 0 && guesses.len() >= session.policy().max_guesses() {
            GameState::Lost
        } else if correct == 0 {
            GameState::Playing
        } else {
            // A correct guess somewhere other than the end, or more than one.
            return false;
        };

        session.state() == expected
    }

    fn description() -> &'static str {
        "Round state matches the guess log"
    }
}
