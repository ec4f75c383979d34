//! Guess budget invariant: the log never outgrows the attempt limit.

use super::super::session::Session;
use super::Invariant;

/// Invariant: at most `max_guesses` records, with strictly increasing ids.
pub struct GuessBudgetInvariant;

impl Invariant<Session> for GuessBudgetInvariant {
    fn holds(session: &Session) -> bool {
        let guesses = session.guesses();
        guesses.len() <= session.policy().max_guesses()
            && guesses.windows(2).all(|pair| pair[0].id() < pair[1].id())
    }

    fn description() -> &'static str {
        "Guess log stays within the attempt limit, ids strictly increasing"
    }
}
