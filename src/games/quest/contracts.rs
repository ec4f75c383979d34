//! Contract-based validation for guess recording.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} record_guess {Q}

use super::action::{Guess, GuessError};
use super::invariants::{InvariantSet, SessionInvariants};
use super::session::Session;
use super::types::GameState;
use tracing::{error, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GuessError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GuessError>;
}

// ─────────────────────────────────────────────────────────────
//  Guess Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the round is still being played.
pub struct RoundInProgress;

impl RoundInProgress {
    /// Fails with `IllegalState` once the round has ended.
    #[instrument(skip(session))]
    pub fn check(session: &Session) -> Result<(), GuessError> {
        session.ensure_accepting_guesses().inspect_err(|_| {
            warn!(state = %session.state(), "Guess submitted after the round ended");
        })
    }
}

/// Precondition: at least one attempt remains.
pub struct AttemptsRemain;

impl AttemptsRemain {
    /// Fails when the guess log is already full.
    #[instrument(skip(session))]
    pub fn check(session: &Session) -> Result<(), GuessError> {
        if session.guesses().len() >= session.policy().max_guesses() {
            warn!(
                guesses = session.guesses().len(),
                max = session.policy().max_guesses(),
                "Guess budget already spent"
            );
            Err(GuessError::IllegalState(GameState::Lost))
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Guess Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for recording a guess.
///
/// Preconditions:
/// - Round is `Playing`
/// - Guess budget not exhausted
///
/// Postconditions:
/// - Exactly one record appended, earlier records untouched
/// - Hint progress did not move
/// - All session invariants hold
pub struct GuessContract;

impl Contract<Session, Guess> for GuessContract {
    fn pre(session: &Session, _guess: &Guess) -> Result<(), GuessError> {
        RoundInProgress::check(session)?;
        AttemptsRemain::check(session)?;
        Ok(())
    }

    fn post(before: &Session, after: &Session) -> Result<(), GuessError> {
        let mut problems = Vec::new();

        if after.guesses().len() != before.guesses().len() + 1
            || !after.guesses().starts_with(before.guesses())
        {
            problems.push("guess log must grow by exactly one record".to_string());
        }
        if after.hints_revealed() != before.hints_revealed() {
            problems.push("recording a guess must not move hint progress".to_string());
        }
        if let Err(violations) = SessionInvariants::check_all(after) {
            problems.extend(violations.into_iter().map(|v| v.description));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            let joined = problems.join("; ");
            error!(problems = %joined, "Guess postcondition failed");
            Err(GuessError::InvariantViolation(format!(
                "Postcondition failed: {}",
                joined
            )))
        }
    }
}
