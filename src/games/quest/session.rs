//! The round aggregate: one target, its hint progress, and the guess log.
//!
//! `Session` is plain data plus the transition rules. It never awaits and
//! never talks to the network; [`crate::GameEngine`] owns one behind a lock
//! and feeds it resolved guesses.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, instrument, warn};

use super::achievements;
use super::action::{self, Guess, GuessError, HintError, Resolution};
use super::contracts::{Contract, GuessContract};
use super::geodesy::Coordinates;
use super::policy::GamePolicy;
use super::types::{Achievement, GameState, GuessRecord, Hint, Place};
use super::view::{GameStatus, MapView};

/// Everything a recorded guess changed.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessApplied {
    /// The appended record.
    pub record: GuessRecord,
    /// Set when this guess ended the round.
    pub transition: Option<GameState>,
    /// Achievements newly unlocked by this guess.
    pub unlocked: Vec<Achievement>,
}

/// One round of the game.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) generation: u64,
    pub(crate) target: Place,
    pub(crate) policy: GamePolicy,
    pub(crate) hints_revealed: usize,
    pub(crate) guesses: Vec<GuessRecord>,
    pub(crate) state: GameState,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) achievements: Vec<Achievement>,
}

impl Session {
    /// Starts a round with the first hint already visible.
    #[instrument(skip(target, policy), fields(target = %target.name()))]
    pub fn new(
        generation: u64,
        target: Place,
        policy: GamePolicy,
        started_at: DateTime<Utc>,
    ) -> Self {
        info!(hints = target.hint_count(), "Starting new round");
        Self {
            generation,
            hints_revealed: target.hint_count().min(1),
            target,
            policy,
            guesses: Vec::new(),
            state: GameState::Playing,
            started_at,
            achievements: Vec::new(),
        }
    }

    /// Identifies this round within its engine.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The place to find.
    pub fn target(&self) -> &Place {
        &self.target
    }

    /// Policy captured when the round started.
    pub fn policy(&self) -> &GamePolicy {
        &self.policy
    }

    /// Number of hints currently visible.
    pub fn hints_revealed(&self) -> usize {
        self.hints_revealed
    }

    /// Guesses in the order they were recorded.
    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    /// Current round state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// When the round started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Unlocked achievements, in unlock order.
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    /// Time since the round started. Never negative.
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        (now - self.started_at).max(TimeDelta::zero())
    }

    /// The most recently revealed hint.
    pub fn current_hint(&self) -> Option<Hint> {
        let text = self.target.hint(self.hints_revealed)?;
        Some(Hint::new(
            text.to_string(),
            self.hints_revealed,
            self.hints_revealed == self.target.hint_count(),
        ))
    }

    /// Reveals the next hint in order.
    ///
    /// # Errors
    ///
    /// Returns [`HintError::GameOver`] once the round has ended and
    /// [`HintError::NoMoreHints`] when the last hint is already visible.
    /// Neither case changes the session.
    #[instrument(skip(self), fields(generation = self.generation, revealed = self.hints_revealed))]
    pub fn reveal_next_hint(&mut self) -> Result<Hint, HintError> {
        if self.state.is_terminal() {
            warn!(state = %self.state, "Hint requested after the round ended");
            return Err(HintError::GameOver(self.state));
        }
        let total = self.target.hint_count();
        if self.hints_revealed >= total {
            debug!(total, "No hints left to reveal");
            return Err(HintError::NoMoreHints(total));
        }

        self.hints_revealed += 1;
        info!(hint = self.hints_revealed, total, "Hint revealed");
        self.current_hint().ok_or(HintError::NoMoreHints(total))
    }

    /// Checks that a guess could be recorded right now.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::IllegalState`] once the round has ended.
    pub fn ensure_accepting_guesses(&self) -> Result<(), GuessError> {
        if self.state.is_terminal() {
            return Err(GuessError::IllegalState(self.state));
        }
        Ok(())
    }

    /// Scores a resolved guess, appends it, and applies any transition.
    ///
    /// The append and the transition happen together: the 5th non-winning
    /// record moves the round to `Lost`, a correct record moves it to `Won`
    /// and runs the achievement rules.
    ///
    /// # Errors
    ///
    /// Returns [`GuessError::IllegalState`] if the round already ended. In
    /// debug builds a broken postcondition rolls the session back and
    /// returns [`GuessError::InvariantViolation`].
    #[instrument(
        skip(self, guess, resolution),
        fields(generation = self.generation, guess = %guess)
    )]
    pub fn record_guess(
        &mut self,
        id: u64,
        guess: Guess,
        resolution: Resolution,
        now: DateTime<Utc>,
    ) -> Result<GuessApplied, GuessError> {
        GuessContract::pre(self, &guess)?;
        let before = cfg!(debug_assertions).then(|| self.clone());

        let (outcome, score) = action::score(
            resolution,
            self.target.coordinates(),
            self.policy.correct_guess_threshold_km(),
        );
        let record = GuessRecord::new(
            id,
            guess.location().to_string(),
            guess.country().to_string(),
            now,
            outcome,
            score,
        );
        self.guesses.push(record.clone());
        debug!(
            id,
            outcome = ?record.outcome(),
            count = self.guesses.len(),
            "Guess recorded"
        );

        let transition = if record.is_correct() {
            self.state = GameState::Won;
            Some(GameState::Won)
        } else if self.guesses.len() >= self.policy.max_guesses() {
            self.state = GameState::Lost;
            Some(GameState::Lost)
        } else {
            None
        };

        let unlocked = if transition == Some(GameState::Won) {
            achievements::evaluate(self, now)
                .into_iter()
                .filter(|achievement| self.unlock(achievement.clone()))
                .collect()
        } else {
            Vec::new()
        };

        if let Some(state) = transition {
            info!(%state, guesses = self.guesses.len(), "Round ended");
        }

        if let Some(before) = before {
            if let Err(e) = GuessContract::post(&before, self) {
                *self = before;
                return Err(e);
            }
        }

        Ok(GuessApplied {
            record,
            transition,
            unlocked,
        })
    }

    /// Adds an achievement unless one with the same id is already unlocked.
    ///
    /// Returns true if it was added.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        if self.achievements.iter().any(|a| a.id() == achievement.id()) {
            return false;
        }
        info!(achievement = %achievement.id(), "Achievement unlocked");
        self.achievements.push(achievement);
        true
    }

    /// Position of the latest guess that geocoded successfully.
    pub fn last_located_guess(&self) -> Option<Coordinates> {
        self.guesses
            .iter()
            .rev()
            .find_map(|g| g.score().as_ref().map(|s| s.resolved()))
    }

    /// Snapshot for the presentation layer.
    pub fn status(&self, now: DateTime<Utc>) -> GameStatus {
        GameStatus::from_session(self, now)
    }

    /// Map center and zoom for the current hint level.
    pub fn map_view(&self) -> MapView {
        MapView::from_session(self)
    }
}
