//! The Fooqawhi hunt: one hidden place, progressive hints, five guesses.

mod achievements;
mod action;
mod contracts;
mod feedback;
pub mod geodesy;
pub mod invariants;
mod policy;
mod session;
mod types;
mod view;

pub use achievements::{AchievementRule, FirstGuess, HintMaster, SpeedDemon, evaluate};
pub use action::{Guess, GuessError, HintError, Resolution, score};
pub use contracts::{AttemptsRemain, Contract, GuessContract, RoundInProgress};
pub use feedback::feedback_for;
pub use geodesy::{CompassDirection, Coordinates};
pub use policy::GamePolicy;
pub use session::{GuessApplied, Session};
pub use types::{
    Achievement, AchievementId, GameState, GuessOutcome, GuessRecord, GuessScore, Hint, Place,
};
pub use view::{GameStatus, MapView, format_elapsed};
