//! Achievement rules, evaluated once at the moment a round is won.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, instrument};

use super::session::Session;
use super::types::{Achievement, AchievementId, GameState};

/// A single achievement condition over a just-won round.
pub trait AchievementRule {
    /// The achievement this rule grants.
    fn id(&self) -> AchievementId;

    /// Whether the round, won at `won_at`, earns the achievement.
    fn is_earned(&self, session: &Session, won_at: DateTime<Utc>) -> bool;
}

/// Won less than a minute after the round started.
#[derive(Debug, Clone, Copy)]
pub struct SpeedDemon;

impl SpeedDemon {
    /// Winning faster than this earns the achievement.
    pub fn limit() -> TimeDelta {
        TimeDelta::seconds(60)
    }
}

impl AchievementRule for SpeedDemon {
    fn id(&self) -> AchievementId {
        AchievementId::SpeedDemon
    }

    fn is_earned(&self, session: &Session, won_at: DateTime<Utc>) -> bool {
        session.elapsed(won_at) < Self::limit()
    }
}

/// Won with at most half of the place's hints revealed.
#[derive(Debug, Clone, Copy)]
pub struct HintMaster;

impl AchievementRule for HintMaster {
    fn id(&self) -> AchievementId {
        AchievementId::HintMaster
    }

    fn is_earned(&self, session: &Session, _won_at: DateTime<Utc>) -> bool {
        let total = session.target().hint_count();
        total > 0 && session.hints_revealed() * 2 <= total
    }
}

/// The only guess of the round was the winning one.
#[derive(Debug, Clone, Copy)]
pub struct FirstGuess;

impl AchievementRule for FirstGuess {
    fn id(&self) -> AchievementId {
        AchievementId::FirstGuess
    }

    fn is_earned(&self, session: &Session, _won_at: DateTime<Utc>) -> bool {
        matches!(session.guesses(), [only] if only.is_correct())
    }
}

fn rules() -> [&'static dyn AchievementRule; 3] {
    [&SpeedDemon, &HintMaster, &FirstGuess]
}

/// Every achievement a won round qualifies for, in rule order.
///
/// Pure: the result depends only on `session` and `won_at`. Rounds that are
/// not `Won` earn nothing. Already-unlocked achievements are still listed;
/// [`Session::unlock`] is what keeps the unlocked set free of duplicates.
#[instrument(skip(session), fields(generation = session.generation()))]
pub fn evaluate(session: &Session, won_at: DateTime<Utc>) -> Vec<Achievement> {
    if session.state() != GameState::Won {
        return Vec::new();
    }
    let earned: Vec<Achievement> = rules()
        .into_iter()
        .filter(|rule| rule.is_earned(session, won_at))
        .map(|rule| Achievement::from(rule.id()))
        .collect();
    debug!(count = earned.len(), "Achievements evaluated");
    earned
}
