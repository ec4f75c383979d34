//! Achievement invariant: unlocked set is keyed by id and only follows a win.

use std::collections::HashSet;

use super::super::session::Session;
use super::super::types::GameState;
use super::Invariant;

/// Invariant: no duplicate achievement ids, and none unless the round was won.
pub struct AchievementsUniqueInvariant;

impl Invariant<Session> for AchievementsUniqueInvariant {
    fn holds(session: &Session) -> bool {
        let achievements = session.achievements();
        if achievements.is_empty() {
            return true;
        }
        let ids: HashSet<_> = achievements.iter().map(|a| a.id()).collect();
        session.state() == GameState::Won && ids.len() == achievements.len()
    }

    fn description() -> &'static str {
        "Achievements are unique by id and only unlocked by a win"
    }
}
