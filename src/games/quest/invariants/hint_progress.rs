//! Hint progress invariant: the revealed count stays within the catalog.

use super::super::session::Session;
use super::Invariant;

/// Invariant: at least one hint is visible and never more than exist.
///
/// Places always carry at least one hint, so a round starts at 1 and can
/// only climb to the place's hint count.
pub struct HintProgressInvariant;

impl Invariant<Session> for HintProgressInvariant {
    fn holds(session: &Session) -> bool {
        let total = session.target().hint_count();
        if total == 0 {
            return session.hints_revealed() == 0;
        }
        (1..=total).contains(&session.hints_revealed())
    }

    fn description() -> &'static str {
        "Revealed hint count stays between 1 and the number of hints"
    }
}
