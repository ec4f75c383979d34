//! Structured session events for subscribers outside the engine.

use serde::Serialize;

use crate::games::quest::{Achievement, GameState, GuessRecord, Hint};

/// Something that happened to the active round.
///
/// Every event carries the round's `generation`, so subscribers can drop
/// events from a round that has since been reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new round began.
    RoundStarted {
        /// Round id.
        generation: u64,
        /// Target place name.
        place: String,
    },
    /// A hint was revealed.
    HintRevealed {
        /// Round id.
        generation: u64,
        /// The revealed hint.
        hint: Hint,
    },
    /// A guess was appended to the log.
    GuessRecorded {
        /// Round id.
        generation: u64,
        /// The appended record.
        record: GuessRecord,
    },
    /// The round ended.
    RoundEnded {
        /// Round id.
        generation: u64,
        /// `Won` or `Lost`.
        state: GameState,
    },
    /// An achievement was unlocked.
    AchievementUnlocked {
        /// Round id.
        generation: u64,
        /// The achievement.
        achievement: Achievement,
    },
}

impl SessionEvent {
    /// Round the event belongs to.
    pub fn generation(&self) -> u64 {
        match self {
            SessionEvent::RoundStarted { generation, .. }
            | SessionEvent::HintRevealed { generation, .. }
            | SessionEvent::GuessRecorded { generation, .. }
            | SessionEvent::RoundEnded { generation, .. }
            | SessionEvent::AchievementUnlocked { generation, .. } => *generation,
        }
    }
}
