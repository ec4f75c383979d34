//! Tests for achievement rules and unlock bookkeeping.

mod common;

use chrono::{DateTime, TimeDelta, Utc};
use common::{MATERA, ROME, matera};
use fooqawhi_quest::{
    Achievement, AchievementId, Coordinates, GamePolicy, GameState, Guess, Resolution, Session,
    evaluate_achievements,
};

fn located(at: (f64, f64)) -> Resolution {
    Resolution::Located {
        coordinates: Coordinates::new(at.0, at.1),
        formatted_address: "somewhere".to_string(),
    }
}

fn start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn ids(achievements: &[Achievement]) -> Vec<AchievementId> {
    achievements.iter().map(Achievement::id).collect()
}

#[test]
fn test_fast_first_guess_with_one_hint_earns_everything() {
    let mut session = Session::new(0, matera(), GamePolicy::default(), start());
    let applied = session
        .record_guess(
            1,
            Guess::new("Matera", "Italy").expect("guess"),
            located(MATERA),
            start() + TimeDelta::seconds(20),
        )
        .expect("recorded");

    assert_eq!(
        ids(&applied.unlocked),
        [
            AchievementId::SpeedDemon,
            AchievementId::HintMaster,
            AchievementId::FirstGuess
        ]
    );
    assert_eq!(session.achievements(), applied.unlocked.as_slice());
}

#[test]
fn test_slow_win_misses_speed_demon() {
    let mut session = Session::new(0, matera(), GamePolicy::default(), start());
    let applied = session
        .record_guess(
            1,
            Guess::new("Matera", "Italy").expect("guess"),
            located(MATERA),
            start() + TimeDelta::seconds(60),
        )
        .expect("recorded");

    assert!(!ids(&applied.unlocked).contains(&AchievementId::SpeedDemon));
}

#[test]
fn test_hint_master_boundary() {
    // Four hints: two revealed is exactly half and still counts.
    let mut session = Session::new(0, matera(), GamePolicy::default(), start());
    session.reveal_next_hint().expect("hint");
    let applied = session
        .record_guess(
            1,
            Guess::new("Matera", "Italy").expect("guess"),
            located(MATERA),
            start(),
        )
        .expect("recorded");
    assert!(ids(&applied.unlocked).contains(&AchievementId::HintMaster));

    let mut session = Session::new(0, matera(), GamePolicy::default(), start());
    session.reveal_next_hint().expect("hint");
    session.reveal_next_hint().expect("hint");
    let applied = session
        .record_guess(
            1,
            Guess::new("Matera", "Italy").expect("guess"),
            located(MATERA),
            start(),
        )
        .expect("recorded");
    assert!(!ids(&applied.unlocked).contains(&AchievementId::HintMaster));
}

#[test]
fn test_first_guess_needs_a_single_guess() {
    let mut session = Session::new(0, matera(), GamePolicy::default(), start());
    session
        .record_guess(
            1,
            Guess::new("Rome", "Italy").expect("guess"),
            located(ROME),
            start(),
        )
        .expect("recorded");
    let applied = session
        .record_guess(
            2,
            Guess::new("Matera", "Italy").expect("guess"),
            located(MATERA),
            start(),
        )
        .expect("recorded");

    assert_eq!(session.state(), GameState::Won);
    assert!(!ids(&applied.unlocked).contains(&AchievementId::FirstGuess));
}

#[test]
fn test_nothing_is_earned_unless_won() {
    let mut session = Session::new(0, matera(), GamePolicy::default(), start());
    assert!(evaluate_achievements(&session, start()).is_empty());

    session
        .record_guess(
            1,
            Guess::new("Rome", "Italy").expect("guess"),
            located(ROME),
            start(),
        )
        .expect("recorded");
    assert!(evaluate_achievements(&session, start()).is_empty());
    assert!(session.achievements().is_empty());
}

#[test]
fn test_unlock_is_idempotent() {
    let mut session = Session::new(0, matera(), GamePolicy::default(), start());
    session
        .record_guess(
            1,
            Guess::new("Matera", "Italy").expect("guess"),
            located(MATERA),
            start(),
        )
        .expect("recorded");
    let unlocked = session.achievements().len();

    for achievement in evaluate_achievements(&session, start()) {
        assert!(!session.unlock(achievement));
    }
    assert!(!session.unlock(Achievement::from(AchievementId::SpeedDemon)));
    assert_eq!(session.achievements().len(), unlocked);
}

#[test]
fn test_achievement_presentation() {
    let speed = Achievement::from(AchievementId::SpeedDemon);
    assert_eq!(speed.title(), "Speed Demon");
    assert_eq!(speed.icon(), "⚡");
    assert_eq!(AchievementId::FirstGuess.to_string(), "first_guess");
}
