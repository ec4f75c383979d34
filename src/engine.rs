//! The session engine: one live round behind a lock, driven by async guesses.
//!
//! The lock is never held across the geocoder call. A guess snapshots the
//! round's generation, releases the lock, resolves, then re-locks and only
//! appends if the same round is still live and still `Playing`. Records are
//! therefore appended in completion order, and exactly one guess can end a
//! round.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use derive_more::{Display, Error};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{CatalogError, PlaceCatalog, PlaceSelection};
use crate::clock::{Clock, SystemClock};
use crate::config::ConfigError;
use crate::events::SessionEvent;
use crate::games::quest::{
    GamePolicy, GameStatus, Guess, GuessApplied, GuessError, GuessRecord, Hint, HintError,
    MapView, Resolution, Session,
};
use crate::geocoding::Geocoder;

/// Buffered events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 64;

/// Cloneable handle to a game engine.
///
/// Clones share the same round; construct a second engine for an independent
/// game.
#[derive(Debug, Clone)]
pub struct GameEngine {
    inner: Arc<EngineInner>,
}

#[derive(Debug)]
struct EngineInner {
    session: Mutex<Session>,
    catalog: PlaceCatalog,
    selection: PlaceSelection,
    policy: GamePolicy,
    geocoder: Arc<dyn Geocoder>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<SessionEvent>,
    next_guess_id: AtomicU64,
    next_generation: AtomicU64,
}

/// Builder for [`GameEngine`].
#[derive(Debug)]
pub struct GameEngineBuilder {
    catalog: PlaceCatalog,
    geocoder: Arc<dyn Geocoder>,
    selection: PlaceSelection,
    policy: GamePolicy,
    clock: Arc<dyn Clock>,
}

impl GameEngineBuilder {
    /// Sets the scoring policy.
    pub fn policy(mut self, policy: GamePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how targets are picked.
    pub fn selection(mut self, selection: PlaceSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Replaces the wall clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Starts the engine with its first round.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the policy is invalid or the selection
    /// names a place that does not exist.
    #[instrument(skip(self), fields(places = self.catalog.len(), selection = ?self.selection))]
    pub fn build(self) -> Result<GameEngine, EngineError> {
        self.policy.validate()?;
        let now = self.clock.now();
        let target = self.catalog.select(self.selection, now.date_naive())?.clone();
        let session = Session::new(0, target, self.policy, now);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        info!(place = %session.target().name(), "Game engine ready");
        Ok(GameEngine {
            inner: Arc::new(EngineInner {
                session: Mutex::new(session),
                catalog: self.catalog,
                selection: self.selection,
                policy: self.policy,
                geocoder: self.geocoder,
                clock: self.clock,
                events,
                next_guess_id: AtomicU64::new(1),
                next_generation: AtomicU64::new(1),
            }),
        })
    }
}

impl GameEngine {
    /// Starts building an engine over `catalog`, resolving guesses with
    /// `geocoder`.
    pub fn builder(catalog: PlaceCatalog, geocoder: Arc<dyn Geocoder>) -> GameEngineBuilder {
        GameEngineBuilder {
            catalog,
            geocoder,
            selection: PlaceSelection::default(),
            policy: GamePolicy::default(),
            clock: Arc::new(SystemClock),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // Mutations validate before writing; a poisoned session is still consistent.
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        if self.inner.events.send(event).is_err() {
            debug!("No event subscribers");
        }
    }

    /// Subscribes to events from this engine.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// The policy every round of this engine uses.
    pub fn policy(&self) -> &GamePolicy {
        &self.inner.policy
    }

    /// The place catalog.
    pub fn catalog(&self) -> &PlaceCatalog {
        &self.inner.catalog
    }

    /// Reveals the next hint of the live round.
    ///
    /// # Errors
    ///
    /// Returns [`HintError`] when no further hint exists or the round ended;
    /// the round is unchanged.
    #[instrument(skip(self))]
    pub fn reveal_next_hint(&self) -> Result<Hint, HintError> {
        let (hint, generation) = {
            let mut session = self.lock();
            let hint = session.reveal_next_hint()?;
            (hint, session.generation())
        };
        self.emit(SessionEvent::HintRevealed {
            generation,
            hint: hint.clone(),
        });
        Ok(hint)
    }

    /// Submits a guess, resolving it through the geocoder.
    ///
    /// A geocoding failure is still recorded, and still costs an attempt.
    ///
    /// # Errors
    ///
    /// - [`GuessError::Validation`] for blank input (nothing recorded, no
    ///   network call)
    /// - [`GuessError::IllegalState`] if the round ended before or while the
    ///   guess was being resolved
    /// - [`GuessError::SessionReset`] if the round was reset meanwhile
    #[instrument(skip(self))]
    pub async fn submit_guess(
        &self,
        location: &str,
        country: &str,
    ) -> Result<GuessRecord, GuessError> {
        let guess = Guess::new(location, country)?;

        let generation = {
            let session = self.lock();
            session.ensure_accepting_guesses().inspect_err(|_| {
                warn!(state = %session.state(), "Guess rejected, round already over");
            })?;
            session.generation()
        };

        debug!(query = %guess.query(), generation, "Resolving guess");
        let resolution = match self.inner.geocoder.resolve(&guess.query()).await {
            Ok(hit) if !hit.coordinates().is_valid() => {
                warn!(
                    lat = hit.latitude(),
                    lng = hit.longitude(),
                    "Geocoder returned invalid coordinates, recording as failed guess"
                );
                Resolution::Unresolved {
                    reason: format!(
                        "Geocoding service returned invalid coordinates ({}, {})",
                        hit.latitude(),
                        hit.longitude()
                    ),
                }
            }
            Ok(hit) => Resolution::Located {
                coordinates: hit.coordinates(),
                formatted_address: hit.formatted_address().clone(),
            },
            Err(e) => {
                warn!(error = %e, "Geocoding failed, recording as failed guess");
                Resolution::Unresolved {
                    reason: e.reason().to_string(),
                }
            }
        };

        let applied = {
            let mut session = self.lock();
            if session.generation() != generation {
                warn!(
                    submitted = generation,
                    current = session.generation(),
                    "Round was reset while guess was in flight, discarding"
                );
                return Err(GuessError::SessionReset);
            }
            let now = self.inner.clock.now();
            let id = self.inner.next_guess_id.fetch_add(1, Ordering::SeqCst);
            session.record_guess(id, guess, resolution, now)?
        };

        self.publish(generation, &applied);
        Ok(applied.record)
    }

    fn publish(&self, generation: u64, applied: &GuessApplied) {
        self.emit(SessionEvent::GuessRecorded {
            generation,
            record: applied.record.clone(),
        });
        if let Some(state) = applied.transition {
            self.emit(SessionEvent::RoundEnded { generation, state });
        }
        for achievement in &applied.unlocked {
            self.emit(SessionEvent::AchievementUnlocked {
                generation,
                achievement: achievement.clone(),
            });
        }
    }

    /// Snapshot of the live round. Never mutates.
    pub fn status(&self) -> GameStatus {
        let now = self.inner.clock.now();
        self.lock().status(now)
    }

    /// Map center and zoom for the live round.
    pub fn map_view(&self) -> MapView {
        self.lock().map_view()
    }

    /// Identifies the live round; changes on every reset.
    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    /// Discards the live round and starts a fresh one.
    ///
    /// Guesses still in flight for the old round are discarded when they
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the selection policy fails; the old round
    /// stays live in that case.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<GameStatus, CatalogError> {
        let now = self.inner.clock.now();
        let target = self
            .inner
            .catalog
            .select(self.inner.selection, now.date_naive())?
            .clone();
        let generation = self.inner.next_generation.fetch_add(1, Ordering::SeqCst);
        let fresh = Session::new(generation, target, self.inner.policy, now);
        let place = fresh.target().name().clone();
        let status = fresh.status(now);

        *self.lock() = fresh;
        info!(generation, %place, "Round reset");
        self.emit(SessionEvent::RoundStarted { generation, place });
        Ok(status)
    }
}

/// Engine construction error.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", message, file, line)]
pub struct EngineError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<CatalogError> for EngineError {
    #[track_caller]
    fn from(err: CatalogError) -> Self {
        Self::new(format!("Catalog: {}", err.message))
    }
}

impl From<ConfigError> for EngineError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        Self::new(format!("Policy: {}", err.message))
    }
}
