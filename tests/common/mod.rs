//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use fooqawhi_quest::{GeocodeError, GeocodeHit, Geocoder, Place, PlaceCatalog};
use tokio::sync::{Semaphore, mpsc};

pub const MATERA: (f64, f64) = (40.6664, 16.6043);
pub const ROME: (f64, f64) = (41.9, 12.5);
pub const NAPLES: (f64, f64) = (40.8518, 14.2681);

/// Matera with four hints.
pub fn matera() -> Place {
    Place::new(
        "Matera",
        "Italy",
        MATERA.0,
        MATERA.1,
        "Sassi cave dwellings",
        vec![
            "Caves, but make it real estate.".to_string(),
            "Hollywood's favourite stand-in for Jerusalem.".to_string(),
            "The arch of the boot.".to_string(),
            "Basilicata.".to_string(),
        ],
    )
}

/// A second place, so resets have somewhere else to go.
pub fn hallstatt() -> Place {
    Place::new(
        "Hallstatt",
        "Austria",
        47.5622,
        13.6493,
        "Lakeside village",
        vec![
            "Someone copied this village.".to_string(),
            "Salt, for seven thousand years.".to_string(),
        ],
    )
}

pub fn catalog() -> PlaceCatalog {
    PlaceCatalog::new(vec![matera(), hallstatt()]).expect("valid catalog")
}

/// Answers from a fixed table; unknown queries fail like ZERO_RESULTS.
#[derive(Debug, Default)]
pub struct ScriptedGeocoder {
    answers: HashMap<String, (f64, f64)>,
}

impl ScriptedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, at: (f64, f64)) -> Self {
        self.answers.insert(query.to_string(), at);
        self
    }

    /// The usual Italian answers.
    pub fn italy() -> Self {
        Self::new()
            .with("Matera, Italy", (40.70, 16.60))
            .with("Rome, Italy", ROME)
            .with("Naples, Italy", NAPLES)
    }
}

#[async_trait::async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn resolve(&self, query: &str) -> Result<GeocodeHit, GeocodeError> {
        match self.answers.get(query) {
            Some(&(lat, lng)) => Ok(GeocodeHit::new(lat, lng, query, format!("id:{query}"))),
            None => Err(GeocodeError::new(format!("No location found for '{query}'"))),
        }
    }
}

/// Wraps another geocoder and holds every call until the test opens the gate.
///
/// Each call announces its query on `started` before waiting.
#[derive(Debug)]
pub struct GatedGeocoder {
    inner: ScriptedGeocoder,
    gate: Arc<Semaphore>,
    started: mpsc::UnboundedSender<String>,
}

impl GatedGeocoder {
    pub fn new(
        inner: ScriptedGeocoder,
    ) -> (Self, Arc<Semaphore>, mpsc::UnboundedReceiver<String>) {
        let gate = Arc::new(Semaphore::new(0));
        let (started, rx) = mpsc::unbounded_channel();
        (
            Self {
                inner,
                gate: Arc::clone(&gate),
                started,
            },
            gate,
            rx,
        )
    }
}

#[async_trait::async_trait]
impl Geocoder for GatedGeocoder {
    async fn resolve(&self, query: &str) -> Result<GeocodeHit, GeocodeError> {
        let _ = self.started.send(query.to_string());
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| GeocodeError::new("gate closed"))?;
        permit.forget();
        self.inner.resolve(query).await
    }
}
