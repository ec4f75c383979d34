//! Place catalog: the static pool of targets, loaded from TOML.

use chrono::{Datelike, NaiveDate};
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::games::quest::Place;

/// How a round's target is picked from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PlaceSelection {
    /// Always the place at `index`.
    Fixed {
        /// Catalog position.
        #[serde(default)]
        index: usize,
    },
    /// Uniformly at random on every reset.
    Random,
    /// One place per calendar day, rotating through the catalog.
    Daily,
}

impl Default for PlaceSelection {
    fn default() -> Self {
        PlaceSelection::Fixed { index: 0 }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    places: Vec<Place>,
}

/// An ordered, validated, non-empty list of places.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCatalog {
    places: Vec<Place>,
}

impl PlaceCatalog {
    /// Builds a catalog, validating every place.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the list is empty or a place has no
    /// hints, a blank name, or out-of-range coordinates.
    #[instrument(skip(places), fields(count = places.len()))]
    pub fn new(places: Vec<Place>) -> Result<Self, CatalogError> {
        if places.is_empty() {
            return Err(CatalogError::new("Place catalog is empty".to_string()));
        }
        for (index, place) in places.iter().enumerate() {
            validate_place(index, place)?;
        }
        info!(count = places.len(), "Place catalog loaded");
        Ok(Self { places })
    }

    /// Loads `[[places]]` records from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read, parsed, or
    /// fails validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!("Reading place catalog");
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::new(format!(
                "Failed to read catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses `[[places]]` records from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the text cannot be parsed or fails
    /// validation.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| CatalogError::new(format!("Failed to parse catalog: {}", e)))?;
        Self::new(file.places)
    }

    /// All places, in file order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Number of places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Picks a place according to `selection`.
    ///
    /// `today` drives [`PlaceSelection::Daily`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a fixed index is out of range.
    #[instrument(skip(self))]
    pub fn select(
        &self,
        selection: PlaceSelection,
        today: NaiveDate,
    ) -> Result<&Place, CatalogError> {
        let index = match selection {
            PlaceSelection::Fixed { index } => index,
            PlaceSelection::Random => rand::rng().random_range(0..self.places.len()),
            PlaceSelection::Daily => {
                let day = today.num_days_from_ce().unsigned_abs() as usize;
                day % self.places.len()
            }
        };
        let place = self.places.get(index).ok_or_else(|| {
            warn!(index, count = self.places.len(), "Fixed place index out of range");
            CatalogError::new(format!(
                "Place index {} out of range (catalog has {})",
                index,
                self.places.len()
            ))
        })?;
        debug!(index, place = %place.name(), "Place selected");
        Ok(place)
    }
}

fn validate_place(index: usize, place: &Place) -> Result<(), CatalogError> {
    if place.name().trim().is_empty() {
        return Err(CatalogError::new(format!("Place #{} has no name", index)));
    }
    if place.hint_count() == 0 {
        return Err(CatalogError::new(format!(
            "Place '{}' has no hints",
            place.name()
        )));
    }
    if place.hints().iter().any(|h| h.trim().is_empty()) {
        return Err(CatalogError::new(format!(
            "Place '{}' has a blank hint",
            place.name()
        )));
    }
    if !place.coordinates().is_valid() {
        return Err(CatalogError::new(format!(
            "Place '{}' has invalid coordinates ({}, {})",
            place.name(),
            place.latitude(),
            place.longitude()
        )));
    }
    Ok(())
}

/// Catalog error.
#[derive(Debug, Clone, Display, Error)]
#[display("Catalog error: {} at {}:{}", message, file, line)]
pub struct CatalogError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CatalogError {
    /// Creates a new catalog error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
