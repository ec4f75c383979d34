//! Tests for loading and selecting from the place catalog.

mod common;

use std::fs;

use chrono::NaiveDate;
use common::{hallstatt, matera};
use fooqawhi_quest::{Place, PlaceCatalog, PlaceSelection};
use tempfile::TempDir;

const TWO_PLACES: &str = r#"
[[places]]
name = "Matera"
country = "Italy"
latitude = 40.6664
longitude = 16.6043
feature = "Sassi"
hints = ["Caves.", "More caves."]

[[places]]
name = "Hallstatt"
country = "Austria"
latitude = 47.5622
longitude = 13.6493
sarcastic_descriptions = ["Salt."]
"#;

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("places.toml");
    fs::write(&path, TWO_PLACES).expect("Write failed");

    let catalog = PlaceCatalog::from_file(&path).expect("Load failed");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.places()[0].name(), "Matera");
    assert_eq!(catalog.places()[0].hint(2), Some("More caves."));
    assert_eq!(catalog.places()[1].hint_count(), 1);
    assert_eq!(catalog.places()[1].feature(), "");
}

#[test]
fn test_bundled_catalog_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/places.toml");
    let catalog = PlaceCatalog::from_file(path).expect("bundled catalog loads");
    assert_eq!(catalog.places()[0].name(), "Matera");
    assert!(catalog.places().iter().all(|p| p.hint_count() >= 2));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = PlaceCatalog::from_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read catalog"));
}

#[test]
fn test_rejects_empty_catalog() {
    assert!(PlaceCatalog::new(Vec::new()).is_err());
    assert!(PlaceCatalog::from_toml_str("places = []").is_err());
}

#[test]
fn test_rejects_place_without_hints() {
    let bare = Place::new("Nowhere", "Nada", 0.0, 0.0, "", Vec::new());
    let err = PlaceCatalog::new(vec![matera(), bare]).unwrap_err();
    assert!(err.message.contains("has no hints"), "{}", err.message);
}

#[test]
fn test_rejects_blank_hint() {
    let place = Place::new("Blank", "Nada", 0.0, 0.0, "", vec!["  ".to_string()]);
    assert!(PlaceCatalog::new(vec![place]).is_err());
}

#[test]
fn test_rejects_bad_coordinates() {
    let place = Place::new("Off", "Map", 95.0, 0.0, "", vec!["Hint".to_string()]);
    let err = PlaceCatalog::new(vec![place]).unwrap_err();
    assert!(err.message.contains("invalid coordinates"));
}

#[test]
fn test_fixed_selection() {
    let catalog = PlaceCatalog::new(vec![matera(), hallstatt()]).expect("valid");
    let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("date");

    let first = catalog
        .select(PlaceSelection::default(), today)
        .expect("select");
    assert_eq!(first.name(), "Matera");

    let second = catalog
        .select(PlaceSelection::Fixed { index: 1 }, today)
        .expect("select");
    assert_eq!(second.name(), "Hallstatt");

    assert!(catalog.select(PlaceSelection::Fixed { index: 2 }, today).is_err());
}

#[test]
fn test_daily_selection_rotates() {
    let catalog = PlaceCatalog::new(vec![matera(), hallstatt()]).expect("valid");
    let day = NaiveDate::from_ymd_opt(2026, 3, 1).expect("date");
    let next = day.succ_opt().expect("date");

    let a = catalog.select(PlaceSelection::Daily, day).expect("select");
    let again = catalog.select(PlaceSelection::Daily, day).expect("select");
    let b = catalog.select(PlaceSelection::Daily, next).expect("select");
    assert_eq!(a, again);
    assert_ne!(a, b);
}

#[test]
fn test_random_selection_stays_in_catalog() {
    let catalog = PlaceCatalog::new(vec![matera(), hallstatt()]).expect("valid");
    let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("date");
    for _ in 0..20 {
        let place = catalog.select(PlaceSelection::Random, today).expect("select");
        assert!(catalog.places().contains(place));
    }
}
