//! Tests for game configuration loading.

use std::fs;

use fooqawhi_quest::{GameConfig, GeocoderProvider, PlaceSelection};
use tempfile::TempDir;

#[test]
fn test_defaults_when_file_missing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = GameConfig::load_or_default(dir.path().join("fooqawhi.toml")).expect("defaults");

    assert_eq!(config, GameConfig::default());
    assert_eq!(config.policy().correct_guess_threshold_km(), 50.0);
    assert_eq!(config.policy().max_guesses(), 5);
    assert_eq!(*config.selection(), PlaceSelection::Fixed { index: 0 });
    assert_eq!(*config.geocoder().provider(), GeocoderProvider::Google);
    assert_eq!(*config.geocoder().timeout_secs(), 10);
}

#[test]
fn test_full_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("fooqawhi.toml");
    fs::write(
        &path,
        r#"
catalog_path = "custom/places.toml"

[selection]
mode = "daily"

[policy]
correct_guess_threshold_km = 25.0
max_guesses = 3

[geocoder]
provider = "nominatim"
base_url = "http://localhost:8080/search"
timeout_secs = 3
"#,
    )
    .expect("Write failed");

    let config = GameConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.catalog_path().to_str(), Some("custom/places.toml"));
    assert_eq!(*config.selection(), PlaceSelection::Daily);
    assert_eq!(config.policy().correct_guess_threshold_km(), 25.0);
    assert_eq!(config.policy().max_guesses(), 3);
    assert_eq!(config.policy().base_zoom(), 2);
    assert_eq!(*config.geocoder().provider(), GeocoderProvider::Nominatim);
    assert_eq!(
        config.geocoder().base_url().as_deref(),
        Some("http://localhost:8080/search")
    );
    assert_eq!(*config.geocoder().timeout_secs(), 3);
    assert!(config.geocoder().user_agent().starts_with("fooqawhi_quest/"));
    assert_eq!(config.api_key_from_env(), None);
}

#[test]
fn test_fixed_selection_index() {
    let config = GameConfig::from_toml_str(
        r#"
[selection]
mode = "fixed"
index = 2
"#,
    )
    .expect("parses");
    assert_eq!(*config.selection(), PlaceSelection::Fixed { index: 2 });
}

#[test]
fn test_rejects_zero_guesses() {
    let err = GameConfig::from_toml_str("[policy]\nmax_guesses = 0\n").unwrap_err();
    assert!(err.message.contains("max_guesses"));
}

#[test]
fn test_rejects_negative_threshold() {
    assert!(GameConfig::from_toml_str("[policy]\ncorrect_guess_threshold_km = -1.0\n").is_err());
}

#[test]
fn test_rejects_inverted_zoom() {
    assert!(GameConfig::from_toml_str("[policy]\nbase_zoom = 9\nmax_zoom = 4\n").is_err());
}

#[test]
fn test_rejects_unknown_provider() {
    assert!(GameConfig::from_toml_str("[geocoder]\nprovider = \"bing\"\n").is_err());
}

#[test]
fn test_invalid_toml_in_existing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("fooqawhi.toml");
    fs::write(&path, "this is not valid toml !!!@@@").expect("Write failed");
    assert!(GameConfig::load_or_default(&path).is_err());
}

#[test]
fn test_with_policy_validates_override() {
    let config = GameConfig::default();
    let tighter = config.policy().with_correct_guess_threshold_km(10.0);
    let updated = config.clone().with_policy(tighter).expect("valid override");
    assert_eq!(updated.policy().correct_guess_threshold_km(), 10.0);

    let broken = config.policy().with_correct_guess_threshold_km(-1.0);
    let err = config.with_policy(broken).unwrap_err();
    assert!(err.message.contains("correct_guess_threshold_km"));
}
