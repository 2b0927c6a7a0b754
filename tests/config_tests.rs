//! Configuration loading tests.

use std::path::PathBuf;
use std::time::Duration;

use memory_pairs::{
    BoardView, Error, GameConfig, GameController, ImageRef, ManualClock, MismatchPolicy,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("memory-pairs-{}-{name}", std::process::id()))
}

// =============================================================================
// JSON
// =============================================================================

/// Test that an empty document gives the defaults.
#[test]
fn test_empty_json_is_default() {
    let config = GameConfig::from_json_str("{}").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.images.len(), 8);
}

/// Test a document that sets every field.
#[test]
fn test_full_json() {
    let json = r#"{
        "images": ["cards/sun.png", "cards/moon.png"],
        "mismatch_delay_ms": 400,
        "tick_interval_ms": 500,
        "columns": 2,
        "seed": 99,
        "victory_message": "Done: {attempts} in {elapsed}",
        "mismatch_policy": "lock_until_revert"
    }"#;
    let config = GameConfig::from_json_str(json).unwrap();

    assert_eq!(
        config.images,
        vec![ImageRef::new("cards/sun.png"), ImageRef::new("cards/moon.png")]
    );
    assert_eq!(config.mismatch_delay(), Duration::from_millis(400));
    assert_eq!(config.tick_interval(), Duration::from_millis(500));
    assert_eq!(config.columns, 2);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.victory_message, "Done: {attempts} in {elapsed}");
    assert_eq!(config.mismatch_policy, MismatchPolicy::LockUntilRevert);
}

/// Test that unknown fields and wrong types are rejected.
#[test]
fn test_bad_json_is_rejected() {
    assert!(matches!(
        GameConfig::from_json_str(r#"{ "colour": "red" }"#),
        Err(Error::ParseConfig(_))
    ));
    assert!(matches!(
        GameConfig::from_json_str(r#"{ "columns": "four" }"#),
        Err(Error::ParseConfig(_))
    ));
    assert!(matches!(
        GameConfig::from_json_str(r#"{ "mismatch_policy": "never" }"#),
        Err(Error::ParseConfig(_))
    ));
}

/// Test that the config serializes back to the same value.
#[test]
fn test_json_round_trip() {
    let config = GameConfig::new(["x.jpg"]).with_seed(4).with_columns(1);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(GameConfig::from_json_str(&json).unwrap(), config);
}

// =============================================================================
// Files
// =============================================================================

/// Test loading a config file from disk.
#[test]
fn test_load_file() {
    let path = temp_path("load.json");
    std::fs::write(&path, r#"{ "images": ["one", "two", "three"], "seed": 1 }"#).unwrap();

    let loaded = GameConfig::load(&path);
    std::fs::remove_file(&path).unwrap();

    let config = loaded.unwrap();
    assert_eq!(config.images.len(), 3);
    assert_eq!(config.seed, Some(1));
    assert_eq!(config.columns, 4);
}

/// Test that a missing file reports its path.
#[test]
fn test_load_missing_file() {
    let path = temp_path("missing.json");
    let err = GameConfig::load(&path).unwrap_err();

    match &err {
        Error::ReadConfig { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected ReadConfig, got {other:?}"),
    }
    assert!(err.to_string().contains("missing.json"));
}

// =============================================================================
// Validation
// =============================================================================

/// Test that the controller refuses configs that cannot make a board.
#[test]
fn test_controller_validates_config() {
    let create = |config: GameConfig| GameController::new(config, BoardView::new(), ManualClock::new());

    let empty: [&str; 0] = [];
    assert!(matches!(create(GameConfig::new(empty)), Err(Error::NoImages)));
    assert!(matches!(
        create(GameConfig::new(["a", "b", "a"])),
        Err(Error::DuplicateImage(image)) if image.as_str() == "a"
    ));
    assert!(matches!(
        create(GameConfig::new(["a"]).with_columns(0)),
        Err(Error::NoColumns)
    ));
    assert!(create(GameConfig::new(["a"])).is_ok());
}

/// Test that the default images have readable labels.
#[test]
fn test_default_image_labels() {
    let config = GameConfig::default();
    let labels: Vec<&str> = config.images.iter().map(ImageRef::label).collect();
    assert_eq!(
        labels,
        vec!["cereza", "flor", "girasol", "hoja", "hongo", "nomo", "nuez", "tronco"]
    );
}
