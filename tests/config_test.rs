use deckforge::config::{Config, ScoringPreset, SynergyMode};
use deckforge::error::DeckForgeError;
use std::fs;
use tempfile::tempdir;

#[test]
fn defaults_match_baseline_heuristic() {
    let config = Config::default();
    assert_eq!(config.weights.preset, ScoringPreset::Baseline);
    assert_eq!(config.synergy.mode, SynergyMode::FirstMatch);
    assert_eq!(config.engine.suggestion_threshold, 8);
    assert_eq!(config.engine.max_suggestions, 3);
    assert_eq!(config.weights.target_elixir, 3.8);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"weights":{"preset":"blended"},"synergy":{"mode":"additive"}}"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.weights.preset, ScoringPreset::Blended);
    assert_eq!(config.synergy.mode, SynergyMode::Additive);
    assert_eq!(config.weights.weight_win, 30.0);
    assert_eq!(config.engine.max_suggestions, 3);
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"weights":{"target_elixir":0.0}}"#).unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(DeckForgeError::Config(_))
    ));

    let mut config = Config::default();
    config.engine.suggestion_threshold = 0;
    assert!(config.validate().is_err());
}

#[test]
fn bundled_blended_preset_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/presets/blended.json");
    let config = Config::load_from_file(path).unwrap();
    assert_eq!(config.weights.preset, ScoringPreset::Blended);
    assert!((config.weights.blend_total() - 1.0).abs() < 1e-4);
}
