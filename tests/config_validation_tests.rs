//! Config Validation Tests
//!
//! Typo detection on unknown keys and range validation of the values the
//! pipeline depends on, exercised independently from the rest of the tool.

use boiler_amdec::config::validation::{known_config_keys, suggest_correction, validate_unknown_keys};
use boiler_amdec::config::{AppConfig, ConfigError};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_retrieval_key_warns_with_suggestion() {
    let toml_str = r#"
[retrieval]
similarity_flor = 0.2
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("similarity_flor"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("retrieval.similarity_floor"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn unknown_section_warns_without_breaking_load() {
    let toml_str = r#"
[planer]
default_criticality = 30
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.iter().any(|w| w.field == "planer"));
    let config = AppConfig::from_toml_str(toml_str).expect("unknown keys only warn");
    assert_eq!(config.planner.default_criticality, 25, "misspelt section is ignored");
}

#[test]
fn far_away_key_has_no_suggestion() {
    assert!(suggest_correction("completely_unrelated_key", &known_config_keys()).is_none());
}

#[test]
fn every_default_key_is_known() {
    let raw = AppConfig::default().to_toml().expect("default config serializes");
    let warnings = validate_unknown_keys(&raw);
    assert!(warnings.is_empty(), "default config produced warnings: {warnings:?}");
}

// ============================================================================
// Range Validation
// ============================================================================

fn validation_errors(toml_str: &str) -> Vec<String> {
    match AppConfig::from_toml_str(toml_str) {
        Err(ConfigError::Validation(errors)) => errors,
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn similarity_floor_outside_unit_interval_rejected() {
    let errors = validation_errors("[retrieval]\nsimilarity_floor = 1.5\n");
    assert!(errors.iter().any(|e| e.contains("similarity_floor")), "{errors:?}");
}

#[test]
fn zero_max_features_rejected() {
    let errors = validation_errors("[retrieval]\nmax_features = 0\n");
    assert!(errors.iter().any(|e| e.contains("max_features")), "{errors:?}");
}

#[test]
fn default_criticality_out_of_range_rejected() {
    let errors = validation_errors("[planner]\ndefault_criticality = 81\n");
    assert!(errors.iter().any(|e| e.contains("default_criticality")), "{errors:?}");
}

#[test]
fn malformed_colour_keeps_the_rest_of_the_config() {
    let config = AppConfig::from_toml_str(
        r#"
[paths]
models_dir = "atelier/modeles"

[fmeca]
seed = 7

[render]
fill_low = "vert"
"#,
    )
    .expect("a bad colour only warns");
    assert_eq!(config.paths.models_dir, std::path::PathBuf::from("atelier/modeles"));
    assert_eq!(config.fmeca.seed, Some(7));
    assert_eq!(config.render.fill_low, "vert", "kept as written, the renderer falls back");
}

#[test]
fn multiple_errors_reported_together() {
    let errors = validation_errors(
        r#"
[retrieval]
similarity_floor = -0.1
max_features = 0

[planner]
default_criticality = 0
"#,
    );
    assert_eq!(errors.len(), 3, "{errors:?}");
}

#[test]
fn valid_overrides_are_applied() {
    let config = AppConfig::from_toml_str(
        r#"
[paths]
image_dir = "photos"

[retrieval]
similarity_floor = 0.25
max_segments = 2

[chat]
seed = 7
"#,
    )
    .expect("valid config");
    assert_eq!(config.paths.image_dir, "photos");
    assert!((config.retrieval.similarity_floor - 0.25).abs() < f64::EPSILON);
    assert_eq!(config.retrieval.max_segments, 2);
    assert_eq!(config.chat.seed, Some(7));
    assert_eq!(config.retrieval.max_features, 1000, "untouched values keep defaults");
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}
