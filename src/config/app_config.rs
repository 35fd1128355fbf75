//! Application configuration - paths, scoring knobs and rendering colours as TOML values
//!
//! Each section implements `Default` with the built-in constants from
//! `config::defaults`, so a missing file behaves exactly like the stock tool.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration of the FMECA tool.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$AMDEC_CONFIG` env var
/// 2. `./amdec.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data, output and image locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// FMECA builder options
    #[serde(default)]
    pub fmeca: FmecaConfig,

    /// Maintenance planner options
    #[serde(default)]
    pub planner: PlannerConfig,

    /// TF-IDF index and retriever options
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Workbook styling
    #[serde(default)]
    pub render: RenderConfig,

    /// Chat options
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order:
    /// 1. `$AMDEC_CONFIG` environment variable
    /// 2. `./amdec.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from AMDEC_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from AMDEC_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "AMDEC_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./amdec.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./amdec.toml, using defaults");
                }
            }
        }

        info!("No amdec.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys only produce warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        for w in super::validation::validate_colours(&config.render) {
            warn!(field = %w.field, "{}, FMECA workbooks will be written without styling", w);
        }
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Reject values no part of the tool can work with.
    ///
    /// Rules:
    /// - similarity floor within [0, 1]
    /// - max_features, top_k, segment sizes > 0
    /// - default criticality within 1..=80
    ///
    /// Malformed colours only warn (see `validation::validate_colours`).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let r = &self.retrieval;
        if !r.similarity_floor.is_finite() || !(0.0..=1.0).contains(&r.similarity_floor) {
            errors.push(format!(
                "retrieval.similarity_floor = {} must be within [0, 1]",
                r.similarity_floor
            ));
        }
        for (name, value) in [
            ("retrieval.max_features", r.max_features),
            ("retrieval.search_top_k", r.search_top_k),
            ("retrieval.retrieve_top_k", r.retrieve_top_k),
            ("retrieval.segment_length", r.segment_length),
        ] {
            if value == 0 {
                errors.push(format!("{name} must be > 0"));
            }
        }

        let c = self.planner.default_criticality;
        if c == 0 || c > defaults::MAX_CRITICALITY {
            errors.push(format!(
                "planner.default_criticality = {c} must be within 1..={}",
                defaults::MAX_CRITICALITY
            ));
        }


        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Paths
// ============================================================================

/// Where inputs live and outputs land.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Generated FMECA workbooks (also scanned by the index)
    pub models_dir: PathBuf,
    /// Generated work orders (also scanned by the index)
    pub maintenance_dir: PathBuf,
    /// Directory holding the index snapshot
    pub vector_db_dir: PathBuf,
    /// Optional component catalog JSON for the chat
    pub catalog: PathBuf,
    /// Prefix used for work-order image references
    pub image_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from(defaults::MODELS_DIR),
            maintenance_dir: PathBuf::from(defaults::MAINTENANCE_DIR),
            vector_db_dir: PathBuf::from(defaults::VECTOR_DB_DIR),
            catalog: PathBuf::from(defaults::CATALOG_PATH),
            image_dir: defaults::IMAGE_DIR.to_string(),
        }
    }
}

impl PathsConfig {
    /// Default FMECA workbook location.
    pub fn fmeca_output(&self) -> PathBuf {
        self.models_dir.join(defaults::FMECA_FILE_NAME)
    }

    /// Persisted index location.
    pub fn index_file(&self) -> PathBuf {
        self.vector_db_dir.join(defaults::INDEX_FILE_NAME)
    }
}

// ============================================================================
// FMECA
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FmecaConfig {
    /// Seed for corrective-action sampling. Unset = entropy.
    pub seed: Option<u64>,
}

// ============================================================================
// Planner
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Criticality for pairs unknown to both the FMECA table and the static table
    pub default_criticality: u32,
    /// Seed for material sampling. Unset = entropy.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_criticality: defaults::DEFAULT_CRITICALITY,
            seed: None,
        }
    }
}

// ============================================================================
// Retrieval
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub max_features: usize,
    /// Strict lower bound on cosine similarity
    pub similarity_floor: f64,
    pub search_top_k: usize,
    pub retrieve_top_k: usize,
    pub max_segments: usize,
    pub segment_length: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_features: defaults::MAX_FEATURES,
            similarity_floor: defaults::SIMILARITY_FLOOR,
            search_top_k: defaults::SEARCH_TOP_K,
            retrieve_top_k: defaults::RETRIEVE_TOP_K,
            max_segments: defaults::MAX_SEGMENTS,
            segment_length: defaults::SEGMENT_LENGTH,
        }
    }
}

// ============================================================================
// Render
// ============================================================================

/// Workbook colours as `RRGGBB` hex.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub header_fill: String,
    pub header_font: String,
    pub fill_low: String,
    pub fill_moderate: String,
    pub fill_high: String,
    pub fill_critical: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            header_fill: defaults::HEADER_FILL.to_string(),
            header_font: defaults::HEADER_FONT.to_string(),
            fill_low: defaults::FILL_LOW.to_string(),
            fill_moderate: defaults::FILL_MODERATE.to_string(),
            fill_high: defaults::FILL_HIGH.to_string(),
            fill_critical: defaults::FILL_CRITICAL.to_string(),
        }
    }
}

impl RenderConfig {
    /// Named colour fields, in declaration order.
    pub fn colours(&self) -> [(&'static str, &str); 6] {
        [
            ("render.header_fill", &self.header_fill),
            ("render.header_font", &self.header_font),
            ("render.fill_low", &self.fill_low),
            ("render.fill_moderate", &self.fill_moderate),
            ("render.fill_high", &self.fill_high),
            ("render.fill_critical", &self.fill_critical),
        ]
    }
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Seed for template selection. Unset = entropy.
    pub seed: Option<u64>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok(), "Default config must validate");
        assert_eq!(config.planner.default_criticality, 25);
        assert_eq!(config.retrieval.max_features, 1000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[planner]
default_criticality = 30

[fmeca]
seed = 7
"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.planner.default_criticality, 30);
        assert_eq!(config.fmeca.seed, Some(7));
        assert!((config.retrieval.similarity_floor - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.paths.fmeca_output(), PathBuf::from("data/models/amdec_generated.xlsx"));
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let mut config = AppConfig::default();
        config.retrieval.similarity_floor = 1.5;
        config.retrieval.max_features = 0;
        config.planner.default_criticality = 0;
        let Err(ConfigError::Validation(errors)) = config.validate() else {
            panic!("out-of-range values must fail validation");
        };
        assert!(errors.iter().any(|e| e.contains("similarity_floor")));
        assert!(errors.iter().any(|e| e.contains("max_features")));
        assert!(errors.iter().any(|e| e.contains("default_criticality")));
    }

    #[test]
    fn test_bad_colour_does_not_fail_validation() {
        let mut config = AppConfig::default();
        config.render.fill_high = "orange".to_string();
        assert!(config.validate().is_ok(), "Non-hex colour only warns");
    }

    #[test]
    fn test_roundtrip_toml() {
        let original = AppConfig::default();
        let toml_str = original.to_toml().expect("serialization should work");
        assert!(toml_str.contains("[retrieval]"), "Missing [retrieval] section");
        assert!(toml_str.contains("[render]"), "Missing [render] section");
        let back = AppConfig::from_toml_str(&toml_str).expect("deserialization should work");
        assert_eq!(back.render.header_fill, original.render.header_fill);
        assert_eq!(back.paths.models_dir, original.paths.models_dir);
    }

    #[test]
    fn test_load_from_file_reports_path() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("amdec.toml");
        std::fs::write(&path, "[planner\n").expect("write");
        let err = AppConfig::load_from_file(&path).expect_err("broken TOML must fail");
        assert!(err.to_string().contains("amdec.toml"), "error should name the file: {err}");
    }
}
