//! System-wide default constants.
//!
//! Centralises the values that `AppConfig::default()` and the CLI fall back to.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Paths
// ============================================================================

/// Environment variable pointing at the TOML configuration file.
pub const CONFIG_ENV_VAR: &str = "AMDEC_CONFIG";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "amdec.toml";

/// Generated FMECA workbooks.
pub const MODELS_DIR: &str = "data/models";

/// Generated maintenance work orders.
pub const MAINTENANCE_DIR: &str = "data/maintenance";

/// Retrieval index snapshot directory.
pub const VECTOR_DB_DIR: &str = "data/vector_db";

/// Optional component catalog used by the chat.
pub const CATALOG_PATH: &str = "data/chaudiere_data.json";

/// Prefix of the image references embedded in work orders.
pub const IMAGE_DIR: &str = "image";

/// File name of the FMECA workbook written when no output path is given.
pub const FMECA_FILE_NAME: &str = "amdec_generated.xlsx";

/// File name of the persisted retrieval index.
pub const INDEX_FILE_NAME: &str = "vectordb.json";

// ============================================================================
// Planner
// ============================================================================

/// Criticality used when neither the FMECA table nor the static table know
/// the (component, subcomponent) pair.
pub const DEFAULT_CRITICALITY: u32 = 25;

/// Upper bound of a criticality score (F 4 x G 5 x D 4).
pub const MAX_CRITICALITY: u32 = 80;

// ============================================================================
// Retrieval
// ============================================================================

/// Vocabulary cap of the TF-IDF vectorizer.
pub const MAX_FEATURES: usize = 1_000;

/// Results at or below this cosine similarity are discarded.
pub const SIMILARITY_FLOOR: f64 = 0.1;

/// Number of documents returned by a raw index search when the caller does not say.
pub const SEARCH_TOP_K: usize = 5;

/// Number of documents the retriever asks the index for.
pub const RETRIEVE_TOP_K: usize = 3;

/// Relevant segments extracted per retrieved document.
pub const MAX_SEGMENTS: usize = 3;

/// Width of a segment window (characters).
pub const SEGMENT_LENGTH: usize = 200;

/// Retrieval ingests at most this many bytes from one OOXML part.
pub const MAX_PART_BYTES: u64 = 50 * 1024 * 1024;

// ============================================================================
// Render
// ============================================================================

/// Header fill of the FMECA workbook (RGB hex).
pub const HEADER_FILL: &str = "0066CC";

/// Header font colour of the FMECA workbook (RGB hex).
pub const HEADER_FONT: &str = "FFFFFF";

/// Criticality cell fill for C <= 12.
pub const FILL_LOW: &str = "00FF00";

/// Criticality cell fill for 12 < C <= 16.
pub const FILL_MODERATE: &str = "FFFF00";

/// Criticality cell fill for 16 < C <= 20.
pub const FILL_HIGH: &str = "FFA500";

/// Criticality cell fill for C > 20.
pub const FILL_CRITICAL: &str = "FF0000";

/// Column widths A..K of the FMECA workbook.
pub const FMECA_COLUMN_WIDTHS: [f64; 11] =
    [20.0, 20.0, 20.0, 25.0, 20.0, 20.0, 5.0, 5.0, 5.0, 5.0, 40.0];

// ============================================================================
// Chat
// ============================================================================

/// A greeting is only recognised in queries shorter than this (words).
pub const GREETING_MAX_WORDS: usize = 5;
