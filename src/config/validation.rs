//! Config validation: unknown-key detection with Levenshtein suggestions
//! and colour format checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::RenderConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for AppConfig.
///
/// Maintained by hand to match the struct hierarchy in app_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [paths]
        "paths",
        "paths.models_dir",
        "paths.maintenance_dir",
        "paths.vector_db_dir",
        "paths.catalog",
        "paths.image_dir",
        // [fmeca]
        "fmeca",
        "fmeca.seed",
        // [planner]
        "planner",
        "planner.default_criticality",
        "planner.seed",
        // [retrieval]
        "retrieval",
        "retrieval.max_features",
        "retrieval.similarity_floor",
        "retrieval.search_top_k",
        "retrieval.retrieve_top_k",
        "retrieval.max_segments",
        "retrieval.segment_length",
        // [render]
        "render",
        "render.header_fill",
        "render.header_font",
        "render.fill_low",
        "render.fill_moderate",
        "render.fill_high",
        "render.fill_critical",
        // [chat]
        "chat",
        "chat.seed",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties resolve alphabetically so the suggestion does not depend on hash order
        match best {
            Some((bk, bd)) if dist > bd || (dist == bd && k >= bk) => {}
            _ => best = Some((k, dist)),
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            let message = format!("Unknown config key '{key}'");
            ValidationWarning {
                field: key,
                message,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Colour Validation
// ============================================================================

/// True for a 6-digit RGB hex string such as `0066CC`.
pub fn is_hex_colour(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// One warning per malformed colour field. The workbook renderer falls
/// back to unstyled output on any of them.
pub fn validate_colours(render: &RenderConfig) -> Vec<ValidationWarning> {
    render
        .colours()
        .iter()
        .filter(|(_, value)| !is_hex_colour(value))
        .map(|(name, value)| ValidationWarning {
            field: (*name).to_string(),
            message: format!("{name} = '{value}' is not a 6-digit RGB hex colour"),
            suggestion: None,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("seed", "seed"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("max_feature", "max_features"), 1);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("durée", "duree"), 1);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [retrieval]
            max_features = 500
        "#
        .parse()
        .expect("valid toml");
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"retrieval".to_string()));
        assert!(keys.contains(&"retrieval.max_features".to_string()));
    }

    #[test]
    fn test_typo_gets_suggestion() {
        let warnings = validate_unknown_keys(
            r#"
            [retrieval]
            similarity_flor = 0.2
        "#,
        );
        assert_eq!(warnings.len(), 1, "exactly one unknown key expected");
        assert_eq!(warnings[0].field, "retrieval.similarity_flor");
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("retrieval.similarity_floor")
        );
        assert!(warnings[0].to_string().contains("did you mean"));
    }

    #[test]
    fn test_unrelated_key_has_no_suggestion() {
        let warnings = validate_unknown_keys("completely_unrelated_section = 1");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].suggestion.is_none());
    }

    #[test]
    fn test_known_keys_do_not_warn() {
        let warnings = validate_unknown_keys(
            r#"
            [planner]
            default_criticality = 20
            [render]
            fill_high = "FFA500"
        "#,
        );
        assert!(warnings.is_empty(), "known keys produced warnings: {warnings:?}");
    }

    #[test]
    fn test_malformed_colours_name_their_field() {
        let render = RenderConfig {
            fill_low: "vert".to_string(),
            header_fill: "#0066CC".to_string(),
            ..RenderConfig::default()
        };
        let warnings = validate_colours(&render);
        let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields.len(), 2, "{warnings:?}");
        assert!(fields.contains(&"render.fill_low"));
        assert!(fields.contains(&"render.header_fill"));
        assert!(validate_colours(&RenderConfig::default()).is_empty());
    }

    #[test]
    fn test_hex_colour() {
        assert!(is_hex_colour("0066CC"));
        assert!(is_hex_colour("ffa500"));
        assert!(!is_hex_colour("#0066CC"));
        assert!(!is_hex_colour("blue"));
    }
}
