//! Optional component catalog (`chaudiere_data.json`)
//!
//! Descriptive facts about each bank used to enrich chat answers. The file is
//! keyed by the canonical component key:
//!
//! ```json
//! { "chaudiere": { "economiseur bt": {
//!     "description_simple": "...",
//!     "matériaux": { "tubes": "P235GH" },
//!     "structure": { "épingles": ["..."] },
//!     "AMDEC": { "mode_defaillance": "...", "causes": ["..."] },
//!     "maintenance": { "personnel": ["..."] } } } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::Component;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentCatalog {
    #[serde(default)]
    pub chaudiere: HashMap<String, CatalogEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogEntry {
    pub description_simple: Option<String>,
    #[serde(rename = "matériaux")]
    pub materiaux: serde_json::Map<String, serde_json::Value>,
    pub structure: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "AMDEC")]
    pub amdec: Option<CatalogFmeca>,
    pub maintenance: Option<CatalogMaintenance>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFmeca {
    pub mode_defaillance: Option<String>,
    pub causes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogMaintenance {
    pub personnel: Vec<String>,
}

impl ComponentCatalog {
    /// Load the catalog. A missing or malformed file yields `None`; the chat
    /// then answers from the built-in tables only.
    pub fn load(path: &Path) -> Option<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No component catalog");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Component catalog unreadable, ignoring");
                None
            }
        }
    }

    pub fn entry(&self, component: Component) -> Option<&CatalogEntry> {
        self.chaudiere.get(component.key())
    }
}

/// Render a catalog value: strings as-is, lists joined with `", "`.
pub fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// `key: value` pairs of a catalog section, joined with `", "`.
pub fn section_text(section: &serde_json::Map<String, serde_json::Value>) -> String {
    section
        .iter()
        .map(|(k, v)| format!("{k}: {}", value_text(v)))
        .collect::<Vec<_>>()
        .join(", ")
}
