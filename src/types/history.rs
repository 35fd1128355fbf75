//! Normalised stoppage history

use serde::{Deserialize, Serialize};

use super::{Cause, Component, Resolved, Subcomponent};

/// One stoppage from the history spreadsheet, after normalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub component: Resolved<Component>,
    pub subcomponent: Resolved<Subcomponent>,
    pub cause: Cause,
    /// Stoppage duration in hours; 0.0 when the cell could not be read
    pub duration_hours: f64,
}

impl HistoryRecord {
    /// Build a record from raw cell texts and a duration already in hours.
    pub fn from_cells(component: &str, subcomponent: &str, cause: &str, duration_hours: f64) -> Self {
        Self {
            component: Component::resolve(component),
            subcomponent: Subcomponent::resolve(subcomponent),
            cause: Cause::resolve(cause),
            duration_hours,
        }
    }

    /// The (component, subcomponent) pair when both resolved.
    pub fn known_pair(&self) -> Option<(Component, Subcomponent)> {
        Some((self.component.known()?, self.subcomponent.known()?))
    }

    /// Text written to the component column of a normalised export.
    pub fn component_text(&self) -> String {
        resolved_text(&self.component, Component::key)
    }

    pub fn subcomponent_text(&self) -> String {
        resolved_text(&self.subcomponent, Subcomponent::key)
    }
}

fn resolved_text<T: Copy>(r: &Resolved<T>, key: fn(T) -> &'static str) -> String {
    match r {
        Resolved::Known(t) => key(*t).to_string(),
        Resolved::Unmapped(s) => s.clone(),
        Resolved::Unknown => "inconnu".to_string(),
    }
}
