//! FMECA (AMDEC) table types

use serde::{Deserialize, Serialize};

use super::{Cause, Component, CriticalityBand, Subcomponent};

/// Column headers of the rendered FMECA workbook, in order.
pub const FMECA_HEADERS: [&str; 11] = [
    "Composant",
    "Sous-composant",
    "Fonction",
    "Mode de Défaillance",
    "Cause",
    "Effet",
    "F",
    "G",
    "D",
    "C",
    "Actions Correctives",
];

/// English equivalents of `FMECA_HEADERS`, accepted when reading a workbook back.
pub const FMECA_HEADERS_EN: [&str; 11] = [
    "Component",
    "Subcomponent",
    "Function",
    "FailureMode",
    "Cause",
    "Effect",
    "F",
    "G",
    "D",
    "C",
    "CorrectiveActions",
];

/// One (component, subcomponent, cause) group of the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmecaRow {
    pub component: Component,
    pub subcomponent: Subcomponent,
    pub function: String,
    pub failure_mode: String,
    pub cause: Cause,
    pub effect: String,
    /// Frequency 1..=4
    pub frequency: u8,
    /// Gravity 1..=5
    pub gravity: u8,
    /// Detection 1..=4
    pub detection: u8,
    /// frequency x gravity x detection
    pub criticality: u32,
    pub corrective_actions: String,
}

impl FmecaRow {
    pub fn band(&self) -> CriticalityBand {
        CriticalityBand::from_score(self.criticality)
    }

    /// Cells in `FMECA_HEADERS` order.
    pub fn cells(&self) -> [String; 11] {
        [
            self.component.display_name().to_string(),
            self.subcomponent.display_name().to_string(),
            self.function.clone(),
            self.failure_mode.clone(),
            self.cause.display_name(),
            self.effect.clone(),
            self.frequency.to_string(),
            self.gravity.to_string(),
            self.detection.to_string(),
            self.criticality.to_string(),
            self.corrective_actions.clone(),
        ]
    }
}

/// Ranked FMECA table: component key ascending, criticality descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FmecaTable {
    pub rows: Vec<FmecaRow>,
}

impl FmecaTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Highest criticality recorded for the pair.
    pub fn criticality_for(&self, component: Component, subcomponent: Subcomponent) -> Option<u32> {
        self.rows
            .iter()
            .filter(|r| r.component == component && r.subcomponent == subcomponent)
            .map(|r| r.criticality)
            .max()
    }

    /// Apply the output ordering. Stable, so equal-criticality rows keep
    /// their insertion order.
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| {
            a.component
                .key()
                .cmp(b.component.key())
                .then(b.criticality.cmp(&a.criticality))
        });
    }
}
