//! FMECA scoring thresholds and criticality banding

use serde::{Deserialize, Serialize};

/// Ordinal score boundaries of the F x G x D criticality model
pub mod fmeca_thresholds {
    // === Frequency (F, occurrences per cause group) ===
    /// At most this many occurrences: rare (F = 1)
    pub const FREQUENCY_RARE_MAX: usize = 1;
    /// At most this many occurrences: possible (F = 2)
    pub const FREQUENCY_POSSIBLE_MAX: usize = 3;
    /// At most this many occurrences: frequent (F = 3), above: very frequent (F = 4)
    pub const FREQUENCY_FREQUENT_MAX: usize = 6;

    // === Gravity (G, mean stoppage duration in hours) ===
    /// Minor stoppage (G = 1), 30 minutes
    pub const GRAVITY_MINOR_MAX_HOURS: f64 = 0.5;
    /// Significant stoppage (G = 2)
    pub const GRAVITY_SIGNIFICANT_MAX_HOURS: f64 = 1.0;
    /// Medium stoppage (G = 3)
    pub const GRAVITY_MEDIUM_MAX_HOURS: f64 = 5.0;
    /// Major stoppage (G = 4), above: catastrophic (G = 5)
    pub const GRAVITY_MAJOR_MAX_HOURS: f64 = 12.0;

    // === Criticality (C = F x G x D) ===
    /// Negligible criticality, corrective maintenance only
    pub const CRITICALITY_NEGLIGIBLE_MAX: u32 = 12;
    /// Moderate criticality, systematic preventive maintenance
    pub const CRITICALITY_MODERATE_MAX: u32 = 16;
    /// High criticality, condition-based preventive maintenance
    pub const CRITICALITY_HIGH_MAX: u32 = 20;
}

use fmeca_thresholds::{CRITICALITY_HIGH_MAX, CRITICALITY_MODERATE_MAX, CRITICALITY_NEGLIGIBLE_MAX};

/// Four-tier banding of a criticality score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CriticalityBand {
    /// C <= 12
    Negligible,
    /// 12 < C <= 16
    Moderate,
    /// 16 < C <= 20
    High,
    /// C > 20
    Unacceptable,
}

impl CriticalityBand {
    pub const fn from_score(c: u32) -> Self {
        if c <= CRITICALITY_NEGLIGIBLE_MAX {
            Self::Negligible
        } else if c <= CRITICALITY_MODERATE_MAX {
            Self::Moderate
        } else if c <= CRITICALITY_HIGH_MAX {
            Self::High
        } else {
            Self::Unacceptable
        }
    }

    /// Colour name used in reports and logs.
    pub const fn colour_name(self) -> &'static str {
        match self {
            Self::Negligible => "green",
            Self::Moderate => "yellow",
            Self::High => "orange",
            Self::Unacceptable => "red",
        }
    }
}

/// Three-tier maintenance intensity used by the planner (low <= 12 < medium <= 20 < high).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaintenanceTier {
    Low,
    Medium,
    High,
}

impl MaintenanceTier {
    pub const fn from_score(c: u32) -> Self {
        if c <= CRITICALITY_NEGLIGIBLE_MAX {
            Self::Low
        } else if c <= CRITICALITY_HIGH_MAX {
            Self::Medium
        } else {
            Self::High
        }
    }
}
