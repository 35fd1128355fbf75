//! F, G and D ordinal scores

use crate::knowledge::fmeca_tables::{EASILY_DETECTABLE, HARD_DETECTABLE, MEDIUM_DETECTABLE};
use crate::types::fmeca_thresholds::{
    FREQUENCY_FREQUENT_MAX, FREQUENCY_POSSIBLE_MAX, FREQUENCY_RARE_MAX, GRAVITY_MAJOR_MAX_HOURS,
    GRAVITY_MEDIUM_MAX_HOURS, GRAVITY_MINOR_MAX_HOURS, GRAVITY_SIGNIFICANT_MAX_HOURS,
};
use crate::types::Cause;

/// Frequency score (1..=4) from the occurrence count of a cause group.
pub const fn frequency(count: usize) -> u8 {
    if count <= FREQUENCY_RARE_MAX {
        1
    } else if count <= FREQUENCY_POSSIBLE_MAX {
        2
    } else if count <= FREQUENCY_FREQUENT_MAX {
        3
    } else {
        4
    }
}

/// Gravity score (1..=5) from the mean stoppage duration in hours.
pub fn gravity(mean_hours: f64) -> u8 {
    if mean_hours <= GRAVITY_MINOR_MAX_HOURS {
        1
    } else if mean_hours <= GRAVITY_SIGNIFICANT_MAX_HOURS {
        2
    } else if mean_hours <= GRAVITY_MEDIUM_MAX_HOURS {
        3
    } else if mean_hours <= GRAVITY_MAJOR_MAX_HOURS {
        4
    } else {
        5
    }
}

/// Detection score (1..=4): how hard the cause is to notice before failure.
///
/// Passthrough causes are searched for the detection terms, easy list
/// first, so "fuite par fissure" scores as easily detectable.
pub fn detection(cause: &Cause) -> u8 {
    match cause {
        Cause::Fuite | Cause::Percement | Cause::Surchauffe | Cause::Vibration => 1,
        Cause::Corrosion | Cause::Erosion | Cause::Encrassement | Cause::MauvaisMontage => 2,
        Cause::Fissure | Cause::Fatigue => 3,
        Cause::Other(text) => {
            let lists: [(&[&str], u8); 3] =
                [(&EASILY_DETECTABLE[..], 1), (&MEDIUM_DETECTABLE[..], 2), (&HARD_DETECTABLE[..], 3)];
            lists
                .iter()
                .find(|(terms, _)| terms.iter().any(|t| text.contains(t)))
                .map_or(4, |(_, score)| *score)
        }
        Cause::Unknown => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_boundaries() {
        let expected = [(0, 1), (1, 1), (2, 2), (3, 2), (4, 3), (6, 3), (7, 4), (100, 4)];
        for (count, f) in expected {
            assert_eq!(frequency(count), f, "count {count}");
        }
    }

    #[test]
    fn test_gravity_boundaries() {
        let expected = [(0.0, 1), (0.5, 1), (0.51, 2), (1.0, 2), (5.0, 3), (12.0, 4), (12.01, 5)];
        for (hours, g) in expected {
            assert_eq!(gravity(hours), g, "{hours} h");
        }
    }

    #[test]
    fn test_detection_known_causes() {
        assert_eq!(detection(&Cause::Fuite), 1);
        assert_eq!(detection(&Cause::MauvaisMontage), 2);
        assert_eq!(detection(&Cause::Fatigue), 3);
        assert_eq!(detection(&Cause::Unknown), 4);
    }

    #[test]
    fn test_detection_passthrough_prefers_easy_terms() {
        assert_eq!(detection(&Cause::Other("fuite par fissure".into())), 1);
        assert_eq!(detection(&Cause::Other("fissure et corrosion".into())), 2);
        assert_eq!(detection(&Cause::Other("fatigue du support".into())), 3);
        assert_eq!(detection(&Cause::Other("foudre".into())), 4);
    }
}
