//! Maintenance work order (gamme de maintenance) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One numbered step of a work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedOperation {
    /// 1-based position in the work order
    pub order: u32,
    pub name: String,
    pub details: String,
    pub time_minutes: u32,
}

/// Work order for one (component, subcomponent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenancePlan {
    /// Display name of the component
    pub component: String,
    /// Display name of the subcomponent
    pub subcomponent: String,
    pub criticality: u32,
    pub materials: Vec<String>,
    pub operations: Vec<PlannedOperation>,
    /// Exact sum of `operations[..].time_minutes`
    pub total_minutes: u32,
    /// Image references relative to the working directory (`image/<file>.png`)
    pub image_refs: Vec<String>,
    pub generated_date: NaiveDate,
}

impl MaintenancePlan {
    /// Formatted total time (`1h05min`, `45min`).
    pub fn total_time(&self) -> String {
        format_total_time(self.total_minutes)
    }

    /// `dd/mm/YYYY`
    pub fn date_text(&self) -> String {
        self.generated_date.format("%d/%m/%Y").to_string()
    }

    /// Work-order title.
    pub fn title(&self) -> String {
        format!("Gamme de maintenance {} / {}", self.component, self.subcomponent)
    }
}

/// Format a duration in minutes as `HhMMmin` when at least one hour, else `Mmin`.
pub fn format_total_time(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h{minutes:02}min")
    } else {
        format!("{minutes}min")
    }
}

/// Inverse of [`format_total_time`]. Returns `None` for any other shape.
pub fn parse_total_time(s: &str) -> Option<u32> {
    let rest = s.trim().strip_suffix("min")?;
    match rest.split_once('h') {
        Some((h, m)) => {
            if m.len() != 2 {
                return None;
            }
            let hours: u32 = h.parse().ok()?;
            let minutes: u32 = m.parse().ok()?;
            (minutes < 60).then_some(hours * 60 + minutes)
        }
        None => rest.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_total_time() {
        assert_eq!(format_total_time(45), "45min");
        assert_eq!(format_total_time(60), "1h00min");
        assert_eq!(format_total_time(125), "2h05min");
        assert_eq!(format_total_time(0), "0min");
    }

    #[test]
    fn test_parse_inverts_format() {
        for minutes in [0, 15, 59, 60, 61, 150, 605] {
            let text = format_total_time(minutes);
            assert_eq!(parse_total_time(&text), Some(minutes), "{text}");
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_total_time("1h5min"), None);
        assert_eq!(parse_total_time("90"), None);
        assert_eq!(parse_total_time("1h75min"), None);
        assert_eq!(parse_total_time("abcmin"), None);
    }
}
