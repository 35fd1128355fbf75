//! Stoppage duration parsing
//!
//! History sheets record durations as numbers of hours or as free text in a
//! handful of French shop-floor notations. Everything is converted to hours.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::ooxml::Cell;
use crate::text;

struct Patterns {
    /// `2 heures 30 minutes`, `1 heure`
    heures: Regex,
    /// `2h`, `2h30`, `2h 30m`, `2 h 30 min`
    hours: Regex,
    /// `45 min`, `45 minutes`
    minutes: Regex,
}

#[allow(clippy::expect_used)]
fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        heures: Regex::new(r"(\d+(?:[.,]\d+)?)\s*heures?\s*(?:(\d+)\s*(?:minutes?|min|mn)?)?")
            .expect("valid heures pattern"),
        hours: Regex::new(r"(\d+(?:[.,]\d+)?)\s*h\s*(?:(\d+)\s*(?:m(?:in)?)?)?")
            .expect("valid hours pattern"),
        minutes: Regex::new(r"^(\d+(?:[.,]\d+)?)\s*(?:minutes?|min|mn)$").expect("valid minutes pattern"),
    })
}

fn number(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Hours in a free-text duration, `None` when the notation is not recognised.
pub fn parse_duration_text(raw: &str) -> Option<f64> {
    let value = text::fold(raw.trim());
    if value.is_empty() {
        return None;
    }
    if let Some(hours) = number(&value) {
        return Some(hours);
    }

    if value.contains(':') {
        let parts: Vec<f64> = value.split(':').map(number).collect::<Option<_>>()?;
        return match parts.as_slice() {
            [h, m] => Some(h + m / 60.0),
            [h, m, s] => Some(h + m / 60.0 + s / 3600.0),
            _ => None,
        };
    }

    let p = patterns();
    for re in [&p.heures, &p.hours] {
        if let Some(caps) = re.captures(&value) {
            let hours = caps.get(1).and_then(|m| number(m.as_str()))?;
            let minutes = caps.get(2).and_then(|m| number(m.as_str())).unwrap_or(0.0);
            return Some(hours + minutes / 60.0);
        }
    }
    p.minutes
        .captures(&value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| number(m.as_str()))
        .map(|minutes| minutes / 60.0)
}

/// Convert a duration cell to hours. Empty and unrecognised cells yield 0.0.
pub fn convert_to_hours(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) if n.is_finite() => *n,
        Cell::Text(s) => parse_duration_text(s).unwrap_or_else(|| {
            debug!(value = %s, "Unrecognised duration, counted as 0 h");
            0.0
        }),
        _ => 0.0,
    }
}
