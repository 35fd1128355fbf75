//! FMECA table generation from a normalised stoppage history
//!
//! Records are grouped by (component, subcomponent) and then by cause. Each
//! cause group becomes one row scored F x G x D, with its failure mode,
//! effect and function looked up in the shared knowledge tables.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::scoring;
use crate::config::AppConfig;
use crate::knowledge::fmeca_tables;
use crate::types::{Cause, Component, CriticalityBand, FmecaRow, FmecaTable, HistoryRecord, Subcomponent};

/// Occurrences and cumulated stoppage time of one cause group.
#[derive(Debug, Default, Clone, Copy)]
struct CauseStats {
    count: usize,
    total_hours: f64,
}

impl CauseStats {
    fn mean_hours(self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_hours / self.count as f64
        }
    }
}

type PairGroup<'a> = (Component, Subcomponent, HashMap<&'a Cause, CauseStats>);

/// Builds ranked FMECA tables. Owns the RNG used to sample corrective actions.
pub struct FmecaBuilder {
    rng: StdRng,
}

impl FmecaBuilder {
    /// Seeded builder reproduces the same corrective actions run after run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.fmeca.seed)
    }

    /// Generate the FMECA table for a history.
    ///
    /// Records whose component or subcomponent did not resolve are left out.
    /// Output is sorted by component key, then criticality descending.
    pub fn generate(&mut self, records: &[HistoryRecord]) -> FmecaTable {
        let mut groups: BTreeMap<(&'static str, &'static str), PairGroup<'_>> = BTreeMap::new();
        let mut excluded = 0usize;

        for record in records {
            let Some((component, subcomponent)) = record.known_pair() else {
                excluded += 1;
                continue;
            };
            let (_, _, causes) = groups
                .entry((component.key(), subcomponent.key()))
                .or_insert_with(|| (component, subcomponent, HashMap::new()));
            let stats = causes.entry(&record.cause).or_default();
            stats.count += 1;
            stats.total_hours += record.duration_hours;
        }

        if excluded > 0 {
            warn!(
                excluded,
                "Records with an unknown component or subcomponent were left out of the FMECA"
            );
        }

        let mut table = FmecaTable::default();
        for (component, subcomponent, causes) in groups.into_values() {
            let mut causes: Vec<(&Cause, CauseStats)> = causes.into_iter().collect();
            causes.sort_by(|(ca, a), (cb, b)| b.count.cmp(&a.count).then_with(|| ca.key().cmp(cb.key())));
            for (cause, stats) in causes {
                let row = self.row(component, subcomponent, cause, stats);
                debug!(
                    component = component.key(),
                    subcomponent = subcomponent.key(),
                    cause = cause.key(),
                    f = row.frequency,
                    g = row.gravity,
                    d = row.detection,
                    c = row.criticality,
                    "FMECA row scored"
                );
                table.rows.push(row);
            }
        }
        table.sort();

        info!(
            rows = table.len(),
            records = records.len() - excluded,
            excluded,
            "FMECA table generated"
        );
        table
    }

    fn row(&mut self, component: Component, subcomponent: Subcomponent, cause: &Cause, stats: CauseStats) -> FmecaRow {
        let frequency = scoring::frequency(stats.count);
        let gravity = scoring::gravity(stats.mean_hours());
        let detection = scoring::detection(cause);
        let criticality = u32::from(frequency) * u32::from(gravity) * u32::from(detection);
        let failure_mode = fmeca_tables::failure_mode(cause, Some(subcomponent.category()));

        FmecaRow {
            component,
            subcomponent,
            function: fmeca_tables::function(component, subcomponent).to_string(),
            failure_mode: failure_mode.to_string(),
            cause: cause.clone(),
            effect: fmeca_tables::effect(failure_mode).to_string(),
            frequency,
            gravity,
            detection,
            criticality,
            corrective_actions: self.corrective_actions(cause, CriticalityBand::from_score(criticality)),
        }
    }

    /// Band label followed by distinct actions sampled from the cause's candidates.
    fn corrective_actions(&mut self, cause: &Cause, band: CriticalityBand) -> String {
        let candidates = fmeca_tables::corrective_actions(cause);
        let sampled = candidates.choose_multiple(&mut self.rng, fmeca_tables::action_count(band));
        std::iter::once(fmeca_tables::maintenance_label(band))
            .chain(sampled.copied())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::fmeca_tables::GENERIC_ACTIONS;

    fn record(c: &str, s: &str, cause: &str, hours: f64) -> HistoryRecord {
        HistoryRecord::from_cells(c, s, cause, hours)
    }

    #[test]
    fn test_small_history_scores() {
        let history = vec![
            record("Economiseur BT", "Epingle", "corrosion", 0.3),
            record("Economiseur BT", "Epingle", "corrosion", 0.6),
            record("Surchauffeur HT", "Tube porteur", "fissure", 8.0),
            record("Rechauffeur BT", "Collecteur entrée", "fuite", 1.0),
            record("Chaudière", "Virole", "fuite", 2.0),
        ];
        let table = FmecaBuilder::new(Some(1)).generate(&history);
        assert_eq!(table.len(), 3, "unmapped component must be excluded");

        let row = table
            .rows
            .iter()
            .find(|r| r.component == Component::EconomiseurBt)
            .expect("economiseur row");
        assert_eq!((row.frequency, row.gravity, row.detection, row.criticality), (2, 1, 2, 4));
        assert_eq!(row.failure_mode, "Corrosion externe");
        assert_eq!(row.function, "Transfert thermique");
        assert!(row.corrective_actions.starts_with("Maintenance corrective + "));
    }

    #[test]
    fn test_criticality_is_product_within_ranges() {
        let history: Vec<HistoryRecord> = (0..9)
            .map(|i| record("Sur HT", "porteur", "fatigue", f64::from(i) * 2.0))
            .chain((0..3).map(|_| record("Eco HT", "suspension", "foudre", 30.0)))
            .collect();
        let table = FmecaBuilder::new(Some(2)).generate(&history);
        for row in &table.rows {
            assert!((1..=4).contains(&row.frequency));
            assert!((1..=5).contains(&row.gravity));
            assert!((1..=4).contains(&row.detection));
            assert_eq!(
                row.criticality,
                u32::from(row.frequency) * u32::from(row.gravity) * u32::from(row.detection)
            );
        }
        let passthrough = table.rows.iter().find(|r| r.cause == Cause::Other("foudre".into())).unwrap();
        assert_eq!(passthrough.detection, 4);
        assert_eq!(passthrough.failure_mode, fmeca_tables::FALLBACK_FAILURE_MODE);
    }

    #[test]
    fn test_ordering_by_component_then_criticality() {
        let history = vec![
            record("Surchauffeur BT", "Epingle", "corrosion", 0.2),
            record("Economiseur HT", "Collecteur entrée", "fuite", 0.2),
            record("Economiseur HT", "Collecteur entrée", "fissure", 20.0),
            record("Economiseur HT", "Tubes suspension", "vibration", 3.0),
            record("Economiseur BT", "Epingle", "erosion", 6.0),
        ];
        let table = FmecaBuilder::new(Some(3)).generate(&history);
        let keys: Vec<&str> = table.rows.iter().map(|r| r.component.key()).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        for pair in table.rows.windows(2) {
            if pair[0].component == pair[1].component {
                assert!(pair[0].criticality >= pair[1].criticality, "C must not increase within a component");
            }
        }
    }

    #[test]
    fn test_unknown_pairs_never_reach_output() {
        let history = vec![
            record("", "Epingle", "fuite", 1.0),
            record("Eco BT", "", "fuite", 1.0),
            record("Turbine", "rotor", "fuite", 1.0),
        ];
        let table = FmecaBuilder::new(None).generate(&history);
        assert!(table.is_empty());
    }

    #[test]
    fn test_action_count_follows_band() {
        // 7 occurrences of 13 h, undetectable: F 4 x G 5 x D 4
        let history: Vec<HistoryRecord> =
            (0..7).map(|_| record("Rch HT", "Branches sortie", "foudre", 13.0)).collect();
        let table = FmecaBuilder::new(Some(4)).generate(&history);
        let row = &table.rows[0];
        assert_eq!(row.criticality, 80);
        let parts: Vec<&str> = row.corrective_actions.split(" + ").collect();
        assert_eq!(parts[0], "Remise en cause complète");
        assert_eq!(parts.len(), 4);
        let mut sampled = parts[1..].to_vec();
        sampled.sort_unstable();
        sampled.dedup();
        assert_eq!(sampled.len(), 3, "actions are sampled without replacement");
        assert!(sampled.iter().all(|a| GENERIC_ACTIONS.contains(a)));
    }

    #[test]
    fn test_seed_reproduces_actions() {
        let history = vec![record("Eco BT", "Epingle", "corrosion", 30.0); 5];
        let a = FmecaBuilder::new(Some(42)).generate(&history);
        let b = FmecaBuilder::new(Some(42)).generate(&history);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_history() {
        assert!(FmecaBuilder::new(Some(0)).generate(&[]).is_empty());
    }
}
