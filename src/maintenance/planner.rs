//! Work-order generation
//!
//! Criticality comes from a loaded FMECA table when one is available, then
//! from the field-experience table, then from the configured default. The
//! operation list grows with the maintenance tier of that criticality.

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{defaults, AppConfig};
use crate::knowledge::planner_tables::{self, OperationTemplate};
use crate::text;
use crate::types::{
    Component, FmecaTable, MaintenancePlan, MaintenanceTier, PlannedOperation, Resolved, Subcomponent,
    SubcomponentCategory,
};

/// Builds maintenance plans on request. Plans are not cached.
pub struct Planner {
    fmeca: Option<FmecaTable>,
    default_criticality: u32,
    image_dir: String,
    rng: StdRng,
    date: Option<NaiveDate>,
}

impl Planner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            fmeca: None,
            default_criticality: defaults::DEFAULT_CRITICALITY,
            image_dir: defaults::IMAGE_DIR.to_string(),
            rng,
            date: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut planner = Self::new(config.planner.seed);
        planner.default_criticality = config.planner.default_criticality;
        planner.image_dir = config.paths.image_dir.clone();
        planner
    }

    /// Look criticality up in this FMECA table first.
    pub fn with_fmeca(mut self, table: FmecaTable) -> Self {
        self.fmeca = Some(table);
        self
    }

    /// Fix the generation date instead of using today's local date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub const fn has_fmeca(&self) -> bool {
        self.fmeca.is_some()
    }

    /// Criticality of a (component, subcomponent) given as free text.
    pub fn get_criticality(&self, component: &str, subcomponent: &str) -> u32 {
        let pair = (Component::resolve(component).known(), Subcomponent::resolve(subcomponent).known());

        if let Some(table) = &self.fmeca {
            if let (Some(c), Some(s)) = pair {
                if let Some(value) = table.criticality_for(c, s) {
                    return value;
                }
            }
            if let Some(value) = fuzzy_criticality(table, component, subcomponent) {
                debug!(component, subcomponent, value, "Criticality from partial FMECA match");
                return value;
            }
        }

        if let (Some(c), Some(s)) = pair {
            if let Some(value) = planner_tables::default_criticality(c, s) {
                return value;
            }
        }
        self.default_criticality
    }

    /// Build the work order. `criticality` overrides the lookup.
    pub fn generate_plan(&mut self, component: &str, subcomponent: &str, criticality: Option<u32>) -> MaintenancePlan {
        let criticality = criticality.unwrap_or_else(|| self.get_criticality(component, subcomponent));
        let tier = MaintenanceTier::from_score(criticality);
        let resolved_component = Component::resolve(component);
        let resolved_subcomponent = Subcomponent::resolve(subcomponent);
        let category = resolved_subcomponent
            .known()
            .map(Subcomponent::category)
            .or_else(|| SubcomponentCategory::from_text(subcomponent));

        let operations: Vec<PlannedOperation> = operation_templates(category, tier)
            .into_iter()
            .zip(1u32..)
            .map(|(template, order)| PlannedOperation {
                order,
                name: template.name.to_string(),
                details: template.details.to_string(),
                time_minutes: template.minutes,
            })
            .collect();
        let total_minutes = operations.iter().map(|op| op.time_minutes).sum();

        let materials = self.materials(category, tier);
        let image_refs = match (resolved_component.known(), resolved_subcomponent.known()) {
            (Some(c), Some(s)) => planner_tables::image_files(c, s)
                .iter()
                .map(|file| format!("{}/{file}", self.image_dir))
                .collect(),
            _ => Vec::new(),
        };

        let plan = MaintenancePlan {
            component: display_name(&resolved_component, component, Component::display_name),
            subcomponent: display_name(&resolved_subcomponent, subcomponent, Subcomponent::display_name),
            criticality,
            materials,
            operations,
            total_minutes,
            image_refs,
            generated_date: self.date.unwrap_or_else(|| Local::now().date_naive()),
        };
        info!(
            component = %plan.component,
            subcomponent = %plan.subcomponent,
            criticality,
            operations = plan.operations.len(),
            total = %plan.total_time(),
            "Maintenance plan generated"
        );
        plan
    }

    fn materials(&mut self, category: Option<SubcomponentCategory>, tier: MaintenanceTier) -> Vec<String> {
        let mut materials: Vec<String> = planner_tables::COMMON_MATERIALS.iter().map(ToString::to_string).collect();
        match category {
            Some(cat) => materials.extend(
                planner_tables::material_candidates(cat)
                    .choose_multiple(&mut self.rng, planner_tables::material_sample_size(tier))
                    .map(ToString::to_string),
            ),
            None => materials.extend(planner_tables::GENERIC_MATERIALS.iter().map(ToString::to_string)),
        }
        materials
    }
}

/// Baseline inspection, then the operations of every tier from low up to
/// the plan's own. Without a category the generic pair.
fn operation_templates(category: Option<SubcomponentCategory>, tier: MaintenanceTier) -> Vec<OperationTemplate> {
    let mut templates = vec![planner_tables::BASELINE_OPERATION];
    match category {
        Some(cat) => {
            for level in [MaintenanceTier::Low, MaintenanceTier::Medium, MaintenanceTier::High] {
                if level <= tier {
                    templates.extend_from_slice(planner_tables::tier_operations(cat, level));
                }
            }
        }
        None => templates.extend_from_slice(&planner_tables::GENERIC_OPERATIONS),
    }
    templates
}

/// Max C over table rows whose keys contain, or are contained in, the query texts.
fn fuzzy_criticality(table: &FmecaTable, component: &str, subcomponent: &str) -> Option<u32> {
    let component = text::fold(component.trim());
    let subcomponent = text::fold(subcomponent.trim());
    if component.is_empty() || subcomponent.is_empty() {
        return None;
    }
    let overlaps = |a: &str, b: &str| a.contains(b) || b.contains(a);

    table
        .rows
        .iter()
        .find(|r| overlaps(r.component.key(), &component) && overlaps(r.subcomponent.key(), &subcomponent))
        .and_then(|r| table.criticality_for(r.component, r.subcomponent))
}

fn display_name<T: Copy>(resolved: &Resolved<T>, raw: &str, name: fn(T) -> &'static str) -> String {
    match resolved {
        Resolved::Known(t) => name(*t).to_string(),
        _ => text::title_case(raw.trim()),
    }
}
