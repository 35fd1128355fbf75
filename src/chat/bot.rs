//! Maintenance assistant
//!
//! Stateless apart from the conversation history and the template RNG; every
//! answer is derived from the query alone.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use super::intent::{self, Classified, Intent};
use super::responses;
use crate::config::AppConfig;
use crate::knowledge::chat_tables::templates;
use crate::knowledge::ComponentCatalog;
use crate::maintenance::Planner;
use crate::types::FmecaTable;

/// One question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

pub struct ChatBot {
    catalog: Option<ComponentCatalog>,
    /// Criticality source shared with the work-order generator
    planner: Planner,
    rng: StdRng,
    history: Vec<Exchange>,
}

impl ChatBot {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { catalog: None, planner: Planner::new(seed), rng, history: Vec::new() }
    }

    /// Bot with the configured seed, default criticality and catalog file.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut bot = Self::new(config.chat.seed);
        bot.planner = Planner::from_config(config);
        bot.catalog = ComponentCatalog::load(&config.paths.catalog);
        bot
    }

    pub fn with_catalog(mut self, catalog: ComponentCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Answer criticality questions from this FMECA table first.
    pub fn with_fmeca(mut self, table: FmecaTable) -> Self {
        self.planner = self.planner.with_fmeca(table);
        self
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    pub fn is_farewell(&self, query: &str) -> bool {
        intent::is_farewell(query)
    }

    pub fn farewell(&mut self) -> String {
        responses::pick(&mut self.rng, &templates::FAREWELL).to_string()
    }

    /// Answer a free-text question and record the exchange.
    pub fn generate_response(&mut self, query: &str) -> String {
        let classified = intent::classify(query);
        debug!(?classified, "Query classified");

        let response = match classified {
            Classified::Greeting => responses::pick(&mut self.rng, &templates::GREETING).to_string(),
            Classified::About { component, subcomponent, intent } => {
                let entry = self.catalog.as_ref().and_then(|c| c.entry(component));
                match intent {
                    Intent::FailureModes => responses::failure_modes(&mut self.rng, component, subcomponent, entry),
                    Intent::Maintenance => responses::maintenance(&mut self.rng, component, subcomponent, entry),
                    Intent::Criticality => {
                        let value = self.planner.get_criticality(component.key(), subcomponent.key());
                        responses::criticality(&mut self.rng, component, subcomponent, value)
                    }
                    Intent::GeneralInfo => responses::component_info(&mut self.rng, component, subcomponent, entry),
                }
            }
            Classified::FailureGuidance => templates::FAILURE_GUIDANCE.to_string(),
            Classified::MaintenanceGuidance => templates::MAINTENANCE_GUIDANCE.to_string(),
            Classified::NotUnderstood => responses::pick(&mut self.rng, &templates::NOT_UNDERSTOOD).to_string(),
        };

        self.history.push(Exchange { user: query.to_string(), assistant: response.clone() });
        response
    }
}
