//! Query classification: greeting, component mention and question intent
//!
//! Matching is substring based on the folded query (lower-case, no accents),
//! so `"Économiseur BT"` and `"economiseur bt"` are the same mention.

use crate::config::defaults;
use crate::text;
use crate::types::{Component, Subcomponent};

const GREETINGS: [&str; 10] = [
    "bonjour",
    "salut",
    "hello",
    "hi",
    "hey",
    "coucou",
    "bonsoir",
    "good morning",
    "good afternoon",
    "good evening",
];

const FAREWELLS: [&str; 5] = ["exit", "quit", "q", "bye", "au revoir"];

const FAILURE_TERMS: [&str; 5] = ["defaillance", "panne", "probleme", "bris", "casse"];
const MAINTENANCE_TERMS: [&str; 4] = ["maintenance", "entretien", "reparer", "inspecter"];
const CRITICALITY_TERMS: [&str; 5] = ["criticite", "critique", "risque", "danger", "priorite"];

/// What the user asks about a component. Checked in declaration order, the
/// first matching keyword set wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    FailureModes,
    Maintenance,
    Criticality,
    GeneralInfo,
}

/// Outcome of classifying one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    Greeting,
    About { component: Component, subcomponent: Subcomponent, intent: Intent },
    /// Failure question without a component
    FailureGuidance,
    /// Maintenance question without a component
    MaintenanceGuidance,
    NotUnderstood,
}

fn mentions(query: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| query.contains(t))
}

/// Short query containing a greeting phrase.
pub fn is_greeting(query: &str) -> bool {
    let query = text::fold(query);
    mentions(&query, &GREETINGS) && query.split_whitespace().count() < defaults::GREETING_MAX_WORDS
}

/// Whole query is an exit word.
pub fn is_farewell(query: &str) -> bool {
    let query = text::fold(query.trim());
    FAREWELLS.contains(&query.as_str())
}

/// Component named in the query: short aliases first, then full names.
pub fn find_component(query: &str) -> Option<Component> {
    let query = text::fold(query);
    Component::ALL
        .into_iter()
        .find(|c| c.aliases().iter().skip(1).any(|a| query.contains(a)))
        .or_else(|| Component::ALL.into_iter().find(|c| query.contains(c.key())))
}

/// Subcomponent of `component` named in the query, else its first installed part.
pub fn find_subcomponent(query: &str, component: Component) -> Subcomponent {
    let query = text::fold(query);
    let installed = component.installed();
    Subcomponent::ALL
        .into_iter()
        .filter(|s| installed.contains(s))
        .find(|s| s.aliases().iter().skip(1).any(|a| query.contains(a)))
        .or_else(|| installed.iter().copied().find(|s| query.contains(s.key())))
        .unwrap_or(installed[0])
}

pub fn intent(query: &str) -> Intent {
    let query = text::fold(query);
    if mentions(&query, &FAILURE_TERMS) {
        Intent::FailureModes
    } else if mentions(&query, &MAINTENANCE_TERMS) {
        Intent::Maintenance
    } else if mentions(&query, &CRITICALITY_TERMS) {
        Intent::Criticality
    } else {
        Intent::GeneralInfo
    }
}

pub fn classify(query: &str) -> Classified {
    if is_greeting(query) {
        return Classified::Greeting;
    }
    if let Some(component) = find_component(query) {
        return Classified::About {
            component,
            subcomponent: find_subcomponent(query, component),
            intent: intent(query),
        };
    }
    let folded = text::fold(query);
    if mentions(&folded, &FAILURE_TERMS[..3]) {
        Classified::FailureGuidance
    } else if mentions(&folded, &MAINTENANCE_TERMS[..3]) {
        Classified::MaintenanceGuidance
    } else {
        Classified::NotUnderstood
    }
}
