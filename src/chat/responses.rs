//! Answer composition for each intent
//!
//! Facts come from `knowledge::chat_tables`; catalog entries, when present,
//! add descriptive sentences. Template choice is the only random part.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::knowledge::catalog::{self, CatalogEntry};
use crate::knowledge::chat_tables::{self, templates};
use crate::types::{Component, CriticalityBand, Subcomponent};

pub fn pick<R: Rng + ?Sized>(rng: &mut R, family: &[&'static str]) -> &'static str {
    family.choose(rng).copied().unwrap_or_default()
}

pub fn component_info<R: Rng + ?Sized>(
    rng: &mut R,
    component: Component,
    subcomponent: Subcomponent,
    entry: Option<&CatalogEntry>,
) -> String {
    let Some(entry) = entry else {
        return format!(
            "Le {component} est un composant important de la chaudière. Le {subcomponent} est un \
             élément critique qui nécessite une attention particulière lors de la maintenance."
        );
    };

    let mut info = format!("{} ", entry.description_simple.as_deref().unwrap_or_default());
    if !entry.materiaux.is_empty() {
        info.push_str(&format!("Il est fabriqué avec {}. ", catalog::section_text(&entry.materiaux)));
    }
    if !entry.structure.is_empty() {
        info.push_str(&format!("Sa structure comprend {}. ", catalog::section_text(&entry.structure)));
    }
    if let Some(fmeca) = &entry.amdec {
        info.push_str(&format!(
            "Le {subcomponent} est susceptible de subir des défaillances comme {}. ",
            fmeca.mode_defaillance.as_deref().unwrap_or_default()
        ));
    }

    templates::fill(
        pick(rng, &templates::COMPONENT_INFO),
        &[("component", component.display_name()), ("info", info.trim_end())],
    )
}

pub fn failure_modes<R: Rng + ?Sized>(
    rng: &mut R,
    component: Component,
    subcomponent: Subcomponent,
    entry: Option<&CatalogEntry>,
) -> String {
    let modes = chat_tables::failure_modes(component, subcomponent).join(", ");
    let mut response = templates::fill(
        pick(rng, &templates::FAILURE_MODE),
        &[
            ("component", component.display_name()),
            ("subcomponent", subcomponent.display_name()),
            ("modes", &modes),
        ],
    );

    if let Some(fmeca) = entry.and_then(|e| e.amdec.as_ref()) {
        if !fmeca.causes.is_empty() {
            response.push_str(&format!(
                " Ces défaillances sont souvent causées par {}.",
                fmeca.causes.join(", ")
            ));
        }
        if let Some(mode) = &fmeca.mode_defaillance {
            response.push_str(&format!(" Le mode de défaillance principal est {mode}."));
        }
    }
    response
}

pub fn maintenance<R: Rng + ?Sized>(
    rng: &mut R,
    component: Component,
    subcomponent: Subcomponent,
    entry: Option<&CatalogEntry>,
) -> String {
    let advice = format!(
        "La maintenance {} devrait inclure : {}.",
        chat_tables::inspection_frequency(component),
        chat_tables::maintenance_operations(component, subcomponent).join(", ")
    );
    let mut response = templates::fill(
        pick(rng, &templates::MAINTENANCE),
        &[
            ("component", component.display_name()),
            ("subcomponent", subcomponent.display_name()),
            ("maintenance", &advice),
        ],
    );

    let personnel = entry.and_then(|e| e.maintenance.as_ref()).map(|m| &m.personnel);
    if let Some(personnel) = personnel.filter(|p| !p.is_empty()) {
        response.push_str(&format!(
            " Cette maintenance devrait être effectuée par {}.",
            personnel.join(", ")
        ));
    }
    response
}

pub fn criticality<R: Rng + ?Sized>(
    rng: &mut R,
    component: Component,
    subcomponent: Subcomponent,
    value: u32,
) -> String {
    templates::fill(
        pick(rng, &templates::CRITICALITY),
        &[
            ("component", component.display_name()),
            ("subcomponent", subcomponent.display_name()),
            ("criticality", &value.to_string()),
            ("interpretation", chat_tables::interpretation(CriticalityBand::from_score(value))),
        ],
    )
}
