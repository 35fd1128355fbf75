//! Maintenance work-order document (`.docx`)

use std::path::{Path, PathBuf};

use tracing::info;

use super::RenderError;
use crate::ooxml::{self, DocumentBuilder};
use crate::text;
use crate::types::MaintenancePlan;

const OPERATION_HEADERS: [&str; 4] = ["Ordre", "Opérations", "Temps alloué", "Observations"];

const SAFETY_INSTRUCTIONS: [&str; 4] = [
    "Porter les équipements de protection individuelle (EPI) : casque, lunettes, gants, chaussures de sécurité.",
    "Procéder à la consignation complète (électrique, mécanique, thermique) avant toute intervention.",
    "Vérifier l'absence de pression et la température avant démontage.",
    "Baliser la zone d'intervention.",
];

/// `<dir>/gamme_<component>_<subcomponent>.docx`
pub fn default_plan_path(dir: &Path, plan: &MaintenancePlan) -> PathBuf {
    dir.join(format!(
        "gamme_{}_{}.docx",
        text::file_slug(&plan.component),
        text::file_slug(&plan.subcomponent)
    ))
}

fn build_document(plan: &MaintenancePlan) -> DocumentBuilder {
    let mut doc = DocumentBuilder::new();
    doc.heading(1, &plan.title()).heading(
        2,
        &format!("{} - {} C = {}", plan.component, plan.subcomponent, plan.criticality),
    );

    doc.heading(3, "Matériels nécessaires :");
    for material in &plan.materials {
        doc.bullet(material);
    }

    doc.heading(3, "Temps total estimé :").paragraph(&plan.total_time());

    let rows: Vec<Vec<String>> = plan
        .operations
        .iter()
        .map(|op| {
            vec![
                op.order.to_string(),
                format!("{}\n{}", op.name, op.details),
                format!("{} min", op.time_minutes),
                String::new(),
            ]
        })
        .collect();
    doc.heading(2, "Opérations à réaliser :").table(&OPERATION_HEADERS, &rows);

    doc.heading(3, "Consignes de sécurité :");
    for instruction in SAFETY_INSTRUCTIONS {
        doc.bullet(instruction);
    }
    doc.paragraph(&format!("Date : {}", plan.date_text()));
    doc
}

/// Write the work order to `path`.
pub fn save_plan(plan: &MaintenancePlan, path: &Path) -> Result<(), RenderError> {
    let bytes = build_document(plan)
        .to_bytes()
        .map_err(|e| RenderError::Package(path.to_path_buf(), e))?;
    ooxml::write_file(path, &bytes).map_err(|e| RenderError::Io(path.to_path_buf(), e))?;
    info!(path = %path.display(), operations = plan.operations.len(), "Work order saved");
    Ok(())
}

/// Plain-text rendering for the terminal and logs.
pub fn plan_text(plan: &MaintenancePlan) -> String {
    let mut lines = vec![
        plan.title(),
        format!("{} - {} C = {}", plan.component, plan.subcomponent, plan.criticality),
        String::new(),
        "Matériels nécessaires :".to_string(),
    ];
    lines.extend(plan.materials.iter().map(|m| format!("  - {m}")));
    lines.push(format!("Temps total estimé : {}", plan.total_time()));
    lines.push(String::new());
    lines.push("Opérations à réaliser :".to_string());
    lines.extend(
        plan.operations
            .iter()
            .map(|op| format!("  {}. {} ({} min) : {}", op.order, op.name, op.time_minutes, op.details)),
    );
    if !plan.image_refs.is_empty() {
        lines.push(format!("Photos : {}", plan.image_refs.join(", ")));
    }
    lines.push(format!("Date : {}", plan.date_text()));
    lines.join("\n")
}
