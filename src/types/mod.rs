//! Shared data structures for the FMECA decision-support pipeline
//!
//! - taxonomy: Component, Subcomponent, Cause (closed vocabularies)
//! - history: HistoryRecord (normalised spreadsheet rows)
//! - fmeca: FmecaRow, FmecaTable (builder output)
//! - plan: MaintenancePlan (planner output)
//! - document: VectorDocument (retrieval index entries)
//! - thresholds: scoring boundaries and criticality bands

mod taxonomy;
mod history;
mod fmeca;
mod plan;
mod document;
pub mod thresholds;

pub use taxonomy::*;
pub use history::*;
pub use fmeca::*;
pub use plan::*;
pub use document::*;
pub use thresholds::*;
