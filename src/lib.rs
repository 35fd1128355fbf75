//! Boiler AMDEC: FMECA decision support for boiler heat exchangers
//!
//! Turns a maintenance stoppage history into a ranked FMECA (AMDEC) table,
//! produces maintenance work orders from criticality, indexes the generated
//! documents for retrieval and answers maintenance questions.
//!
//! ## Architecture
//!
//! - **Acquisition**: history spreadsheet parsing and normalisation
//! - **FMECA**: Frequency x Gravity x Detection scoring per failure cause
//! - **Maintenance**: tiered work-order generation
//! - **Render**: `.xlsx` / `.docx` output and text extraction
//! - **Context**: TF-IDF retrieval index and segment extraction
//! - **Chat**: rule-based maintenance assistant
//! - **Knowledge**: the shared boiler tables every stage reads from

pub mod acquisition;
pub mod chat;
pub mod config;
pub mod context;
pub mod fmeca;
pub mod knowledge;
pub mod maintenance;
pub mod ooxml;
pub mod render;
pub mod text;
pub mod types;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{
    Cause, Component, CriticalityBand, DocumentKind, FmecaRow, FmecaTable, HistoryRecord,
    MaintenancePlan, MaintenanceTier, PlannedOperation, Resolved, Subcomponent, SubcomponentCategory,
    VectorDocument,
};

// Re-export pipeline stages
pub use acquisition::ParseError;
pub use chat::ChatBot;
pub use context::{IndexError, Retriever, VectorDb};
pub use fmeca::FmecaBuilder;
pub use maintenance::Planner;
pub use render::RenderError;
