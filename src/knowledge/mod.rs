//! Shared boiler knowledge
//!
//! Every static fact used by the FMECA builder, the maintenance planner and
//! the chat lives here, keyed by the closed taxonomy in `types`:
//!
//! - `fmeca_tables`: failure modes, effects, functions, corrective actions,
//!   detection term lists
//! - `planner_tables`: work-order operations, materials, default criticality,
//!   image files
//! - `chat_tables`: assistant answer lists and response templates
//! - `catalog`: optional descriptive JSON catalog

pub mod catalog;
pub mod chat_tables;
pub mod fmeca_tables;
pub mod planner_tables;

pub use catalog::ComponentCatalog;
pub use planner_tables::OperationTemplate;
