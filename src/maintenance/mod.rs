//! Maintenance work orders (gammes de maintenance)
//!
//! The planner turns a (component, subcomponent) pair and its criticality
//! into a `MaintenancePlan`; rendering to `.docx` lives in `render`.

pub mod planner;

pub use planner::Planner;
