//! FMECA (AMDEC) generation
//!
//! - scoring: frequency, gravity and detection scales
//! - builder: grouping of history records into a ranked FMECA table

pub mod builder;
pub mod scoring;

pub use builder::FmecaBuilder;
