//! Stoppage history acquisition
//!
//! Reads the maintenance history spreadsheet and normalises it into
//! `HistoryRecord`s for the FMECA builder.

pub mod columns;
pub mod duration;
pub mod history_parser;

pub use duration::convert_to_hours;
pub use history_parser::{default_normalized_path, parse, save_normalized, ParseError, ParseSummary};
