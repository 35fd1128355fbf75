//! Document rendering
//!
//! - fmeca_workbook: styled `.xlsx` FMECA table, and reading it back
//! - work_order: `.docx` maintenance work orders
//! - extract: plain text of rendered documents for the retrieval index
//!
//! Every writer goes through `ooxml::write_file`, so a crash mid-write never
//! leaves a truncated document behind.

pub mod extract;
pub mod fmeca_workbook;
pub mod work_order;

use std::path::PathBuf;

use thiserror::Error;

use crate::ooxml::OoxmlError;

pub use extract::extract_text;
pub use fmeca_workbook::{fmeca_text, load_fmeca, save_fmeca, save_fmeca_styled};
pub use work_order::{default_plan_path, plan_text, save_plan};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document packaging failed ({}): {}", .0.display(), .1)]
    Package(PathBuf, #[source] OoxmlError),

    #[error("document I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("not an FMECA workbook ({}): missing columns {}", .path.display(), .missing.join(", "))]
    NotFmeca { path: PathBuf, missing: Vec<String> },

    #[error("invalid FMECA row {row} ({}): {reason}", .path.display())]
    InvalidRow { path: PathBuf, row: usize, reason: String },

    #[error("unsupported document format ({})", .0.display())]
    Unsupported(PathBuf),

    #[error("invalid JSON document ({}): {}", .0.display(), .1)]
    Json(PathBuf, #[source] serde_json::Error),
}
