//! Stoppage history reader
//!
//! Loads an `.xlsx` workbook (first worksheet) or a `.csv` export, resolves
//! the four required columns and normalises every row into a
//! [`HistoryRecord`]. A file either parses completely or fails; there is no
//! partial result.

use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use super::columns::ColumnMap;
use super::duration::{convert_to_hours, parse_duration_text};
use crate::ooxml::{self, Cell, OoxmlError, Sheet, WorkbookWriter, WriteCell};
use crate::text;
use crate::types::{HistoryRecord, Resolved};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("history file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported history format '{ext}' ({}): expected .xlsx or .csv", .path.display())]
    UnsupportedExtension { path: PathBuf, ext: String },

    #[error("unreadable workbook ({}): {}", .0.display(), .1)]
    Workbook(PathBuf, #[source] OoxmlError),

    #[error("history I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("missing columns: {}. Found columns: {}", .missing.join(", "), .found.join(", "))]
    MissingColumns { missing: Vec<String>, found: Vec<String> },
}

// ============================================================================
// CSV
// ============================================================================

/// Split a CSV line respecting quoted fields (handles delimiters inside quotes).
fn csv_split(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == delimiter && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Parse CSV text into a sheet. French exports use `;`; it is chosen when
/// the header has semicolons and no commas.
fn csv_sheet(content: &str) -> Sheet {
    let content = content.trim_start_matches('\u{feff}');
    let header = content.lines().next().unwrap_or_default();
    let delimiter = if header.contains(';') && !header.contains(',') { ';' } else { ',' };
    let rows = content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            csv_split(line, delimiter)
                .into_iter()
                .map(|f| if f.trim().is_empty() { Cell::Empty } else { Cell::Text(f) })
                .collect()
        })
        .collect();
    Sheet { rows }
}

// ============================================================================
// Parsing
// ============================================================================

fn read_sheet(path: &Path) -> Result<Sheet, ParseError> {
    if !path.exists() {
        return Err(ParseError::NotFound(path.to_path_buf()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => {
            let bytes = std::fs::read(path).map_err(|e| ParseError::Io(path.to_path_buf(), e))?;
            ooxml::read_first_sheet(&bytes).map_err(|e| ParseError::Workbook(path.to_path_buf(), e))
        }
        "csv" => {
            let content =
                std::fs::read_to_string(path).map_err(|e| ParseError::Io(path.to_path_buf(), e))?;
            Ok(csv_sheet(&content))
        }
        _ => Err(ParseError::UnsupportedExtension { path: path.to_path_buf(), ext }),
    }
}

/// Counters reported once a sheet has been normalised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub rows: usize,
    pub unknown_components: usize,
    pub unknown_subcomponents: usize,
    pub zero_durations: usize,
    /// Non-empty duration cells whose notation was not recognised
    pub unreadable_durations: usize,
}

/// Normalise the rows of a history sheet.
pub fn records_from_sheet(sheet: &Sheet) -> Result<(Vec<HistoryRecord>, ParseSummary), ParseError> {
    let headers: Vec<String> = sheet.header().iter().map(Cell::to_text).collect();
    let map = ColumnMap::resolve(&headers).map_err(|missing| ParseError::MissingColumns {
        missing: missing.into_iter().map(str::to_string).collect(),
        found: headers.iter().map(|h| text::column_key(h)).filter(|k| !k.is_empty()).collect(),
    })?;

    let mut summary = ParseSummary::default();
    let mut records = Vec::new();
    for row in sheet.data_rows() {
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        let duration_cell = Sheet::cell(row, map.duree);
        let record = HistoryRecord::from_cells(
            &Sheet::cell(row, map.composant).to_text(),
            &Sheet::cell(row, map.sous_composant).to_text(),
            &Sheet::cell(row, map.cause).to_text(),
            convert_to_hours(duration_cell),
        );

        summary.rows += 1;
        if !matches!(record.component, Resolved::Known(_)) {
            summary.unknown_components += 1;
        }
        if !matches!(record.subcomponent, Resolved::Known(_)) {
            summary.unknown_subcomponents += 1;
        }
        if record.duration_hours == 0.0 {
            summary.zero_durations += 1;
        }
        if let Cell::Text(s) = duration_cell {
            if parse_duration_text(s).is_none() {
                summary.unreadable_durations += 1;
            }
        }
        records.push(record);
    }
    Ok((records, summary))
}

/// Parse a history file into normalised records.
pub fn parse(path: &Path) -> Result<Vec<HistoryRecord>, ParseError> {
    let sheet = read_sheet(path)?;
    let (records, summary) = records_from_sheet(&sheet)?;

    info!(
        file = %path.display(),
        rows = summary.rows,
        unknown_components = summary.unknown_components,
        unknown_subcomponents = summary.unknown_subcomponents,
        zero_durations = summary.zero_durations,
        "History parsed"
    );
    if summary.unreadable_durations > 0 {
        warn!(
            count = summary.unreadable_durations,
            "Duration cells in an unrecognised notation were counted as 0 h"
        );
    }
    Ok(records)
}

// ============================================================================
// Normalised export
// ============================================================================

/// Default export path: `<stem>_normalized_<YYYYmmdd_HHMMSS>.xlsx` next to the input.
pub fn default_normalized_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("historique");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    input.with_file_name(format!("{stem}_normalized_{timestamp}.xlsx"))
}

/// Write normalised records as an `.xlsx` with the canonical column names.
pub fn save_normalized(records: &[HistoryRecord], path: &Path) -> Result<(), ParseError> {
    let mut writer = WorkbookWriter::new("Historique");
    writer.push_row(
        ["composant", "sous_composant", "cause", "duree"]
            .into_iter()
            .map(|h| WriteCell::plain(Cell::text(h)))
            .collect(),
    );
    for record in records {
        writer.push_row(vec![
            WriteCell::plain(Cell::Text(record.component_text())),
            WriteCell::plain(Cell::Text(record.subcomponent_text())),
            WriteCell::plain(Cell::text(record.cause.key())),
            WriteCell::plain(Cell::Number(record.duration_hours)),
        ]);
    }
    let bytes = writer.to_bytes().map_err(|e| ParseError::Workbook(path.to_path_buf(), e))?;
    ooxml::write_file(path, &bytes).map_err(|e| ParseError::Io(path.to_path_buf(), e))?;
    info!(path = %path.display(), rows = records.len(), "Normalised history saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cause, Component, Subcomponent};

    #[test]
    fn test_csv_split_quotes() {
        assert_eq!(csv_split(r#"a,"b,c",d"#, ','), vec!["a", "b,c", "d"]);
        assert_eq!(csv_split(r#""say ""hi""";x"#, ';'), vec![r#"say "hi""#, "x"]);
    }

    #[test]
    fn test_semicolon_csv() {
        let sheet = csv_sheet("\u{feff}Composant;Sous-composant;Cause;Durée\nEco BT;Épingle;Rouille;2,5\n\n");
        let (records, summary) = records_from_sheet(&sheet).unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(records[0].component, Resolved::Known(Component::EconomiseurBt));
        assert_eq!(records[0].subcomponent, Resolved::Known(Subcomponent::Epingle));
        assert_eq!(records[0].cause, Cause::Corrosion);
        assert!((records[0].duration_hours - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_summary_counts_unknowns() {
        let sheet = csv_sheet(
            "Composant,Sous-composant,Cause,Durée\n\
             Turbine,Épingle,Fuite,1h\n\
             Eco HT,,Fuite,longtemps\n",
        );
        let (records, summary) = records_from_sheet(&sheet).unwrap();
        assert_eq!(records[0].component, Resolved::Unmapped("turbine".into()));
        assert_eq!(records[1].subcomponent, Resolved::Unknown);
        assert_eq!(summary.unknown_components, 1);
        assert_eq!(summary.unknown_subcomponents, 1);
        assert_eq!(summary.zero_durations, 1);
        assert_eq!(summary.unreadable_durations, 1);
    }

    #[test]
    fn test_missing_columns() {
        let sheet = csv_sheet("Composant,Date\nEco BT,2024-01-01\n");
        match records_from_sheet(&sheet) {
            Err(ParseError::MissingColumns { missing, found }) => {
                assert_eq!(missing, vec!["sous_composant", "cause", "duree"]);
                assert_eq!(found, vec!["composant", "date"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(parse(&dir.path().join("absent.xlsx")), Err(ParseError::NotFound(_))));

        let xls = dir.path().join("old.xls");
        std::fs::write(&xls, b"legacy").unwrap();
        assert!(matches!(parse(&xls), Err(ParseError::UnsupportedExtension { .. })));

        let broken = dir.path().join("broken.xlsx");
        std::fs::write(&broken, b"not a zip").unwrap();
        assert!(matches!(parse(&broken), Err(ParseError::Workbook(..))));
    }

    #[test]
    fn test_normalized_export_reparses() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            HistoryRecord::from_cells("Eco BT", "épingles", "rouille", 0.5),
            HistoryRecord::from_cells("Sur HT", "porteur", "", 3.0),
        ];
        let path = dir.path().join("out").join("normalized.xlsx");
        save_normalized(&records, &path).unwrap();
        assert_eq!(parse(&path).unwrap(), records);
    }

    #[test]
    fn test_default_normalized_path() {
        let path = default_normalized_path(Path::new("data/historique.xlsx"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("historique_normalized_"), "{name}");
        assert!(name.ends_with(".xlsx"));
        assert_eq!(path.parent(), Some(Path::new("data")));
    }
}
