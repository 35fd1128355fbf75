//! FMECA workbook: styled writer and reader

use std::path::Path;

use tracing::{info, warn};

use super::RenderError;
use crate::config::defaults::FMECA_COLUMN_WIDTHS;
use crate::config::{self, validation, RenderConfig};
use crate::ooxml::{self, Cell, CellFormat, Sheet, WorkbookWriter, WriteCell};
use crate::text;
use crate::types::{
    Cause, Component, CriticalityBand, FmecaRow, FmecaTable, Subcomponent, FMECA_HEADERS, FMECA_HEADERS_EN,
};

/// Index of the C column in `FMECA_HEADERS`.
const CRITICALITY_COLUMN: usize = 9;

// ============================================================================
// Writing
// ============================================================================

/// Write the table with the configured colours.
pub fn save_fmeca(table: &FmecaTable, path: &Path) -> Result<(), RenderError> {
    save_fmeca_styled(table, path, &config::current().render)
}

/// Write the table. Invalid colours are reported and the workbook is written
/// without styling instead of failing.
pub fn save_fmeca_styled(table: &FmecaTable, path: &Path, colours: &RenderConfig) -> Result<(), RenderError> {
    let problems = validation::validate_colours(colours);
    let styled = problems.is_empty();
    if !styled {
        warn!(
            path = %path.display(),
            problems = %problems.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
            "Invalid workbook colours, writing FMECA without styling"
        );
    }

    let format = |f: CellFormat| if styled { f } else { CellFormat::default() };
    let body = CellFormat { border: true, wrap: true, ..CellFormat::default() };
    let header = CellFormat {
        bold: true,
        font_colour: Some(colours.header_font.clone()),
        fill: Some(colours.header_fill.clone()),
        centered: true,
        ..body.clone()
    };

    let mut writer = WorkbookWriter::new("AMDEC").column_widths(&FMECA_COLUMN_WIDTHS);
    writer.push_row(
        FMECA_HEADERS
            .iter()
            .map(|h| WriteCell::styled(Cell::text(*h), format(header.clone())))
            .collect(),
    );

    for row in &table.rows {
        let criticality_format =
            CellFormat { fill: Some(band_fill(colours, row.band()).to_string()), ..body.clone() };
        let cells = row
            .cells()
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let value = match i {
                    6 => Cell::Number(f64::from(row.frequency)),
                    7 => Cell::Number(f64::from(row.gravity)),
                    8 => Cell::Number(f64::from(row.detection)),
                    CRITICALITY_COLUMN => Cell::Number(f64::from(row.criticality)),
                    _ => Cell::Text(value),
                };
                let cell_format = if i == CRITICALITY_COLUMN { criticality_format.clone() } else { body.clone() };
                WriteCell::styled(value, format(cell_format))
            })
            .collect();
        writer.push_row(cells);
    }

    let bytes = writer.to_bytes().map_err(|e| RenderError::Package(path.to_path_buf(), e))?;
    ooxml::write_file(path, &bytes).map_err(|e| RenderError::Io(path.to_path_buf(), e))?;
    info!(path = %path.display(), rows = table.len(), styled, "FMECA workbook saved");
    Ok(())
}

fn band_fill(colours: &RenderConfig, band: CriticalityBand) -> &str {
    match band {
        CriticalityBand::Negligible => &colours.fill_low,
        CriticalityBand::Moderate => &colours.fill_moderate,
        CriticalityBand::High => &colours.fill_high,
        CriticalityBand::Unacceptable => &colours.fill_critical,
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Column index of every FMECA header, French or English.
fn header_columns(sheet: &Sheet, path: &Path) -> Result<[usize; 11], RenderError> {
    let keys: Vec<String> = sheet.header().iter().map(|c| text::column_key(&c.to_text())).collect();
    let mut columns = [0usize; 11];
    let mut missing = Vec::new();
    for (i, (fr, en)) in FMECA_HEADERS.iter().zip(FMECA_HEADERS_EN.iter()).enumerate() {
        let (fr, en) = (text::column_key(fr), text::column_key(en));
        match keys.iter().position(|k| *k == fr || *k == en) {
            Some(column) => columns[i] = column,
            None => missing.push(FMECA_HEADERS[i].to_string()),
        }
    }
    if missing.is_empty() {
        Ok(columns)
    } else {
        Err(RenderError::NotFmeca { path: path.to_path_buf(), missing })
    }
}

fn score(cell: &Cell) -> Option<u32> {
    match cell {
        Cell::Number(n) if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(n) => Some(*n as u32),
        Cell::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn row_from_cells(cells: &[Cell], columns: &[usize; 11]) -> Result<FmecaRow, String> {
    let text_at = |i: usize| Sheet::cell(cells, columns[i]).to_text();
    let score_at = |i: usize| {
        score(Sheet::cell(cells, columns[i])).ok_or_else(|| format!("{} is not an integer", FMECA_HEADERS[i]))
    };
    let small_score = |i: usize| {
        score_at(i).and_then(|v| u8::try_from(v).map_err(|_| format!("{} out of range", FMECA_HEADERS[i])))
    };

    let component = Component::resolve(&text_at(0))
        .known()
        .ok_or_else(|| format!("unknown component '{}'", text_at(0)))?;
    let subcomponent = Subcomponent::resolve(&text_at(1))
        .known()
        .ok_or_else(|| format!("unknown subcomponent '{}'", text_at(1)))?;

    Ok(FmecaRow {
        component,
        subcomponent,
        function: text_at(2),
        failure_mode: text_at(3),
        cause: Cause::resolve(&text_at(4)),
        effect: text_at(5),
        frequency: small_score(6)?,
        gravity: small_score(7)?,
        detection: small_score(8)?,
        criticality: score_at(CRITICALITY_COLUMN)?,
        corrective_actions: text_at(10),
    })
}

/// Read a workbook written by [`save_fmeca`] (or any sheet carrying the same
/// columns). Rows keep their order in the sheet.
pub fn load_fmeca(path: &Path) -> Result<FmecaTable, RenderError> {
    let bytes = std::fs::read(path).map_err(|e| RenderError::Io(path.to_path_buf(), e))?;
    let sheet = ooxml::read_first_sheet(&bytes).map_err(|e| RenderError::Package(path.to_path_buf(), e))?;
    let columns = header_columns(&sheet, path)?;

    let mut table = FmecaTable::default();
    for (i, cells) in sheet.data_rows().iter().enumerate() {
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        let row = row_from_cells(cells, &columns).map_err(|reason| RenderError::InvalidRow {
            path: path.to_path_buf(),
            row: i + 2,
            reason,
        })?;
        table.rows.push(row);
    }
    info!(path = %path.display(), rows = table.len(), "FMECA workbook loaded");
    Ok(table)
}

// ============================================================================
// Plain text
// ============================================================================

/// One line per row, columns separated by ` | `, header first.
pub fn fmeca_text(table: &FmecaTable) -> String {
    let mut out = FMECA_HEADERS.join(" | ");
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.cells().join(" | "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmeca::FmecaBuilder;
    use crate::types::HistoryRecord;

    fn sample_table() -> FmecaTable {
        let mut history = vec![HistoryRecord::from_cells("Eco BT", "Epingle", "corrosion", 0.4); 2];
        history.extend(vec![HistoryRecord::from_cells("Sur HT", "Tube porteur", "fissure", 20.0); 7]);
        history.push(HistoryRecord::from_cells("Rch HT", "Branches sortie", "foudre", 3.0));
        FmecaBuilder::new(Some(5)).generate(&history)
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("amdec.xlsx");
        let table = sample_table();
        save_fmeca_styled(&table, &path, &RenderConfig::default()).unwrap();
        assert!(!path.with_extension("xlsx.tmp").exists());
        assert_eq!(load_fmeca(&path).unwrap(), table);
    }

    #[test]
    fn test_invalid_colours_still_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.xlsx");
        let colours = RenderConfig { fill_low: "vert".to_string(), ..RenderConfig::default() };
        let table = sample_table();
        save_fmeca_styled(&table, &path, &colours).unwrap();
        assert_eq!(load_fmeca(&path).unwrap().len(), table.len());
    }

    #[test]
    fn test_criticality_cell_filled_by_band() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bands.xlsx");
        save_fmeca_styled(&sample_table(), &path, &RenderConfig::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut styles = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("xl/styles.xml").unwrap(), &mut styles).unwrap();
        assert!(styles.contains("FF00FF00"), "green fill for C <= 12");
        assert!(styles.contains("FFFF0000"), "red fill for C > 20");
        assert!(styles.contains("FF0066CC"), "blue header fill");
    }

    #[test]
    fn test_english_headers_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.xlsx");
        let mut writer = WorkbookWriter::new("FMECA");
        writer.push_row(FMECA_HEADERS_EN.iter().map(|h| WriteCell::plain(Cell::text(*h))).collect());
        writer.push_row(
            ["Economiseur HT", "Collecteur entrée", "Distribution", "Fuite", "fuite", "Perte", "2", "3", "1", "6", "x"]
                .iter()
                .map(|v| WriteCell::plain(Cell::text(*v)))
                .collect(),
        );
        ooxml::write_file(&path, &writer.to_bytes().unwrap()).unwrap();

        let table = load_fmeca(&path).unwrap();
        assert_eq!(table.criticality_for(Component::EconomiseurHt, Subcomponent::CollecteurEntree), Some(6));
        assert_eq!(table.rows[0].cause, Cause::Fuite);
    }

    #[test]
    fn test_not_an_fmeca_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.xlsx");
        let mut writer = WorkbookWriter::new("x");
        writer.push_row(vec![WriteCell::plain(Cell::text("Composant"))]);
        ooxml::write_file(&path, &writer.to_bytes().unwrap()).unwrap();
        assert!(matches!(load_fmeca(&path), Err(RenderError::NotFmeca { .. })));
    }

    #[test]
    fn test_fmeca_text() {
        let text = fmeca_text(&sample_table());
        assert!(text.starts_with("Composant | Sous-composant"));
        assert_eq!(text.lines().count(), 4);
    }
}
