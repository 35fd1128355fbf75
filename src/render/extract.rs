//! Plain text of rendered documents, as fed to the retrieval index

use std::path::Path;

use super::RenderError;
use crate::ooxml::{self, Cell, Sheet};
use crate::types::DocumentKind;

/// Tabular text of a worksheet: a column line, then one line per data row
/// (`Ligne 1: Composant: Économiseur BT, Cause: Corrosion`).
pub fn sheet_text(sheet: &Sheet) -> String {
    let columns: Vec<String> = sheet.header().iter().map(Cell::to_text).collect();
    let mut out = format!("Colonnes: {}\n\n", columns.join(", "));
    for (i, row) in sheet.data_rows().iter().enumerate() {
        let fields: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(c, name)| format!("{name}: {}", Sheet::cell(row, c).to_text()))
            .collect();
        out.push_str(&format!("Ligne {}: {}\n", i + 1, fields.join(", ")));
    }
    out
}

/// Kind and text of an indexable file; `Unsupported` for other extensions.
pub fn extract_text(path: &Path) -> Result<(DocumentKind, String), RenderError> {
    let kind = DocumentKind::from_path(path).ok_or_else(|| RenderError::Unsupported(path.to_path_buf()))?;
    let io_err = |e| RenderError::Io(path.to_path_buf(), e);
    let text = match kind {
        DocumentKind::Excel => {
            let bytes = std::fs::read(path).map_err(io_err)?;
            let sheet =
                ooxml::read_first_sheet(&bytes).map_err(|e| RenderError::Package(path.to_path_buf(), e))?;
            sheet_text(&sheet)
        }
        DocumentKind::Docx => {
            let bytes = std::fs::read(path).map_err(io_err)?;
            ooxml::extract_document_text(&bytes).map_err(|e| RenderError::Package(path.to_path_buf(), e))?
        }
        DocumentKind::Json => {
            let raw = std::fs::read_to_string(path).map_err(io_err)?;
            let value: serde_json::Value =
                serde_json::from_str(&raw).map_err(|e| RenderError::Json(path.to_path_buf(), e))?;
            value.to_string()
        }
        DocumentKind::Txt => std::fs::read_to_string(path).map_err(io_err)?,
    };
    Ok((kind, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::{WorkbookWriter, WriteCell};

    #[test]
    fn test_sheet_text_layout() {
        let sheet = Sheet {
            rows: vec![
                vec![Cell::text("Composant"), Cell::text("C")],
                vec![Cell::text("Économiseur BT"), Cell::Number(24.0)],
                vec![Cell::text("Réchauffeur HT")],
            ],
        };
        assert_eq!(
            sheet_text(&sheet),
            "Colonnes: Composant, C\n\nLigne 1: Composant: Économiseur BT, C: 24\nLigne 2: Composant: Réchauffeur HT, C: \n"
        );
    }

    #[test]
    fn test_extract_each_kind() {
        let dir = tempfile::tempdir().unwrap();

        let xlsx = dir.path().join("amdec.xlsx");
        let mut writer = WorkbookWriter::new("AMDEC");
        writer.push_row(vec![WriteCell::plain(Cell::text("Cause"))]);
        writer.push_row(vec![WriteCell::plain(Cell::text("Corrosion"))]);
        ooxml::write_file(&xlsx, &writer.to_bytes().unwrap()).unwrap();
        let (kind, text) = extract_text(&xlsx).unwrap();
        assert_eq!(kind, DocumentKind::Excel);
        assert!(text.contains("Ligne 1: Cause: Corrosion"));

        let json = dir.path().join("chaudiere.json");
        std::fs::write(&json, "{\n  \"nom\": \"Épingle\"\n}").unwrap();
        assert_eq!(extract_text(&json).unwrap().1, r#"{"nom":"Épingle"}"#);

        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "fuite collecteur").unwrap();
        assert_eq!(extract_text(&txt).unwrap(), (DocumentKind::Txt, "fuite collecteur".to_string()));

        let bad = dir.path().join("broken.json");
        std::fs::write(&bad, "{").unwrap();
        assert!(matches!(extract_text(&bad), Err(RenderError::Json(..))));

        assert!(matches!(
            extract_text(&dir.path().join("photo.png")),
            Err(RenderError::Unsupported(_))
        ));
    }
}
