//! Minimal Office Open XML support
//!
//! Just enough of SpreadsheetML and WordprocessingML to read history
//! workbooks, write styled FMECA workbooks and work-order documents, and pull
//! plain text back out for indexing. Packages are zip archives of XML parts;
//! parts are read with a decompressed-size cap.

pub mod document;
pub mod workbook;

use std::io::{Cursor, Read, Write};
use std::path::Path;

use thiserror::Error;
use zip::write::SimpleFileOptions;

pub use document::{extract_document_text, DocumentBuilder};
pub use workbook::{read_first_sheet, Cell, CellFormat, Sheet, WorkbookWriter, WriteCell};

use crate::config::defaults::MAX_PART_BYTES;

#[derive(Debug, Error)]
pub enum OoxmlError {
    #[error("invalid package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("package part {0} not found")]
    MissingPart(String),

    #[error("package part {0} exceeds size limit ({MAX_PART_BYTES} bytes)")]
    PartTooLarge(String),

    #[error("cell reference {reference} in {part} is outside the sheet grid")]
    CellOutOfRange { part: String, reference: String },

    #[error("package I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OoxmlError {
    fn xml(part: &str, source: quick_xml::Error) -> Self {
        Self::Xml { part: part.to_string(), source }
    }
}

pub(crate) type Archive<'a> = zip::ZipArchive<Cursor<&'a [u8]>>;

pub(crate) fn open_archive(bytes: &[u8]) -> Result<Archive<'_>, OoxmlError> {
    Ok(zip::ZipArchive::new(Cursor::new(bytes))?)
}

/// Read one part, bounded by [`MAX_PART_BYTES`].
pub(crate) fn read_part(archive: &mut Archive<'_>, name: &str) -> Result<Vec<u8>, OoxmlError> {
    let entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(OoxmlError::MissingPart(name.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let mut out = Vec::new();
    entry.take(MAX_PART_BYTES).read_to_end(&mut out)?;
    if out.len() as u64 >= MAX_PART_BYTES {
        return Err(OoxmlError::PartTooLarge(name.to_string()));
    }
    Ok(out)
}

/// Assemble a package from `(part name, XML)` pairs.
pub(crate) fn write_package(parts: &[(&str, String)]) -> Result<Vec<u8>, OoxmlError> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, xml) in parts {
        zip.start_file(*name, options)?;
        zip.write_all(xml.as_bytes())?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Write a package to disk atomically (temp file alongside, then rename).
pub fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("bin");
    let tmp_path = path.with_extension(format!("{ext}.tmp"));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&tmp_path, bytes)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Escape text for element content and attribute values.
pub(crate) fn esc(text: &str) -> std::borrow::Cow<'_, str> {
    quick_xml::escape::escape(text)
}

pub(crate) const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(open_archive(b"not a zip"), Err(OoxmlError::Zip(_))));
    }

    #[test]
    fn test_missing_part() {
        let bytes = write_package(&[("a.xml", "<a/>".to_string())]).unwrap();
        let mut archive = open_archive(&bytes).unwrap();
        assert_eq!(read_part(&mut archive, "a.xml").unwrap(), b"<a/>");
        assert!(matches!(read_part(&mut archive, "b.xml"), Err(OoxmlError::MissingPart(_))));
    }
}
