//! Indexed document type

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source format of an indexed document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Excel,
    Docx,
    Json,
    Txt,
}

impl DocumentKind {
    /// Kind from a file extension; `None` for files the index does not ingest.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(Self::Excel),
            "docx" => Some(Self::Docx),
            "json" => Some(Self::Json),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::Docx => "docx",
            Self::Json => "json",
            Self::Txt => "txt",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document held by the retrieval index. Its embedding lives at the same
/// position in the index's embedding matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorDocument {
    /// File name, unique within the index
    pub id: String,
    pub path: PathBuf,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(DocumentKind::from_path(Path::new("a/amdec.XLSX")), Some(DocumentKind::Excel));
        assert_eq!(DocumentKind::from_path(Path::new("gamme.docx")), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_path(Path::new("old.xls")), None);
        assert_eq!(DocumentKind::from_path(Path::new("README")), None);
    }
}
