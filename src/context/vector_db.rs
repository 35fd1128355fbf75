//! Retrieval index over rendered documents
//!
//! Holds the indexed documents, the fitted TF-IDF vectorizer and one
//! embedding row per document (`embeddings[i]` belongs to `documents[i]`).
//! The whole index is persisted as a single JSON snapshot, written
//! atomically.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::tfidf::{cosine, TfidfVectorizer};
use crate::config::AppConfig;
use crate::render::extract_text;
use crate::types::{DocumentKind, VectorDocument};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("corrupt index snapshot ({}): {}", .0.display(), .1)]
    Corrupt(PathBuf, #[source] serde_json::Error),

    #[error("index snapshot holds {documents} documents but {embeddings} embeddings")]
    Misaligned { documents: usize, embeddings: usize },

    #[error("index serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A search result: the document and its cosine similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub document: &'a VectorDocument,
    pub similarity: f64,
}

/// Where the index lives and what it scans.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    pub index_file: PathBuf,
    /// Directories scanned (non-recursively) by a rebuild
    pub source_dirs: Vec<PathBuf>,
    pub max_features: usize,
    /// Hits must score strictly above this
    pub similarity_floor: f64,
}

impl IndexSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            index_file: config.paths.index_file(),
            source_dirs: vec![config.paths.models_dir.clone(), config.paths.maintenance_dir.clone()],
            max_features: config.retrieval.max_features,
            similarity_floor: config.retrieval.similarity_floor,
        }
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    documents: Vec<VectorDocument>,
    vectorizer: Option<TfidfVectorizer>,
    embeddings: Vec<Vec<f64>>,
}

#[derive(Debug)]
pub struct VectorDb {
    settings: IndexSettings,
    documents: Vec<VectorDocument>,
    vectorizer: Option<TfidfVectorizer>,
    embeddings: Vec<Vec<f64>>,
}

impl VectorDb {
    /// Empty, unsaved index.
    pub const fn empty(settings: IndexSettings) -> Self {
        Self { settings, documents: Vec::new(), vectorizer: None, embeddings: Vec::new() }
    }

    /// Load the snapshot when present and valid, else rebuild from the source
    /// directories.
    pub fn open(settings: IndexSettings) -> Result<Self, IndexError> {
        if settings.index_file.exists() {
            match Self::load(settings.clone()) {
                Ok(db) => return Ok(db),
                Err(e) => warn!(error = %e, "Index snapshot unusable, rebuilding"),
            }
        }
        let mut db = Self::empty(settings);
        db.rebuild()?;
        Ok(db)
    }

    /// Load the snapshot strictly.
    pub fn load(settings: IndexSettings) -> Result<Self, IndexError> {
        let path = &settings.index_file;
        let data = std::fs::read(path).map_err(|e| IndexError::Io(path.clone(), e))?;
        let snapshot: Snapshot =
            serde_json::from_slice(&data).map_err(|e| IndexError::Corrupt(path.clone(), e))?;
        if snapshot.documents.len() != snapshot.embeddings.len() {
            return Err(IndexError::Misaligned {
                documents: snapshot.documents.len(),
                embeddings: snapshot.embeddings.len(),
            });
        }
        info!(path = %path.display(), documents = snapshot.documents.len(), "Index loaded");
        Ok(Self {
            settings,
            documents: snapshot.documents,
            vectorizer: snapshot.vectorizer,
            embeddings: snapshot.embeddings,
        })
    }

    pub fn documents(&self) -> &[VectorDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Re-scan the source directories, refit the vectorizer and save.
    ///
    /// Missing directories are created. Files that fail to extract are
    /// skipped with a warning.
    pub fn rebuild(&mut self) -> Result<(), IndexError> {
        let mut documents = Vec::new();
        for dir in &self.settings.source_dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| IndexError::Io(dir.clone(), e))?;
                continue;
            }
            documents.extend(scan_dir(dir)?);
        }

        self.documents = documents;
        self.vectorizer = None;
        self.embeddings.clear();
        self.fit();
        info!(documents = self.documents.len(), "Index rebuilt");
        self.save()
    }

    /// Append a document and save. The vocabulary stays frozen once fitted;
    /// re-adding an id replaces the stored document.
    pub fn add_document(&mut self, document: VectorDocument) -> Result<(), IndexError> {
        if let Some(i) = self.documents.iter().position(|d| d.id == document.id) {
            debug!(id = %document.id, "Replacing indexed document");
            self.documents.remove(i);
            if i < self.embeddings.len() {
                self.embeddings.remove(i);
            }
        }

        match self.vectorizer.as_ref().filter(|v| v.is_fitted()) {
            Some(vectorizer) => {
                self.embeddings.push(vectorizer.transform(&document.text));
                self.documents.push(document);
            }
            None => {
                self.documents.push(document);
                self.fit();
            }
        }
        self.save()
    }

    /// Index a file from disk under its file name.
    pub fn add_file(&mut self, path: &Path) -> Result<bool, IndexError> {
        match document_from_file(path) {
            Some(document) => {
                self.add_document(document)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Up to `top_k` documents by decreasing cosine similarity, keeping only
    /// those strictly above the similarity floor.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit<'_>> {
        let Some(vectorizer) = self.vectorizer.as_ref() else {
            return Vec::new();
        };
        if self.documents.is_empty() || query.trim().is_empty() {
            return Vec::new();
        }

        let q = vectorizer.transform(query);
        let mut hits: Vec<SearchHit<'_>> = self
            .documents
            .iter()
            .zip(&self.embeddings)
            .map(|(document, row)| SearchHit { document, similarity: cosine(&q, row) })
            .collect();
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(top_k);
        hits.retain(|h| h.similarity > self.settings.similarity_floor);
        debug!(query, hits = hits.len(), "Index searched");
        hits
    }

    pub fn get_document_by_id(&self, id: &str) -> Option<&VectorDocument> {
        self.documents.iter().find(|d| d.id == id)
    }

    fn fit(&mut self) {
        if self.documents.is_empty() {
            self.vectorizer = None;
            self.embeddings.clear();
            return;
        }
        let mut vectorizer = TfidfVectorizer::new(self.settings.max_features);
        let texts: Vec<&str> = self.documents.iter().map(|d| d.text.as_str()).collect();
        self.embeddings = vectorizer.fit_transform(&texts);
        self.vectorizer = Some(vectorizer);
    }

    /// Write the snapshot atomically (temp file, then rename).
    pub fn save(&self) -> Result<(), IndexError> {
        let path = &self.settings.index_file;
        let snapshot = Snapshot {
            documents: self.documents.clone(),
            vectorizer: self.vectorizer.clone(),
            embeddings: self.embeddings.clone(),
        };
        let json = serde_json::to_vec(&snapshot).map_err(IndexError::Serialize)?;

        let tmp_path = path.with_extension("json.tmp");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| IndexError::Io(parent.to_path_buf(), e))?;
        }
        std::fs::write(&tmp_path, &json).map_err(|e| IndexError::Io(tmp_path.clone(), e))?;
        std::fs::rename(&tmp_path, path).map_err(|e| IndexError::Io(path.clone(), e))?;
        debug!(path = %path.display(), documents = self.documents.len(), "Index saved");
        Ok(())
    }
}

/// Indexable document for a file, `None` when the file is skipped.
pub fn document_from_file(path: &Path) -> Option<VectorDocument> {
    DocumentKind::from_path(path)?;
    let id = path.file_name()?.to_string_lossy().into_owned();
    match extract_text(path) {
        Ok((kind, text)) => Some(VectorDocument { id, path: path.to_path_buf(), text, kind }),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Skipping document that could not be read");
            None
        }
    }
}

fn scan_dir(dir: &Path) -> Result<Vec<VectorDocument>, IndexError> {
    let entries = std::fs::read_dir(dir).map_err(|e| IndexError::Io(dir.to_path_buf(), e))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths.iter().filter_map(|p| document_from_file(p)).collect())
}
