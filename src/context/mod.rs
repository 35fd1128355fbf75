//! Context module - maintenance knowledge retrieval
//!
//! Indexes the generated FMECA workbooks, work orders and reference files
//! under TF-IDF vectors and answers free-text queries with the most similar
//! documents and their relevant passages.

pub mod retriever;
pub mod tfidf;
pub mod vector_db;

pub use retriever::{extract_segments, RetrievedDocument, Retriever};
pub use tfidf::TfidfVectorizer;
pub use vector_db::{document_from_file, IndexError, IndexSettings, SearchHit, VectorDb};
