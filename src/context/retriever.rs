//! Query-focused extraction over index search results

use serde::Serialize;

use super::vector_db::VectorDb;
use crate::config::{defaults, AppConfig};
use crate::types::DocumentKind;

/// A retrieved document with the passages most relevant to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub similarity: f64,
    pub segments: Vec<String>,
}

pub struct Retriever<'a> {
    db: &'a VectorDb,
    max_segments: usize,
    segment_length: usize,
}

impl<'a> Retriever<'a> {
    pub const fn new(db: &'a VectorDb) -> Self {
        Self { db, max_segments: defaults::MAX_SEGMENTS, segment_length: defaults::SEGMENT_LENGTH }
    }

    pub const fn with_config(db: &'a VectorDb, config: &AppConfig) -> Self {
        Self {
            db,
            max_segments: config.retrieval.max_segments,
            segment_length: config.retrieval.segment_length,
        }
    }

    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<RetrievedDocument> {
        self.db
            .search(query, top_k)
            .into_iter()
            .map(|hit| RetrievedDocument {
                id: hit.document.id.clone(),
                kind: hit.document.kind,
                similarity: hit.similarity,
                segments: extract_segments(&hit.document.text, query, self.max_segments, self.segment_length),
            })
            .collect()
    }
}

fn keyword_score(text: &str, keywords: &[String]) -> usize {
    let text = text.to_lowercase();
    keywords.iter().filter(|k| text.contains(k.as_str())).count()
}

/// Up to `max_segments` lines of `text` containing query words, best first.
///
/// A line longer than `segment_length` characters is cut down to the window
/// (step `segment_length / 2`) holding the most query words, with `...` marking
/// the cut ends.
pub fn extract_segments(text: &str, query: &str, max_segments: usize, segment_length: usize) -> Vec<String> {
    let mut keywords: Vec<String> = query.to_lowercase().split_whitespace().map(str::to_string).collect();
    keywords.sort_unstable();
    keywords.dedup();

    let mut scored: Vec<(&str, usize)> = text
        .split('\n')
        .filter(|p| !p.trim().is_empty())
        .map(|p| (p, keyword_score(p, &keywords)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(max_segments)
        .filter(|(_, score)| *score > 0)
        .map(|(paragraph, _)| window(paragraph, &keywords, segment_length))
        .collect()
}

fn window(paragraph: &str, keywords: &[String], segment_length: usize) -> String {
    let chars: Vec<char> = paragraph.chars().collect();
    if chars.len() <= segment_length {
        return paragraph.to_string();
    }

    let step = (segment_length / 2).max(1);
    let mut best = (0usize, 0usize);
    for start in (0..chars.len() - segment_length).step_by(step) {
        let slice: String = chars[start..start + segment_length].iter().collect();
        let score = keyword_score(&slice, keywords);
        if score > best.1 {
            best = (start, score);
        }
    }

    let start = best.0;
    let end = (start + segment_length).min(chars.len());
    let mut segment: String = chars[start..end].iter().collect();
    if start > 0 {
        segment.insert_str(0, "...");
    }
    if end < chars.len() {
        segment.push_str("...");
    }
    segment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_kept_whole_and_ranked() {
        let text = "Composant: Économiseur BT\nCause: corrosion externe\n\nFuite et corrosion au collecteur";
        let segments = extract_segments(text, "corrosion collecteur", 3, 200);
        assert_eq!(segments, vec!["Fuite et corrosion au collecteur", "Cause: corrosion externe"]);
    }

    #[test]
    fn test_long_line_is_windowed_with_ellipses() {
        let filler = "x".repeat(300);
        let text = format!("{filler} corrosion {filler}");
        let segments = extract_segments(&text, "corrosion", 3, 200);
        assert_eq!(segments.len(), 1);
        let segment = &segments[0];
        assert!(segment.starts_with("...") && segment.ends_with("..."), "{segment}");
        assert!(segment.contains("corrosion"));
        assert_eq!(segment.chars().count(), 206);
    }

    #[test]
    fn test_no_keyword_no_segment() {
        assert!(extract_segments("vibration\nfatigue", "corrosion", 3, 200).is_empty());
    }

    #[test]
    fn test_max_segments() {
        let text = "fuite a\nfuite b\nfuite c\nfuite d";
        assert_eq!(extract_segments(text, "fuite", 3, 200).len(), 3);
    }
}
