//! TF-IDF vectorizer
//!
//! Term weighting compatible with the usual defaults of statistical text
//! toolkits: lower-cased tokens of two or more word characters, raw term
//! counts, smoothed idf `ln((1 + n) / (1 + df)) + 1` and L2-normalised rows.
//! The vocabulary is capped at the `max_features` most frequent terms over
//! the corpus and is frozen once fitted.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::expect_used)]
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"))
}

/// Lower-cased tokens of at least two word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern().find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Cosine similarity; 0 when either vector is null.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    /// Term -> column, columns in alphabetical term order
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features, vocabulary: BTreeMap::new(), idf: Vec::new() }
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Number of columns of the produced vectors.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Learn vocabulary and idf from `documents`, then vectorise them.
    pub fn fit_transform(&mut self, documents: &[&str]) -> Vec<Vec<f64>> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = Vec::new();
            for token in tokens {
                let token = token.as_str();
                *corpus_counts.entry(token).or_default() += 1;
                if !seen.contains(&token) {
                    seen.push(token);
                    *document_frequency.entry(token).or_default() += 1;
                }
            }
        }

        // Most frequent terms first, ties alphabetical
        let mut terms: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        terms.sort_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then_with(|| ta.cmp(tb)));
        terms.truncate(self.max_features);
        let mut kept: Vec<&str> = terms.into_iter().map(|(t, _)| t).collect();
        kept.sort_unstable();

        let n = documents.len() as f64;
        self.idf = kept
            .iter()
            .map(|t| {
                let df = document_frequency.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = kept.into_iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect();

        tokenized.iter().map(|tokens| self.weigh(tokens)).collect()
    }

    /// Vectorise a text under the fitted vocabulary. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        self.weigh(&tokenize(text))
    }

    fn weigh(&self, tokens: &[String]) -> Vec<f64> {
        let mut row = vec![0.0; self.idf.len()];
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                row[column] += 1.0;
            }
        }
        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.iter_mut().for_each(|v| *v /= norm);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Fuite à l'Épingle, C = 24"), vec!["fuite", "épingle", "24"]);
    }

    #[test]
    fn test_smooth_idf_values() {
        let mut v = TfidfVectorizer::new(100);
        v.fit_transform(&["corrosion epingle", "corrosion collecteur"]);
        let corrosion = v.vocabulary["corrosion"];
        let epingle = v.vocabulary["epingle"];
        assert!((v.idf[corrosion] - 1.0).abs() < 1e-12);
        assert!((v.idf[epingle] - (1.5f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let mut v = TfidfVectorizer::new(100);
        let rows = v.fit_transform(&["fuite fuite collecteur", "vibration tube porteur", "x"]);
        for row in &rows[..2] {
            let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
        assert!(rows[2].iter().all(|x| *x == 0.0), "single-character tokens are dropped");
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut v = TfidfVectorizer::new(2);
        v.fit_transform(&["aa aa aa bb bb cc", "dd bb"]);
        assert_eq!(v.dimension(), 2);
        assert!(v.vocabulary.contains_key("aa"));
        assert!(v.vocabulary.contains_key("bb"));
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let mut v = TfidfVectorizer::new(10);
        let rows = v.fit_transform(&["surchauffe collecteur", "erosion epingle"]);
        let q = v.transform("surchauffe turbine");
        assert!(cosine(&q, &rows[0]) > cosine(&q, &rows[1]));
        assert_eq!(v.transform("turbine"), vec![0.0; v.dimension()]);
    }

    #[test]
    fn test_cosine_null_vector() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-12);
    }
}
