use std::collections::{HashMap, HashSet};

use crate::tokenizer::tokenize;

/// Term -> tf-idf weight for a single document.
pub type TermWeightMap = HashMap<String, f64>;

/// Per-document term counts plus collection document frequencies. Built
/// from scratch on each call so weights always reflect the live collection.
#[derive(Debug, Default)]
pub struct TermCounts {
    pub tf: Vec<HashMap<String, u32>>,
    pub df: HashMap<String, u32>,
}

impl TermCounts {
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut counts = TermCounts::default();
        for text in texts {
            let mut tf_doc: HashMap<String, u32> = HashMap::new();
            for term in tokenize(text.as_ref()) {
                *tf_doc.entry(term).or_insert(0) += 1;
            }
            let seen: HashSet<&String> = tf_doc.keys().collect();
            for term in seen {
                *counts.df.entry(term.clone()).or_insert(0) += 1;
            }
            counts.tf.push(tf_doc);
        }
        counts
    }

    pub fn num_docs(&self) -> usize {
        self.tf.len()
    }

    /// Smoothed idf: `1 + ln(N / (1 + df))`.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.num_docs() as f64;
        let df = self.df.get(term).copied().unwrap_or(0) as f64;
        1.0 + (n / (1.0 + df)).ln()
    }
}

/// Build one tf-idf map per input text, same order and length as `texts`.
/// Weight = raw term count x idf.
pub fn build_index<S: AsRef<str>>(texts: &[S]) -> Vec<TermWeightMap> {
    let counts = TermCounts::from_texts(texts);
    counts
        .tf
        .iter()
        .map(|tf_doc| {
            tf_doc
                .iter()
                .map(|(term, &tf)| (term.clone(), tf as f64 * counts.idf(term)))
                .collect()
        })
        .collect()
}

/// Cosine similarity of two term-weight maps; 0 when either is empty.
pub fn cosine(a: &TermWeightMap, b: &TermWeightMap) -> f64 {
    let mut dot = 0.0;
    let mut a2 = 0.0;
    for (term, w) in a {
        a2 += w * w;
        if let Some(wb) = b.get(term) {
            dot += w * wb;
        }
    }
    let b2: f64 = b.values().map(|w| w * w).sum();
    if a2 == 0.0 || b2 == 0.0 {
        return 0.0;
    }
    dot / (a2.sqrt() * b2.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_follow_tf_and_idf() {
        let maps = build_index(&["rust rust python", "python java", "go"]);
        assert_eq!(maps.len(), 3);
        // rust: tf 2, df 1, N 3 -> 2 * (1 + ln(3/2))
        let expected = 2.0 * (1.0 + (1.5f64).ln());
        assert!((maps[0]["rust"] - expected).abs() < 1e-12);
        // python: df 2 -> 1 + ln(1) = 1
        assert!((maps[0]["python"] - 1.0).abs() < 1e-12);
        assert!(!maps[2].contains_key("rust"));
    }

    #[test]
    fn empty_text_yields_empty_map() {
        let maps = build_index(&["", "the and of"]);
        assert!(maps[0].is_empty());
        assert!(maps[1].is_empty());
    }

    #[test]
    fn cosine_bounds() {
        let maps = build_index(&["rust systems", "rust systems", "cooking pasta"]);
        assert!((cosine(&maps[0], &maps[1]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine(&maps[0], &maps[2]), 0.0);
        assert_eq!(cosine(&maps[0], &TermWeightMap::new()), 0.0);
    }
}
