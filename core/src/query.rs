use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::index::{build_index, cosine};
use crate::model::{DocId, Document};
use crate::redact::redact;
use crate::tokenizer::{query_terms, stripped_query_terms};

pub const DEFAULT_K: usize = 3;
pub const MAX_EVIDENCE_PER_DOC: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub document_id: DocId,
    /// Sum of the document's tf-idf weights for the query tokens.
    pub score: f64,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarDocument {
    pub document_id: DocId,
    pub original_name: String,
    pub similarity: f64,
}

/// Descending score, then newest first, then lowest id.
pub(crate) fn rank_order(a: (f64, &Document), b: (f64, &Document)) -> Ordering {
    b.0.total_cmp(&a.0)
        .then_with(|| b.1.created_at.cmp(&a.1.created_at))
        .then_with(|| a.1.id.cmp(&b.1.id))
}

/// Answer a free-text question over the whole collection.
///
/// Query tokens are whitespace-split and lowercased, then looked up verbatim
/// in each document's tf-idf map. Evidence snippets are picked with the
/// punctuation-stripped tokens and redacted unless `privileged`.
pub fn query(documents: &[Document], text: &str, k: usize, privileged: bool) -> Vec<QueryResult> {
    let maps = build_index(&documents.iter().map(|d| d.text.as_str()).collect::<Vec<_>>());
    let tokens = query_terms(text);

    let mut scored: Vec<(f64, &Document)> = documents
        .iter()
        .zip(maps.iter())
        .map(|(doc, map)| {
            let score: f64 = tokens.iter().filter_map(|t| map.get(t)).sum();
            (score, doc)
        })
        .filter(|(score, _)| *score > 0.0)
        .collect();
    scored.sort_by(|a, b| rank_order(*a, *b));
    scored.truncate(k);

    let needles = stripped_query_terms(text);
    scored
        .into_iter()
        .map(|(score, doc)| QueryResult {
            document_id: doc.id.clone(),
            score,
            evidence: doc
                .snippets
                .iter()
                .filter(|s| {
                    let s = s.to_lowercase();
                    needles.iter().any(|n| s.contains(n.as_str()))
                })
                .take(MAX_EVIDENCE_PER_DOC)
                .map(|s| redact(s, privileged))
                .collect(),
        })
        .collect()
}

/// Rank the other documents by cosine similarity to `target_id`. Returns
/// `None` when the target is not in the collection.
pub fn similar_documents(documents: &[Document], target_id: &str, k: usize) -> Option<Vec<SimilarDocument>> {
    let target = documents.iter().position(|d| d.id == target_id)?;
    let maps = build_index(&documents.iter().map(|d| d.text.as_str()).collect::<Vec<_>>());

    let mut scored: Vec<(f64, &Document)> = documents
        .iter()
        .zip(maps.iter())
        .enumerate()
        .filter(|(i, _)| *i != target)
        .map(|(_, (doc, map))| (cosine(&maps[target], map), doc))
        .filter(|(sim, _)| *sim > 0.0)
        .collect();
    scored.sort_by(|a, b| rank_order(*a, *b));
    scored.truncate(k);

    Some(
        scored
            .into_iter()
            .map(|(similarity, doc)| SimilarDocument {
                document_id: doc.id.clone(),
                original_name: doc.original_name.clone(),
                similarity,
            })
            .collect(),
    )
}
