use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::model::{DocId, Document};
use crate::query::rank_order;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(offset: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            offset: offset.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: DocId,
    pub original_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Literal match count; absent for plain listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub total: usize,
    pub hits: Vec<SearchHit>,
}

/// Rank documents by how many times any query term literally occurs in
/// their text (case-insensitive). Terms are regex-escaped, so arbitrary
/// user input is safe. A query with no terms lists every document, newest
/// first.
pub fn search_documents(documents: &[Document], query: &str, page: Page) -> SearchPage {
    let terms: Vec<String> = query.split_whitespace().map(regex::escape).collect();
    if terms.is_empty() {
        return list_documents(documents, page);
    }
    let pattern = match RegexBuilder::new(&terms.join("|")).case_insensitive(true).build() {
        Ok(re) => re,
        // escaped alternations only fail on size limits
        Err(e) => {
            tracing::warn!(error = %e, "search pattern rejected");
            return SearchPage { total: 0, hits: Vec::new() };
        }
    };

    let mut scored: Vec<(usize, &Document)> = documents
        .iter()
        .map(|doc| (pattern.find_iter(&doc.text).count(), doc))
        .filter(|(count, _)| *count > 0)
        .collect();
    scored.sort_by(|a, b| rank_order((a.0 as f64, a.1), (b.0 as f64, b.1)));

    let total = scored.len();
    let hits = scored
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .map(|(count, doc)| hit(doc, Some(count)))
        .collect();
    SearchPage { total, hits }
}

/// Newest-first listing of the whole collection.
pub fn list_documents(documents: &[Document], page: Page) -> SearchPage {
    let mut all: Vec<&Document> = documents.iter().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    SearchPage {
        total: all.len(),
        hits: all.into_iter().skip(page.offset).take(page.limit).map(|d| hit(d, None)).collect(),
    }
}

fn hit(doc: &Document, score: Option<usize>) -> SearchHit {
    SearchHit {
        id: doc.id.clone(),
        original_name: doc.original_name.clone(),
        created_at: doc.created_at,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{format_id, NewDocument};
    use time::Duration;

    fn doc(n: u64, text: &str, age_secs: i64) -> Document {
        let created = OffsetDateTime::UNIX_EPOCH + Duration::days(365) - Duration::seconds(age_secs);
        Document::new(format_id(n), NewDocument::new(format!("{n}.txt"), text), created)
    }

    #[test]
    fn counts_all_term_occurrences() {
        let docs = vec![doc(1, "React react REACT", 0), doc(2, "react and node", 0), doc(3, "java", 0)];
        let page = search_documents(&docs, "react node", Page::default());
        assert_eq!(page.total, 2);
        assert_eq!(page.hits[0].id, format_id(1));
        assert_eq!(page.hits[0].score, Some(3));
        assert_eq!(page.hits[1].score, Some(2));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let docs = vec![doc(1, "C++ and (Go)", 0), doc(2, "Ccc", 0)];
        let page = search_documents(&docs, "c++ (go) [", Page::default());
        assert_eq!(page.total, 1);
        assert_eq!(page.hits[0].score, Some(2));
    }

    #[test]
    fn ties_newest_then_id_and_pagination() {
        let docs = vec![doc(1, "rust", 5), doc(3, "rust", 0), doc(2, "rust", 0)];
        let all = search_documents(&docs, "rust", Page::default());
        let ids: Vec<_> = all.hits.iter().map(|h| h.id.clone()).collect();
        assert_eq!(ids, vec![format_id(2), format_id(3), format_id(1)]);

        let second = search_documents(&docs, "rust", Page::new(Some(1), Some(1)));
        assert_eq!(second.total, 3);
        assert_eq!(second.hits.len(), 1);
        assert_eq!(second.hits[0].id, format_id(3));
    }

    #[test]
    fn limit_capped() {
        assert_eq!(Page::new(None, Some(1000)).limit, MAX_LIMIT);
    }

    #[test]
    fn blank_query_lists_newest_first() {
        let docs = vec![doc(1, "a", 10), doc(2, "b", 0)];
        let page = search_documents(&docs, "   ", Page::default());
        assert_eq!(page.total, 2);
        assert_eq!(page.hits[0].id, format_id(2));
        assert_eq!(page.hits[0].score, None);
    }
}
