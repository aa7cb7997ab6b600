//! Requirement coverage scoring of candidate documents against a job.
//!
//! A requirement counts as satisfied when any of its keywords (ASCII words
//! longer than three characters) occurs anywhere in the candidate text.
//! Satisfied requirements contribute up to two supporting snippets each;
//! the rest are reported as missing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::model::{DocId, Document, JobPosting};
use crate::tokenizer::requirement_keywords;

pub const DEFAULT_TOP_N: usize = 5;
pub const MAX_TOP_N: usize = 50;
pub const MAX_EVIDENCE: usize = 5;
const EVIDENCE_PER_REQUIREMENT: usize = 2;

/// Outcome of matching one candidate against a requirement list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementMatch {
    pub score: f64,
    pub evidence: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub document_id: DocId,
    pub original_name: String,
    pub score: f64,
    pub evidence: Vec<String>,
    pub missing_requirements: Vec<String>,
}

pub fn match_requirements(requirements: &[String], text: &str, snippets: &[String]) -> RequirementMatch {
    let text_lower = text.to_lowercase();
    let mut evidence = Vec::new();
    let mut missing = Vec::new();

    for requirement in requirements {
        let keywords = requirement_keywords(requirement);
        let found = keywords.iter().any(|kw| text_lower.contains(kw.as_str()));
        if !found {
            missing.push(requirement.clone());
            continue;
        }
        let supporting = snippets
            .iter()
            .filter(|s| {
                let s = s.to_lowercase();
                keywords.iter().any(|kw| s.contains(kw.as_str()))
            })
            .take(EVIDENCE_PER_REQUIREMENT)
            .cloned();
        evidence.extend(supporting);
    }

    let score = if requirements.is_empty() {
        0.0
    } else {
        (requirements.len() - missing.len()) as f64 / requirements.len() as f64
    };

    RequirementMatch { score, evidence: dedup_capped(evidence, MAX_EVIDENCE), missing }
}

/// Score every document against `job` and return the best `top_n`.
///
/// `top_n` of `None` or zero falls back to [`DEFAULT_TOP_N`]; anything above
/// [`MAX_TOP_N`] is clamped. Ties keep collection order.
pub fn match_candidates(job: &JobPosting, documents: &[Document], top_n: Option<usize>) -> Vec<MatchResult> {
    let top_n = effective_top_n(top_n);
    let mut results: Vec<MatchResult> = documents
        .iter()
        .map(|doc| {
            let m = match_requirements(&job.requirements, &doc.text, &doc.snippets);
            MatchResult {
                document_id: doc.id.clone(),
                original_name: doc.original_name.clone(),
                score: m.score,
                evidence: m.evidence,
                missing_requirements: m.missing,
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_n);
    debug!(job_id = %job.id, candidates = documents.len(), returned = results.len(), "matched candidates");
    results
}

pub fn effective_top_n(top_n: Option<usize>) -> usize {
    match top_n {
        None | Some(0) => DEFAULT_TOP_N,
        Some(n) => n.min(MAX_TOP_N),
    }
}

fn dedup_capped(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|s| seen.insert(s.clone())).take(cap).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partial_coverage() {
        let requirements = reqs(&["must have React experience", "must know Node.js"]);
        let text = "Built dashboards in React and TypeScript.";
        let snippets = reqs(&["Built dashboards in React and TypeScript."]);
        let m = match_requirements(&requirements, text, &snippets);
        assert_eq!(m.missing, vec!["must know Node.js"]);
        assert_eq!(m.score, 0.5);
        assert_eq!(m.evidence, snippets);
    }

    #[test]
    fn no_requirements_scores_zero() {
        let m = match_requirements(&[], "anything", &[]);
        assert_eq!(m.score, 0.0);
        assert!(m.evidence.is_empty() && m.missing.is_empty());
    }

    #[test]
    fn short_word_requirement_is_always_missing() {
        let requirements = reqs(&["Go, C, Git"]);
        let m = match_requirements(&requirements, "go c git", &[]);
        assert_eq!(m.missing, requirements);
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn evidence_two_per_requirement_deduped_and_capped() {
        let snippets = reqs(&["rust one", "rust two", "rust three", "python one", "kafka one", "kafka two", "java one"]);
        let text = snippets.join(" ");
        let requirements = reqs(&["rust", "rust again", "python", "kafka", "java"]);
        let m = match_requirements(&requirements, &text, &snippets);
        assert_eq!(m.evidence, reqs(&["rust one", "rust two", "python one", "kafka one", "kafka two"]));
        assert!(m.missing.is_empty());
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn top_n_defaults_and_caps() {
        assert_eq!(effective_top_n(None), DEFAULT_TOP_N);
        assert_eq!(effective_top_n(Some(0)), DEFAULT_TOP_N);
        assert_eq!(effective_top_n(Some(7)), 7);
        assert_eq!(effective_top_n(Some(1000)), MAX_TOP_N);
    }
}
