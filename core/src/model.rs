use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::requirements::extract_requirements;
use crate::sentences::split_sentences;

pub type DocId = String;
pub type JobId = String;

pub const DEFAULT_UPLOADER: &str = "anonymous";

/// A stored resume. `snippets` is derived from `text` once, at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocId,
    pub original_name: String,
    pub text: String,
    pub snippets: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub uploaded_by: String,
}

impl Document {
    pub fn new(id: impl Into<DocId>, new: NewDocument, created_at: OffsetDateTime) -> Self {
        let snippets = split_sentences(&new.text);
        Self {
            id: id.into(),
            original_name: new.original_name,
            text: new.text,
            snippets,
            created_at,
            uploaded_by: new.uploaded_by.unwrap_or_else(|| DEFAULT_UPLOADER.to_string()),
        }
    }
}

/// Input for creating a document; text is already extracted plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub original_name: String,
    pub text: String,
    #[serde(default)]
    pub uploaded_by: Option<String>,
}

impl NewDocument {
    pub fn new(original_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { original_name: original_name.into(), text: text.into(), uploaded_by: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl JobPosting {
    pub fn new(id: impl Into<JobId>, title: impl Into<String>, description: impl Into<String>, created_at: OffsetDateTime) -> Self {
        let description = description.into();
        let requirements = extract_requirements(&description);
        Self { id: id.into(), title: title.into(), description, requirements, created_at }
    }
}

/// Ids are allocated from a monotonic counter and rendered fixed-width so
/// that string order follows allocation order.
pub fn format_id(n: u64) -> String {
    format!("{n:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_derives_snippets() {
        let doc = Document::new(format_id(1), NewDocument::new("a.txt", "One. Two!\n\nThree"), OffsetDateTime::UNIX_EPOCH);
        assert_eq!(doc.snippets, vec!["One.", "Two!", "Three"]);
        assert_eq!(doc.uploaded_by, DEFAULT_UPLOADER);
    }

    #[test]
    fn ids_sort_by_allocation() {
        assert!(format_id(9) < format_id(10));
        assert!(format_id(255) < format_id(4096));
    }
}
