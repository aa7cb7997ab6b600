//! Resume ingestion and job matching: sentence snippets, PII redaction,
//! requirement extraction, keyword coverage scoring and tf-idf search.
//!
//! Everything outside [`persist`] and [`store`] is a pure function of its
//! arguments; indices are rebuilt from the live collection on every call.

pub mod index;
pub mod matcher;
pub mod model;
pub mod persist;
pub mod query;
pub mod redact;
pub mod requirements;
pub mod search;
pub mod sentences;
pub mod store;
pub mod tokenizer;

pub use index::{build_index, cosine, TermWeightMap};
pub use matcher::{match_candidates, match_requirements, MatchResult, RequirementMatch};
pub use model::{DocId, Document, JobId, JobPosting, NewDocument};
pub use query::{query, similar_documents, QueryResult, SimilarDocument};
pub use redact::redact;
pub use requirements::extract_requirements;
pub use search::{list_documents, search_documents, Page, SearchHit, SearchPage};
pub use sentences::split_sentences;
pub use store::{MemoryStore, Store};
