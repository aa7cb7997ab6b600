use anyhow::Result;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

use crate::model::{format_id, Document, JobPosting, NewDocument};

/// Document and job persistence. Creation derives snippets/requirements;
/// listings return records in allocation order.
pub trait Store: Send + Sync {
    fn create_document(&self, new: NewDocument) -> Result<Document>;
    fn get_document(&self, id: &str) -> Result<Option<Document>>;
    fn list_documents(&self) -> Result<Vec<Document>>;

    fn create_job(&self, title: &str, description: &str) -> Result<JobPosting>;
    fn get_job(&self, id: &str) -> Result<Option<JobPosting>>;
    fn list_jobs(&self) -> Result<Vec<JobPosting>>;
}

/// Process-local store, for tests and `--memory` runs.
#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicU64,
    documents: RwLock<Vec<Document>>,
    jobs: RwLock<Vec<JobPosting>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> String {
        format_id(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl Store for MemoryStore {
    fn create_document(&self, new: NewDocument) -> Result<Document> {
        let doc = Document::new(self.allocate_id(), new, OffsetDateTime::now_utc());
        self.documents.write().push(doc.clone());
        Ok(doc)
    }

    fn get_document(&self, id: &str) -> Result<Option<Document>> {
        Ok(self.documents.read().iter().find(|d| d.id == id).cloned())
    }

    fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.read().clone())
    }

    fn create_job(&self, title: &str, description: &str) -> Result<JobPosting> {
        let job = JobPosting::new(self.allocate_id(), title, description, OffsetDateTime::now_utc());
        self.jobs.write().push(job.clone());
        Ok(job)
    }

    fn get_job(&self, id: &str) -> Result<Option<JobPosting>> {
        Ok(self.jobs.read().iter().find(|j| j.id == id).cloned())
    }

    fn list_jobs(&self) -> Result<Vec<JobPosting>> {
        Ok(self.jobs.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        let a = store.create_document(NewDocument::new("a.txt", "Rust. Go.")).unwrap();
        let b = store.create_document(NewDocument::new("b.txt", "Java")).unwrap();
        assert!(a.id < b.id);
        assert_eq!(store.get_document(&a.id).unwrap().unwrap().snippets, vec!["Rust.", "Go."]);
        assert!(store.get_document("nope").unwrap().is_none());
        assert_eq!(store.list_documents().unwrap().len(), 2);

        let job = store.create_job("Backend", "Must know Rust. Free lunch.").unwrap();
        assert_eq!(job.requirements, vec!["Must know Rust."]);
        assert_eq!(store.get_job(&job.id).unwrap(), Some(job));
    }
}
