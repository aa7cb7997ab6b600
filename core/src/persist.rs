use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::{format_id, Document, JobPosting, NewDocument};
use crate::store::Store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corrupt record {key} in tree {tree}")]
    Corrupt {
        tree: &'static str,
        key: String,
        #[source]
        source: bincode::Error,
    },
}

pub struct StorePaths {
    pub root: PathBuf,
}

impl StorePaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn db(&self) -> PathBuf { self.root.join("resumerag.sled") }
}

const DOCUMENTS: &str = "documents";
const JOBS: &str = "jobs";

/// sled-backed store. Records are bincode values keyed by their id; ids
/// come from `Db::generate_id`, so key order is creation order.
pub struct SledStore {
    db: sled::Db,
    documents: sled::Tree,
    jobs: sled::Tree,
}

impl SledStore {
    pub fn open(paths: &StorePaths) -> Result<Self> {
        std::fs::create_dir_all(&paths.root)?;
        let db = sled::open(paths.db()).with_context(|| format!("opening store at {}", paths.root.display()))?;
        let documents = db.open_tree(DOCUMENTS)?;
        let jobs = db.open_tree(JOBS)?;
        tracing::info!(root = %paths.root.display(), documents = documents.len(), jobs = jobs.len(), "store opened");
        Ok(Self { db, documents, jobs })
    }

    /// Drop every document and job.
    pub fn clear(&self) -> Result<()> {
        self.documents.clear()?;
        self.jobs.clear()?;
        self.db.flush()?;
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    fn allocate_id(&self) -> Result<String> {
        // generate_id starts at 0; keep ids non-zero like the memory store
        Ok(format_id(self.db.generate_id()? + 1))
    }
}

fn put<T: Serialize>(tree: &sled::Tree, key: &str, value: &T) -> Result<()> {
    let bytes = bincode::serialize(value)?;
    tree.insert(key.as_bytes(), bytes)?;
    Ok(())
}

fn decode<T: DeserializeOwned>(tree_name: &'static str, key: &[u8], bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|source| {
        StoreError::Corrupt { tree: tree_name, key: String::from_utf8_lossy(key).into_owned(), source }.into()
    })
}

fn get<T: DeserializeOwned>(tree: &sled::Tree, tree_name: &'static str, key: &str) -> Result<Option<T>> {
    match tree.get(key.as_bytes())? {
        Some(bytes) => Ok(Some(decode(tree_name, key.as_bytes(), &bytes)?)),
        None => Ok(None),
    }
}

fn scan<T: DeserializeOwned>(tree: &sled::Tree, tree_name: &'static str) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(tree.len());
    for entry in tree.iter() {
        let (key, bytes) = entry?;
        out.push(decode(tree_name, &key, &bytes)?);
    }
    Ok(out)
}

impl Store for SledStore {
    fn create_document(&self, new: NewDocument) -> Result<Document> {
        let doc = Document::new(self.allocate_id()?, new, OffsetDateTime::now_utc());
        put(&self.documents, &doc.id, &doc)?;
        tracing::debug!(id = %doc.id, name = %doc.original_name, snippets = doc.snippets.len(), "document stored");
        Ok(doc)
    }

    fn get_document(&self, id: &str) -> Result<Option<Document>> {
        get(&self.documents, DOCUMENTS, id)
    }

    fn list_documents(&self) -> Result<Vec<Document>> {
        scan(&self.documents, DOCUMENTS)
    }

    fn create_job(&self, title: &str, description: &str) -> Result<JobPosting> {
        let job = JobPosting::new(self.allocate_id()?, title, description, OffsetDateTime::now_utc());
        put(&self.jobs, &job.id, &job)?;
        tracing::debug!(id = %job.id, requirements = job.requirements.len(), "job stored");
        Ok(job)
    }

    fn get_job(&self, id: &str) -> Result<Option<JobPosting>> {
        get(&self.jobs, JOBS, id)
    }

    fn list_jobs(&self) -> Result<Vec<JobPosting>> {
        scan(&self.jobs, JOBS)
    }
}
