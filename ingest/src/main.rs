use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resumerag_core::persist::{SledStore, StorePaths};
use resumerag_core::{NewDocument, Store};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputResume {
    #[serde(rename = "originalName", alias = "original_name", alias = "name")]
    original_name: String,
    text: String,
    #[serde(default, rename = "uploadedBy", alias = "uploaded_by")]
    uploaded_by: Option<String>,
}

impl From<InputResume> for NewDocument {
    fn from(r: InputResume) -> Self {
        NewDocument { original_name: r.original_name, text: r.text, uploaded_by: r.uploaded_by }
    }
}

#[derive(Debug, Deserialize)]
struct InputJob {
    title: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    resumes: Vec<InputResume>,
    #[serde(default)]
    jobs: Vec<InputJob>,
}

#[derive(Parser)]
#[command(name = "resumerag-ingest")]
#[command(about = "Load resumes and job postings into the resumerag store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load plain-text resumes (.txt/.md) and JSON/JSONL resume records from a file or directory
    Load {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Store data directory
        #[arg(long, default_value = "./data")]
        data: PathBuf,
        /// Uploader recorded on text-file resumes
        #[arg(long)]
        uploaded_by: Option<String>,
        /// Delete existing documents and jobs first
        #[arg(long, default_value_t = false)]
        reset: bool,
    },
    /// Load a seed file of the form {"resumes": [...], "jobs": [...]}
    Seed {
        #[arg(long, default_value = "./seed/seed.json")]
        file: PathBuf,
        #[arg(long, default_value = "./data")]
        data: PathBuf,
        #[arg(long, default_value_t = false)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Load { input, data, uploaded_by, reset } => {
            let store = open_store(&data, reset)?;
            let n = load_path(&store, &input, uploaded_by.as_deref())?;
            store.flush()?;
            tracing::info!(documents = n, input = %input.display(), "load complete");
        }
        Commands::Seed { file, data, reset } => {
            let store = open_store(&data, reset)?;
            let (resumes, jobs) = load_seed(&store, &file)?;
            store.flush()?;
            tracing::info!(resumes, jobs, "seeding complete");
        }
    }
    Ok(())
}

fn open_store(data: &Path, reset: bool) -> Result<SledStore> {
    let store = SledStore::open(&StorePaths::new(data))?;
    if reset {
        store.clear()?;
        tracing::info!("cleared existing documents and jobs");
    }
    Ok(store)
}

#[derive(Debug, PartialEq)]
enum FileKind {
    Text,
    Json,
    Jsonl,
    /// Needs an external converter before it can be ingested.
    Binary,
    Other,
}

fn file_kind(path: &Path) -> FileKind {
    let ext = path.extension().and_then(|s| s.to_str()).map(str::to_lowercase);
    match ext.as_deref() {
        Some("txt" | "md") => FileKind::Text,
        Some("json") => FileKind::Json,
        Some("jsonl") => FileKind::Jsonl,
        Some("pdf" | "docx" | "doc" | "zip") => FileKind::Binary,
        _ => FileKind::Other,
    }
}

fn load_path(store: &dyn Store, input: &Path, uploaded_by: Option<&str>) -> Result<usize> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            if entry.path().is_file() {
                files.push(entry.path().to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input {} does not exist", input.display());
    }

    let mut stored = 0;
    for file in files {
        stored += match file_kind(&file) {
            FileKind::Text => load_text(store, &file, uploaded_by)?,
            FileKind::Json => load_json(store, &file)?,
            FileKind::Jsonl => load_jsonl(store, &file)?,
            FileKind::Binary => {
                tracing::warn!(file = %file.display(), "skipping binary file; convert it to text first");
                0
            }
            FileKind::Other => {
                tracing::debug!(file = %file.display(), "skipping unsupported file");
                0
            }
        };
    }
    Ok(stored)
}

fn load_text(store: &dyn Store, file: &Path, uploaded_by: Option<&str>) -> Result<usize> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let original_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let doc = store.create_document(NewDocument {
        original_name,
        text,
        uploaded_by: uploaded_by.map(str::to_string),
    })?;
    tracing::debug!(id = %doc.id, file = %file.display(), snippets = doc.snippets.len(), "resume stored");
    Ok(1)
}

fn load_json(store: &dyn Store, file: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let records: Vec<InputResume> = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    store_all(store, records)
}

fn load_jsonl(store: &dyn Store, file: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(file)?);
    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: InputResume = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        records.push(record);
    }
    store_all(store, records)
}

fn store_all(store: &dyn Store, records: Vec<InputResume>) -> Result<usize> {
    let n = records.len();
    for record in records {
        store.create_document(record.into())?;
    }
    Ok(n)
}

fn load_seed(store: &dyn Store, file: &Path) -> Result<(usize, usize)> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening seed file {}", file.display()))?);
    let seed: SeedFile = serde_json::from_reader(reader)?;
    let resumes = store_all(store, seed.resumes)?;
    for job in &seed.jobs {
        let created = store.create_job(&job.title, &job.description)?;
        tracing::info!(id = %created.id, title = %created.title, requirements = created.requirements.len(), "job seeded");
    }
    Ok((resumes, seed.jobs.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumerag_core::MemoryStore;
    use tempfile::tempdir;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(file_kind(Path::new("a/CV.TXT")), FileKind::Text);
        assert_eq!(file_kind(Path::new("bundle.zip")), FileKind::Binary);
        assert_eq!(file_kind(Path::new("r.jsonl")), FileKind::Jsonl);
        assert_eq!(file_kind(Path::new("noext")), FileKind::Other);
    }

    #[test]
    fn loads_directory_of_mixed_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("alice.txt"), "Rust engineer.\nLoves Tokio.").unwrap();
        fs::write(dir.path().join("bob.pdf"), [0x25, 0x50, 0x44, 0x46]).unwrap();
        fs::write(
            dir.path().join("batch.jsonl"),
            "{\"originalName\":\"carol.txt\",\"text\":\"Go developer\"}\n\n{\"name\":\"dan\",\"text\":\"Java\"}\n",
        )
        .unwrap();
        fs::write(dir.path().join("one.json"), "{\"original_name\":\"erin.txt\",\"text\":\"SQL\"}").unwrap();

        let store = MemoryStore::new();
        let n = load_path(&store, dir.path(), Some("hr")).unwrap();
        assert_eq!(n, 4);
        let docs = store.list_documents().unwrap();
        let alice = docs.iter().find(|d| d.original_name == "alice.txt").unwrap();
        assert_eq!(alice.snippets, vec!["Rust engineer.", "Loves Tokio."]);
        assert_eq!(alice.uploaded_by, "hr");
        assert!(docs.iter().any(|d| d.original_name == "dan" && d.uploaded_by == "anonymous"));
    }

    #[test]
    fn seeds_resumes_and_jobs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("seed.json");
        fs::write(
            &file,
            r#"{"resumes":[{"name":"Alice","text":"React developer"}],
                "jobs":[{"title":"FE","description":"Must know React. Snacks."}]}"#,
        )
        .unwrap();
        let store = MemoryStore::new();
        assert_eq!(load_seed(&store, &file).unwrap(), (1, 1));
        assert_eq!(store.list_jobs().unwrap()[0].requirements, vec!["Must know React."]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let store = MemoryStore::new();
        assert!(load_path(&store, Path::new("/definitely/not/here"), None).is_err());
    }
}
