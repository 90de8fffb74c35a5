//! Record store interface and the YAML file implementation.

use crate::error::MemoryError;
use crate::model::{DecisionRecord, DecisionsDocument, SessionSummary};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;

const DECISIONS_FILE: &str = "decisions.yaml";
const SUMMARIES_DIR: &str = "summaries";
const SESSION_PREFIX: &str = "session-";
const SESSION_SUFFIX: &str = ".yaml";
const MILESTONE_PREFIX: &str = "milestone-";
const MILESTONE_SUFFIX: &str = ".md";
const EMPTY_DECISIONS: &str = "decisions: []\n";

/// Storage for decisions, session summaries, and milestones.
///
/// Implementations re-read their backing storage on every call.
pub trait RecordStore: Send + Sync {
    /// Load all decisions, most recent first.
    fn load_decisions(&self) -> Result<Vec<DecisionRecord>, MemoryError>;

    /// Insert a decision at the head of the collection.
    fn append_decision(&self, record: DecisionRecord) -> Result<(), MemoryError>;

    /// Load up to `max_count` summaries, newest first.
    fn load_recent_summaries(&self, max_count: usize) -> Result<Vec<SessionSummary>, MemoryError>;

    /// Contents of the most recently modified milestone document.
    fn load_current_milestone(&self) -> Result<Option<String>, MemoryError>;

    /// Persist a summary, replacing any previous one with the same id.
    fn save_summary(&self, summary: &SessionSummary) -> Result<(), MemoryError>;
}

/// What `FileRecordStore::init` had to create.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    pub memory_dir: bool,
    pub summaries_dir: bool,
    pub decisions_file: bool,
}

/// YAML-backed store rooted at a memory directory.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    /// Root directory for records.
    root: PathBuf,
}

/// A listed document with its modification time.
#[derive(Debug)]
struct DocumentEntry {
    name: String,
    path: PathBuf,
    modified: SystemTime,
}

impl FileRecordStore {
    /// Create a store under `root`. Nothing is touched on disk until a write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root memory directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the decisions document.
    pub fn decisions_path(&self) -> PathBuf {
        self.root.join(DECISIONS_FILE)
    }

    /// Directory holding session summaries and milestones.
    pub fn summaries_dir(&self) -> PathBuf {
        self.root.join(SUMMARIES_DIR)
    }

    /// Path to the summary document for a session id.
    pub fn summary_path(&self, session_id: &str) -> Result<PathBuf, MemoryError> {
        validate_session_id(session_id)?;
        Ok(self
            .summaries_dir()
            .join(format!("{SESSION_PREFIX}{session_id}{SESSION_SUFFIX}")))
    }

    /// Create the directory layout and an empty decisions document.
    ///
    /// Existing files are left untouched.
    pub fn init(&self) -> Result<InitReport, MemoryError> {
        let mut report = InitReport::default();
        if !self.root.is_dir() {
            fs::create_dir_all(&self.root)?;
            report.memory_dir = true;
        }
        let summaries = self.summaries_dir();
        if !summaries.is_dir() {
            fs::create_dir_all(&summaries)?;
            report.summaries_dir = true;
        }
        let decisions = self.decisions_path();
        if !decisions.exists() {
            write_atomic(&decisions, EMPTY_DECISIONS)?;
            report.decisions_file = true;
        }
        info!(
            "initialized memory directory (root={}, created={:?})",
            self.root.display(),
            report
        );
        Ok(report)
    }

    /// Load one summary by session id.
    pub fn load_summary(&self, session_id: &str) -> Result<Option<SessionSummary>, MemoryError> {
        let path = self.summary_path(session_id)?;
        if !path.exists() {
            return Ok(None);
        }
        read_yaml(&path).map(Some)
    }

    /// List documents in the summaries directory, newest first.
    fn list_documents(&self, prefix: &str, suffix: &str) -> Result<Vec<DocumentEntry>, MemoryError> {
        let dir = self.summaries_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with(prefix) || !name.ends_with(suffix) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or_else(|err| {
                warn!("modification time unavailable (file={name}, err={err})");
                SystemTime::UNIX_EPOCH
            });
            entries.push(DocumentEntry {
                name,
                path: entry.path(),
                modified,
            });
        }
        entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
        Ok(entries)
    }
}

impl RecordStore for FileRecordStore {
    fn load_decisions(&self) -> Result<Vec<DecisionRecord>, MemoryError> {
        let path = self.decisions_path();
        if !path.exists() {
            debug!("decisions document missing (path={})", path.display());
            return Ok(Vec::new());
        }
        let document: DecisionsDocument = read_yaml(&path)?;
        debug!("loaded decisions (count={})", document.decisions.len());
        Ok(document.decisions)
    }

    /// Existing records are rewritten as they were read, keys and all.
    fn append_decision(&self, record: DecisionRecord) -> Result<(), MemoryError> {
        let path = self.decisions_path();
        let mut document: Mapping = if path.exists() {
            read_yaml(&path)?
        } else {
            Mapping::new()
        };
        let existing: DecisionsDocument =
            serde_yaml::from_value(Value::Mapping(document.clone())).map_err(|source| {
                MemoryError::Parse {
                    path: path.clone(),
                    source,
                }
            })?;
        debug!(
            "appending decision (context={}, existing={})",
            record.context,
            existing.decisions.len()
        );

        let entry = serde_yaml::to_value(&record).map_err(MemoryError::Serialize)?;
        match document
            .entry(Value::from("decisions"))
            .or_insert(Value::Sequence(Vec::new()))
        {
            Value::Sequence(decisions) => decisions.insert(0, entry),
            other => *other = Value::Sequence(vec![entry]),
        }
        let contents = serde_yaml::to_string(&document).map_err(MemoryError::Serialize)?;
        write_atomic(&path, &contents)?;
        info!("decision saved (path={})", path.display());
        Ok(())
    }

    fn load_recent_summaries(&self, max_count: usize) -> Result<Vec<SessionSummary>, MemoryError> {
        let entries = self.list_documents(SESSION_PREFIX, SESSION_SUFFIX)?;
        let mut summaries = Vec::new();
        for entry in entries.into_iter().take(max_count) {
            summaries.push(read_yaml(&entry.path)?);
        }
        debug!(
            "loaded recent summaries (requested={}, returned={})",
            max_count,
            summaries.len()
        );
        Ok(summaries)
    }

    fn load_current_milestone(&self) -> Result<Option<String>, MemoryError> {
        let entries = self.list_documents(MILESTONE_PREFIX, MILESTONE_SUFFIX)?;
        let Some(latest) = entries.into_iter().next() else {
            return Ok(None);
        };
        debug!("current milestone (file={})", latest.name);
        Ok(Some(fs::read_to_string(latest.path)?))
    }

    fn save_summary(&self, summary: &SessionSummary) -> Result<(), MemoryError> {
        let path = self.summary_path(&summary.session_id)?;
        let contents = serde_yaml::to_string(summary).map_err(MemoryError::Serialize)?;
        write_atomic(&path, &contents)?;
        info!(
            "session summary saved (session_id={}, path={})",
            summary.session_id,
            path.display()
        );
        Ok(())
    }
}

/// Reject ids that would escape the summaries directory.
fn validate_session_id(session_id: &str) -> Result<(), MemoryError> {
    let invalid = session_id.trim().is_empty()
        || session_id == "."
        || session_id == ".."
        || session_id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(MemoryError::InvalidSessionId(session_id.to_string()));
    }
    Ok(())
}

/// Read and decode a YAML document; empty documents decode as defaults.
fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, MemoryError> {
    let contents = fs::read_to_string(path)?;
    let source = if contents.trim().is_empty() {
        "{}"
    } else {
        contents.as_str()
    };
    serde_yaml::from_str(source).map_err(|source| MemoryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `contents` via a sibling temp file and rename.
///
/// The previous document stays intact if any step fails.
fn write_atomic(path: &Path, contents: &str) -> Result<(), MemoryError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| MemoryError::Io(err.error))?;
    Ok(())
}
