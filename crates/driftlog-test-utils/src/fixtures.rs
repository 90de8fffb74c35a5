use driftlog_memory::{DecisionRecord, FileRecordStore, RecordStore, SessionSummary, Timestamp};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Backdate a file's modification time by `age`.
pub fn set_age(path: &Path, age: Duration) {
    let modified = SystemTime::now() - age;
    File::options()
        .write(true)
        .open(path)
        .expect("open for mtime")
        .set_modified(modified)
        .expect("set mtime");
}

/// A decision stamped `days` before `now`.
pub fn decision_days_ago(now: Timestamp, days: u32, context: &str) -> DecisionRecord {
    DecisionRecord::new(context, format!("{context} implementation"))
        .with_timestamp(now.days_before(days))
}

/// Temporary project with a memory directory inside it.
pub struct MemoryFixture {
    _temp: TempDir,
    project_root: PathBuf,
    memory_dir: PathBuf,
}

impl MemoryFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("tempdir");
        let project_root = temp.path().to_path_buf();
        let memory_dir = project_root.join(".driftlog");
        Self {
            _temp: temp,
            project_root,
            memory_dir,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn memory_dir(&self) -> &Path {
        &self.memory_dir
    }

    pub fn store(&self) -> FileRecordStore {
        FileRecordStore::new(&self.memory_dir)
    }

    /// Persist decisions so they load back in the given order.
    pub fn write_decisions(&self, decisions: &[DecisionRecord]) {
        let store = self.store();
        for decision in decisions.iter().rev() {
            store.append_decision(decision.clone()).expect("append decision");
        }
    }

    /// Overwrite the decisions document with raw text.
    pub fn write_raw_decisions(&self, contents: &str) -> PathBuf {
        fs::create_dir_all(&self.memory_dir).expect("memory dir");
        let path = self.memory_dir.join("decisions.yaml");
        fs::write(&path, contents).expect("write decisions");
        path
    }

    /// Save a summary and backdate its document by `age_minutes`.
    pub fn write_summary(&self, summary: &SessionSummary, age_minutes: u64) -> PathBuf {
        let store = self.store();
        store.save_summary(summary).expect("save summary");
        let path = store
            .summary_path(&summary.session_id)
            .expect("summary path");
        set_age(&path, Duration::from_secs(age_minutes * 60));
        path
    }

    /// Write `summaries/milestone-<name>.md` aged by `age_days`.
    pub fn write_milestone(&self, name: &str, contents: &str, age_days: u32) -> PathBuf {
        let dir = self.memory_dir.join("summaries");
        fs::create_dir_all(&dir).expect("summaries dir");
        let path = dir.join(format!("milestone-{name}.md"));
        fs::write(&path, contents).expect("write milestone");
        set_age(&path, DAY * age_days);
        path
    }

    /// Write the requirements document at the project root.
    pub fn write_prp(&self, contents: &str) -> PathBuf {
        let path = self.project_root.join("prp.md");
        fs::write(&path, contents).expect("write prp");
        path
    }
}

impl Default for MemoryFixture {
    fn default() -> Self {
        Self::new()
    }
}
