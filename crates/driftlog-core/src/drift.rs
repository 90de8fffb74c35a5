//! Requirements document status and major-drift warnings.

use driftlog_memory::{DecisionRecord, Timestamp};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A major drift decision surfaced for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftWarning {
    pub timestamp: Timestamp,
    pub context: String,
    pub impact: Vec<String>,
}

impl From<&DecisionRecord> for DriftWarning {
    fn from(record: &DecisionRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            context: record.context.clone(),
            impact: record.impact.clone(),
        }
    }
}

/// Presence and freshness of the requirements document, plus drift warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrpStatus {
    /// Location checked for the requirements document.
    pub path: PathBuf,
    pub found: bool,
    /// Modification time, when the document exists and the platform reports one.
    pub last_modified: Option<Timestamp>,
    pub drift_warnings: Vec<DriftWarning>,
}

impl PrpStatus {
    /// Check the requirements document at `path`.
    ///
    /// A missing document (or a directory in its place) is reported as not
    /// found; any other metadata failure is returned.
    pub fn inspect(path: &Path, drift_warnings: Vec<DriftWarning>) -> io::Result<Self> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => Some(metadata).filter(|metadata| metadata.is_file()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(err),
        };
        let found = metadata.is_some();
        let last_modified = metadata
            .and_then(|metadata| metadata.modified().ok())
            .map(Timestamp::from_system_time);
        debug!(
            "requirements document status (path={}, found={}, warnings={})",
            path.display(),
            found,
            drift_warnings.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            found,
            last_modified,
            drift_warnings,
        })
    }

    /// True when there is nothing to report.
    pub fn is_empty(&self) -> bool {
        !self.found && self.drift_warnings.is_empty()
    }
}

/// Decisions logged strictly after `cutoff`, in stored order.
pub fn decisions_after(decisions: Vec<DecisionRecord>, cutoff: Timestamp) -> Vec<DecisionRecord> {
    decisions
        .into_iter()
        .filter(|decision| decision.timestamp > cutoff)
        .collect()
}

/// Warnings for every major drift decision in `decisions`.
pub fn major_drift_warnings(decisions: &[DecisionRecord]) -> Vec<DriftWarning> {
    decisions
        .iter()
        .filter(|decision| decision.is_major_drift())
        .map(DriftWarning::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{PrpStatus, decisions_after, major_drift_warnings};
    use driftlog_memory::{DecisionRecord, Timestamp};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn at(value: &str) -> Timestamp {
        Timestamp::parse(value).expect("timestamp")
    }

    #[test]
    fn cutoff_is_exclusive() {
        let cutoff = at("2025-01-10T00:00:00");
        let decisions = vec![
            DecisionRecord::new("after", "x").with_timestamp(at("2025-01-10T00:00:00.000001")),
            DecisionRecord::new("equal", "x").with_timestamp(cutoff),
            DecisionRecord::new("before", "x").with_timestamp(at("2025-01-09T23:59:59")),
        ];
        let kept: Vec<String> = decisions_after(decisions, cutoff)
            .into_iter()
            .map(|decision| decision.context)
            .collect();
        assert_eq!(kept, vec!["after".to_string()]);
    }

    #[test]
    fn only_major_drift_becomes_a_warning() {
        let decisions = vec![
            DecisionRecord::new("db", "x")
                .with_drift_type("major")
                .with_impact(vec!["schema".to_string()]),
            DecisionRecord::new("ui", "x").with_drift_type("enhancement"),
            DecisionRecord::new("docs", "x"),
        ];
        let warnings = major_drift_warnings(&decisions);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].context, "db");
        assert_eq!(warnings[0].impact, vec!["schema".to_string()]);
    }

    #[test]
    fn missing_document_is_not_found() {
        let temp = tempdir().expect("tempdir");
        let status = PrpStatus::inspect(&temp.path().join("prp.md"), Vec::new()).expect("inspect");
        assert!(!status.found);
        assert_eq!(status.last_modified, None);
        assert!(status.is_empty());
    }

    #[test]
    fn present_document_reports_mtime() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("prp.md");
        std::fs::write(&path, "# Plan").expect("write");
        let status = PrpStatus::inspect(&path, Vec::new()).expect("inspect");
        assert!(status.found);
        assert!(status.last_modified.is_some());
        assert!(!status.is_empty());
    }

    #[test]
    fn directory_in_place_of_document_is_not_found() {
        let temp = tempdir().expect("tempdir");
        let status = PrpStatus::inspect(temp.path(), Vec::new()).expect("inspect");
        assert!(!status.found);
    }

    #[test]
    fn unreadable_location_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let blocker = temp.path().join("notes.txt");
        std::fs::write(&blocker, "not a directory").expect("write");
        let err = PrpStatus::inspect(&blocker.join("prp.md"), Vec::new()).unwrap_err();
        assert_ne!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
