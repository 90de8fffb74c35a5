//! Record models persisted by the store.

use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Drift classification for a decision.
///
/// Tags match exactly; anything else is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DriftType {
    /// Deviation large enough to surface as a warning.
    Major,
    /// Improvement on the original plan.
    Enhancement,
    /// Any other tag.
    Other(String),
}

impl DriftType {
    /// Tag as written to disk.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Major => "major",
            Self::Enhancement => "enhancement",
            Self::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_major(&self) -> bool {
        matches!(self, Self::Major)
    }
}

impl From<&str> for DriftType {
    fn from(value: &str) -> Self {
        match value {
            "major" => Self::Major,
            "enhancement" => Self::Enhancement,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl From<String> for DriftType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<DriftType> for String {
    fn from(value: DriftType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DriftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logged architectural or implementation decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionRecord {
    /// When the decision was logged.
    pub timestamp: Timestamp,
    /// Subject of the decision.
    pub context: String,
    /// Originally planned behaviour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prp_requirement: Option<String>,
    /// What was actually built.
    pub actual_implementation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_type: Option<DriftType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// Affected areas, in the order given.
    #[serde(default)]
    pub impact: Vec<String>,
    #[serde(default)]
    pub approved: bool,
}

impl DecisionRecord {
    /// Create an unapproved decision stamped with the current time.
    pub fn new(context: impl Into<String>, actual_implementation: impl Into<String>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            context: context.into(),
            prp_requirement: None,
            actual_implementation: actual_implementation.into(),
            drift_type: None,
            rationale: None,
            impact: Vec::new(),
            approved: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_prp_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.prp_requirement = Some(requirement.into());
        self
    }

    pub fn with_drift_type(mut self, drift_type: impl Into<DriftType>) -> Self {
        self.drift_type = Some(drift_type.into());
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn with_impact(mut self, impact: Vec<String>) -> Self {
        self.impact = impact;
        self
    }

    pub fn approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    /// True when the decision carries `major` drift.
    pub fn is_major_drift(&self) -> bool {
        self.drift_type.as_ref().is_some_and(DriftType::is_major)
    }
}

/// One file touched during a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileChange {
    pub file: String,
    pub change: String,
}

impl FileChange {
    pub fn new(file: impl Into<String>, change: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            change: change.into(),
        }
    }
}

/// Immutable record of one work session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    pub session_id: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub changes: Vec<FileChange>,
    #[serde(default)]
    pub decisions: Vec<String>,
    /// Unique files from `changes`.
    #[serde(default)]
    pub files_modified: BTreeSet<String>,
}

impl SessionSummary {
    /// Build a summary, deriving `files_modified` from `changes`.
    pub fn new(
        session_id: impl Into<String>,
        timestamp: Timestamp,
        changes: Vec<FileChange>,
        decisions: Vec<String>,
    ) -> Self {
        let files_modified = changes.iter().map(|change| change.file.clone()).collect();
        Self {
            session_id: session_id.into(),
            timestamp,
            changes,
            decisions,
            files_modified,
        }
    }
}

/// On-disk shape of `decisions.yaml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct DecisionsDocument {
    #[serde(default)]
    pub(crate) decisions: Vec<DecisionRecord>,
}

#[cfg(test)]
mod tests {
    use super::{DecisionRecord, DriftType, FileChange, SessionSummary};
    use crate::Timestamp;
    use pretty_assertions::assert_eq;

    #[test]
    fn drift_type_matches_exactly() {
        assert_eq!(DriftType::from("major"), DriftType::Major);
        assert_eq!(DriftType::from("enhancement"), DriftType::Enhancement);
        assert_eq!(DriftType::from("MAJOR"), DriftType::Other("MAJOR".to_string()));
        assert!(!DriftType::from("MAJOR").is_major());
        assert_eq!(DriftType::from(" major").as_str(), " major");
        assert_eq!(
            DriftType::from("Scope-Cut"),
            DriftType::Other("Scope-Cut".to_string())
        );
        assert_eq!(DriftType::from("Scope-Cut").as_str(), "Scope-Cut");
    }

    #[test]
    fn decision_omits_absent_optionals_in_yaml() {
        let timestamp = Timestamp::parse("2025-01-02T03:04:05").expect("timestamp");
        let record = DecisionRecord::new("auth", "JWT")
            .with_timestamp(timestamp)
            .with_drift_type("enhancement")
            .approved(true);
        let yaml = serde_yaml::to_string(&record).expect("yaml");
        assert!(!yaml.contains("rationale"));
        assert!(!yaml.contains("prp_requirement"));
        assert!(yaml.contains("drift_type: enhancement"));
        let decoded: DecisionRecord = serde_yaml::from_str(&yaml).expect("decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn decision_defaults_impact_and_approval() {
        let yaml = "timestamp: 2025-01-02T03:04:05\ncontext: db\nactual_implementation: sqlite\n";
        let decoded: DecisionRecord = serde_yaml::from_str(yaml).expect("decode");
        assert_eq!(decoded.impact, Vec::<String>::new());
        assert!(!decoded.approved);
        assert_eq!(decoded.drift_type, None);
    }

    #[test]
    fn summary_dedupes_modified_files() {
        let summary = SessionSummary::new(
            "s1",
            Timestamp::now(),
            vec![
                FileChange::new("b.rs", "one"),
                FileChange::new("a.rs", "two"),
                FileChange::new("b.rs", "three"),
            ],
            Vec::new(),
        );
        let files: Vec<&str> = summary.files_modified.iter().map(String::as_str).collect();
        assert_eq!(files, vec!["a.rs", "b.rs"]);
    }
}
