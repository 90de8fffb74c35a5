//! Context reconstruction from the record store.

use crate::drift::{PrpStatus, decisions_after, major_drift_warnings};
use crate::error::CoreError;
use crate::render::render_context;
use driftlog_config::ContextConfig;
use driftlog_memory::{DecisionRecord, RecordStore, SessionSummary, Timestamp};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Windows and locations used when rebuilding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOptions {
    pub project_root: PathBuf,
    pub recent_decision_days: u32,
    pub drift_window_days: u32,
    pub summary_count: usize,
    /// Requirements document inspected for the status section.
    pub prp_path: PathBuf,
}

impl ContextOptions {
    /// Default windows with the requirements document at `<root>/prp.md`.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self::from_config(&ContextConfig::default(), project_root)
    }

    pub fn from_config(config: &ContextConfig, project_root: impl AsRef<Path>) -> Self {
        let project_root = project_root.as_ref().to_path_buf();
        Self {
            prp_path: config.resolve_prp_file(&project_root),
            recent_decision_days: config.recent_decision_days,
            drift_window_days: config.drift_window_days,
            summary_count: config.summary_count,
            project_root,
        }
    }
}

/// Everything the report is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSnapshot {
    pub retrieved_at: Timestamp,
    pub milestone: Option<String>,
    pub recent_decisions: Vec<DecisionRecord>,
    pub recent_summaries: Vec<SessionSummary>,
    pub prp_status: PrpStatus,
}

/// Rebuilds working context from persisted records.
#[derive(Clone)]
pub struct ContextReconstructor {
    store: Arc<dyn RecordStore>,
    options: ContextOptions,
}

impl ContextReconstructor {
    pub fn new(store: Arc<dyn RecordStore>, options: ContextOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Gather the report inputs as of `now`.
    pub fn snapshot_at(&self, now: Timestamp) -> Result<ContextSnapshot, CoreError> {
        let milestone = self.store.load_current_milestone()?;
        let recent_decisions = self.decisions_since(now, self.options.recent_decision_days)?;
        let recent_summaries = self
            .store
            .load_recent_summaries(self.options.summary_count)?;
        let prp_status = self.drift_status_at(now)?;
        debug!(
            "context snapshot (milestone={}, decisions={}, summaries={}, warnings={})",
            milestone.is_some(),
            recent_decisions.len(),
            recent_summaries.len(),
            prp_status.drift_warnings.len()
        );
        Ok(ContextSnapshot {
            retrieved_at: now,
            milestone,
            recent_decisions,
            recent_summaries,
            prp_status,
        })
    }

    /// Render a snapshot; no I/O.
    pub fn render(&self, snapshot: &ContextSnapshot) -> String {
        render_context(snapshot)
    }

    pub fn reconstruct_at(&self, now: Timestamp) -> Result<String, CoreError> {
        let snapshot = self.snapshot_at(now)?;
        Ok(self.render(&snapshot))
    }

    /// Build the report using the local clock.
    pub fn reconstruct(&self) -> Result<String, CoreError> {
        self.reconstruct_at(Timestamp::now())
    }

    /// Requirements document status with major drift from the drift window.
    pub fn drift_status_at(&self, now: Timestamp) -> Result<PrpStatus, CoreError> {
        let window = self.decisions_since(now, self.options.drift_window_days)?;
        let warnings = major_drift_warnings(&window);
        Ok(PrpStatus::inspect(&self.options.prp_path, warnings)?)
    }

    /// Reconstruct and write the report to `path`, creating parent directories.
    pub fn write_context_file(&self, path: &Path) -> Result<String, CoreError> {
        let report = self.reconstruct()?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &report)?;
        info!("context written (path={})", path.display());
        Ok(report)
    }

    fn decisions_since(&self, now: Timestamp, days: u32) -> Result<Vec<DecisionRecord>, CoreError> {
        let decisions = self.store.load_decisions()?;
        Ok(decisions_after(decisions, now.days_before(days)))
    }
}
