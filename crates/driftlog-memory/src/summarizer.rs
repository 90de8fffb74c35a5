//! Session summary construction.

use crate::error::MemoryError;
use crate::model::{FileChange, SessionSummary};
use crate::store::RecordStore;
use crate::timestamp::Timestamp;
use log::debug;
use std::sync::Arc;

/// Builds session summaries and hands them to a record store.
#[derive(Clone)]
pub struct SessionSummarizer {
    store: Arc<dyn RecordStore>,
}

impl SessionSummarizer {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Build and persist a summary stamped with the current time.
    ///
    /// A repeated `session_id` replaces the earlier document.
    pub fn create_session_summary(
        &self,
        session_id: &str,
        changes: Vec<FileChange>,
        decisions: Vec<String>,
    ) -> Result<SessionSummary, MemoryError> {
        self.create_session_summary_at(session_id, changes, decisions, Timestamp::now())
    }

    /// Build and persist a summary with an explicit timestamp.
    pub fn create_session_summary_at(
        &self,
        session_id: &str,
        changes: Vec<FileChange>,
        decisions: Vec<String>,
        timestamp: Timestamp,
    ) -> Result<SessionSummary, MemoryError> {
        let summary = SessionSummary::new(session_id, timestamp, changes, decisions);
        debug!(
            "creating session summary (session_id={}, changes={}, decisions={})",
            summary.session_id,
            summary.changes.len(),
            summary.decisions.len()
        );
        self.store.save_summary(&summary)?;
        Ok(summary)
    }
}

/// Session id used when the user does not name the session.
pub fn default_session_id(now: Timestamp) -> String {
    now.format("%Y%m%d-%H%M")
}

#[cfg(test)]
mod tests {
    use super::default_session_id;
    use crate::Timestamp;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_session_id_uses_minute_resolution() {
        let now = Timestamp::parse("2025-06-01T14:07:59.5").expect("timestamp");
        assert_eq!(default_session_id(now), "20250601-1407");
    }
}
