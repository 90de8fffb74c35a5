use driftlog_memory::{DecisionRecord, MemoryError, RecordStore, SessionSummary};
use parking_lot::Mutex;

/// Record store held in memory, newest summaries last in insertion order.
#[derive(Default)]
pub struct InMemoryRecordStore {
    decisions: Mutex<Vec<DecisionRecord>>,
    summaries: Mutex<Vec<SessionSummary>>,
    milestone: Mutex<Option<String>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_milestone(self, milestone: impl Into<String>) -> Self {
        *self.milestone.lock() = Some(milestone.into());
        self
    }

    pub fn decisions(&self) -> Vec<DecisionRecord> {
        self.decisions.lock().clone()
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.summaries.lock().clone()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load_decisions(&self) -> Result<Vec<DecisionRecord>, MemoryError> {
        Ok(self.decisions())
    }

    fn append_decision(&self, record: DecisionRecord) -> Result<(), MemoryError> {
        self.decisions.lock().insert(0, record);
        Ok(())
    }

    fn load_recent_summaries(&self, max_count: usize) -> Result<Vec<SessionSummary>, MemoryError> {
        Ok(self
            .summaries
            .lock()
            .iter()
            .rev()
            .take(max_count)
            .cloned()
            .collect())
    }

    fn load_current_milestone(&self) -> Result<Option<String>, MemoryError> {
        Ok(self.milestone.lock().clone())
    }

    fn save_summary(&self, summary: &SessionSummary) -> Result<(), MemoryError> {
        let mut summaries = self.summaries.lock();
        summaries.retain(|existing| existing.session_id != summary.session_id);
        summaries.push(summary.clone());
        Ok(())
    }
}
