//! Decision and session-summary persistence for driftlog.

pub mod error;
pub mod model;
pub mod store;
pub mod summarizer;
pub mod timestamp;

/// Memory error type.
pub use error::MemoryError;
/// Persisted record models.
pub use model::{DecisionRecord, DriftType, FileChange, SessionSummary};
/// Record store interface and default file implementation.
pub use store::{FileRecordStore, InitReport, RecordStore};
/// Session summary construction.
pub use summarizer::{SessionSummarizer, default_session_id};
/// Local wall-clock timestamp used by records.
pub use timestamp::{Timestamp, TimestampError};
