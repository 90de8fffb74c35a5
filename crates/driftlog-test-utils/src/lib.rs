//! Test helpers shared across driftlog crates.

pub mod fixtures;
pub mod graph;
pub mod store;

pub use fixtures::{MemoryFixture, decision_days_ago, set_age};
pub use graph::{RecordingIndexer, StubEmbedder};
pub use store::InMemoryRecordStore;
