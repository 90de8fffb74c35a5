//! Context reconstruction for driftlog.
//!
//! This crate owns the report assembled from recent decisions, session
//! summaries, milestones, and requirements drift, plus the workspace facade
//! the CLI uses to reach the record store.

pub mod context;
pub mod drift;
pub mod error;
pub mod render;
pub mod workspace;

/// Context reconstruction entry points.
pub use context::{ContextOptions, ContextReconstructor, ContextSnapshot};
/// Requirements document status and drift warnings.
pub use drift::{DriftWarning, PrpStatus};
pub use error::CoreError;
/// Pure report rendering.
pub use render::render_context;
pub use workspace::Workspace;
