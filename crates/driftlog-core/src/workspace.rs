//! Project workspace: resolved config plus the record store it points at.

use crate::context::{ContextOptions, ContextReconstructor};
use crate::error::CoreError;
use driftlog_config::{DriftlogConfig, LayeredConfig, LayeredConfigOptions};
use driftlog_memory::{FileRecordStore, InitReport, RecordStore, SessionSummarizer};
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A project root with its effective configuration.
#[derive(Debug, Clone)]
pub struct Workspace {
    project_root: PathBuf,
    config: DriftlogConfig,
    store: Arc<FileRecordStore>,
}

impl Workspace {
    /// Open a workspace rooted at `project_root` with an explicit config.
    pub fn new(project_root: impl AsRef<Path>, config: DriftlogConfig) -> Self {
        let project_root = project_root.as_ref().to_path_buf();
        let store = Arc::new(FileRecordStore::new(config.memory.resolve_dir(&project_root)));
        Self {
            project_root,
            config,
            store,
        }
    }

    /// Load layered config and open the workspace it describes.
    ///
    /// `project_root` wins over the detected root; the cwd is the last resort.
    pub fn discover(
        options: LayeredConfigOptions,
        project_root: Option<PathBuf>,
    ) -> Result<Self, CoreError> {
        let cwd = options.cwd.clone();
        let LayeredConfig {
            config,
            layers,
            project_root: detected,
        } = DriftlogConfig::load_layered_with_options(options)?;
        let root = project_root.or(detected).unwrap_or(cwd);
        debug!(
            "workspace discovered (root={}, layers={})",
            root.display(),
            layers.len()
        );
        Ok(Self::new(root, config))
    }

    /// Replace the memory directory, resolved against the project root.
    pub fn with_memory_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.memory.dir = dir.into();
        self.store = Arc::new(FileRecordStore::new(
            self.config.memory.resolve_dir(&self.project_root),
        ));
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &DriftlogConfig {
        &self.config
    }

    pub fn memory_dir(&self) -> &Path {
        self.store.root()
    }

    pub fn store(&self) -> &FileRecordStore {
        &self.store
    }

    /// The store behind the `RecordStore` seam.
    pub fn record_store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    pub fn reconstructor(&self) -> ContextReconstructor {
        let options = ContextOptions::from_config(&self.config.context, &self.project_root);
        ContextReconstructor::new(self.record_store(), options)
    }

    pub fn summarizer(&self) -> SessionSummarizer {
        SessionSummarizer::new(self.record_store())
    }

    /// Create the memory layout.
    pub fn init(&self) -> Result<InitReport, CoreError> {
        Ok(self.store.init()?)
    }

    /// Default destination for the regenerated context report.
    pub fn context_output_path(&self) -> PathBuf {
        self.config.context.resolve_output_file(&self.project_root)
    }

    /// Requirements document location.
    pub fn prp_path(&self) -> PathBuf {
        self.config.context.resolve_prp_file(&self.project_root)
    }
}

#[cfg(test)]
mod tests {
    use super::Workspace;
    use driftlog_config::{DriftlogConfig, LayeredConfigOptions};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn paths_follow_config() {
        let temp = tempdir().expect("tempdir");
        let workspace = Workspace::new(temp.path(), DriftlogConfig::default());
        assert_eq!(workspace.memory_dir(), temp.path().join(".driftlog"));
        assert_eq!(
            workspace.context_output_path(),
            temp.path().join("current_context.md")
        );
        assert_eq!(workspace.prp_path(), temp.path().join("prp.md"));

        let moved = workspace.with_memory_dir("notes/memory");
        assert_eq!(moved.memory_dir(), temp.path().join("notes/memory"));
    }

    #[test]
    fn discover_prefers_explicit_root() {
        let temp = tempdir().expect("tempdir");
        let project = temp.path().join("project");
        fs::create_dir_all(project.join(".git")).expect("git");
        fs::write(
            project.join("driftlog.json5"),
            "{ memory: { dir: \"mem\" } }",
        )
        .expect("config");

        let mut options = LayeredConfigOptions::new(&project);
        options.user_config_path = None;
        let workspace = Workspace::discover(options, None).expect("workspace");
        assert_eq!(workspace.config().memory.dir, "mem");
        assert!(workspace.memory_dir().ends_with("mem"));

        let other = temp.path().join("elsewhere");
        let mut options = LayeredConfigOptions::new(&project);
        options.user_config_path = None;
        let workspace = Workspace::discover(options, Some(other.clone())).expect("workspace");
        assert_eq!(workspace.project_root(), other.as_path());
    }

    #[test]
    fn init_creates_layout() {
        let temp = tempdir().expect("tempdir");
        let workspace = Workspace::new(temp.path(), DriftlogConfig::default());
        let report = workspace.init().expect("init");
        assert!(report.memory_dir);
        assert!(workspace.store().decisions_path().exists());
    }
}
