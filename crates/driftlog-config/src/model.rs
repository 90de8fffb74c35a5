//! Configuration schema for driftlog.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root config for driftlog.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DriftlogConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

impl DriftlogConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> DriftlogConfigBuilder {
        DriftlogConfigBuilder::new()
    }
}

/// Builder for assembling a `DriftlogConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct DriftlogConfigBuilder {
    config: DriftlogConfig,
}

impl DriftlogConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: DriftlogConfig::default(),
        }
    }

    /// Replace the memory directory configuration.
    pub fn memory(mut self, memory: MemoryConfig) -> Self {
        self.config.memory = memory;
        self
    }

    /// Replace the context reconstruction configuration.
    pub fn context(mut self, context: ContextConfig) -> Self {
        self.config.context = context;
        self
    }

    /// Replace the graph backend configuration.
    pub fn graph(mut self, graph: GraphConfig) -> Self {
        self.config.graph = graph;
        self
    }

    /// Finalize and return the built `DriftlogConfig`.
    pub fn build(self) -> DriftlogConfig {
        self.config
    }
}

/// Location of the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryConfig {
    /// Memory directory, relative paths resolve against the project root.
    #[serde(default = "default_memory_dir")]
    pub dir: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            dir: default_memory_dir(),
        }
    }
}

impl MemoryConfig {
    /// Resolve the memory directory against a project root.
    pub fn resolve_dir(&self, project_root: &Path) -> PathBuf {
        resolve_against(project_root, &self.dir)
    }
}

/// Default memory directory name.
fn default_memory_dir() -> String {
    ".driftlog".to_string()
}

/// Windows and limits used when rebuilding context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextConfig {
    /// Decisions newer than this many days are listed in the report.
    #[serde(default = "default_recent_decision_days")]
    pub recent_decision_days: u32,
    /// Major drift decisions newer than this many days raise warnings.
    #[serde(default = "default_drift_window_days")]
    pub drift_window_days: u32,
    /// Maximum number of session summaries in the report.
    #[serde(default = "default_summary_count")]
    pub summary_count: usize,
    /// Requirements document checked for presence and freshness.
    #[serde(default = "default_prp_file")]
    pub prp_file: String,
    /// File the CLI writes a regenerated report to.
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            recent_decision_days: default_recent_decision_days(),
            drift_window_days: default_drift_window_days(),
            summary_count: default_summary_count(),
            prp_file: default_prp_file(),
            output_file: default_output_file(),
        }
    }
}

impl ContextConfig {
    /// Resolve the requirements document path against a project root.
    pub fn resolve_prp_file(&self, project_root: &Path) -> PathBuf {
        resolve_against(project_root, &self.prp_file)
    }

    /// Resolve the context output path against a project root.
    pub fn resolve_output_file(&self, project_root: &Path) -> PathBuf {
        resolve_against(project_root, &self.output_file)
    }
}

fn default_recent_decision_days() -> u32 {
    7
}

fn default_drift_window_days() -> u32 {
    30
}

fn default_summary_count() -> usize {
    5
}

fn default_prp_file() -> String {
    "prp.md".to_string()
}

fn default_output_file() -> String {
    "current_context.md".to_string()
}

/// Graph database connection used by the semantic indexer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphConfig {
    /// HTTP endpoint of the Neo4j server.
    #[serde(default = "default_graph_uri")]
    pub uri: String,
    #[serde(default = "default_graph_database")]
    pub database: String,
    #[serde(default = "default_graph_user")]
    pub user: String,
    #[serde(default = "default_graph_password")]
    pub password: String,
    /// Optional `KEY=VALUE` file with credential overrides.
    #[serde(default = "default_graph_env_file")]
    pub env_file: Option<String>,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: default_graph_uri(),
            database: default_graph_database(),
            user: default_graph_user(),
            password: default_graph_password(),
            env_file: default_graph_env_file(),
            embedding: EmbeddingConfig::default(),
        }
    }
}

fn default_graph_uri() -> String {
    "http://localhost:7474".to_string()
}

fn default_graph_database() -> String {
    "neo4j".to_string()
}

fn default_graph_user() -> String {
    "neo4j".to_string()
}

fn default_graph_password() -> String {
    "password".to_string()
}

fn default_graph_env_file() -> Option<String> {
    Some(".neo4j_config".to_string())
}

/// Embedding endpoint (OpenAI-compatible `/embeddings`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Name of the environment variable holding the API key, if any.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            api_key_env: None,
        }
    }
}

fn default_embedding_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_embedding_model() -> String {
    "all-minilm".to_string()
}

/// Join a relative config path onto a root; absolute paths pass through.
fn resolve_against(root: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
