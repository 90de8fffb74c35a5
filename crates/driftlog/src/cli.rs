//! Command-line definition.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use driftlog_config::LayeredConfigOptions;
use driftlog_core::Workspace;
use std::path::{Path, PathBuf};

/// Decision drift tracking and session memory for coding assistants.
#[derive(Debug, Parser)]
#[command(name = "driftlog", version)]
pub struct Cli {
    /// Extra driftlog.json5 layer applied last
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Project root (defaults to the detected root or the current directory)
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,
    /// Memory directory, relative to the project root
    #[arg(long, global = true)]
    pub memory_dir: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the memory directory layout
    Init,
    /// Record a decision interactively
    Decide,
    /// Record a decision with minimal prompts
    Quick,
    /// Summarize the session that just ended
    EndSession,
    /// Print or write the reconstructed context
    Context {
        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show a reminder that a decision should be recorded
    Remind {
        context: String,
        change: Option<String>,
        original: Option<String>,
    },
    /// Add a code entity to the semantic graph
    Index(IndexArgs),
}

#[derive(Debug, Args)]
pub struct IndexArgs {
    /// File containing the entity
    #[arg(long)]
    pub file: String,
    /// Entity kind, e.g. function or class
    #[arg(long)]
    pub kind: String,
    #[arg(long)]
    pub name: String,
    /// Inline source text
    #[arg(long, conflicts_with = "code_file", required_unless_present = "code_file")]
    pub code: Option<String>,
    /// Read the source text from a file
    #[arg(long)]
    pub code_file: Option<PathBuf>,
    #[arg(long)]
    pub purpose: String,
    /// Remove the entity again after indexing it
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Resolve config layers and open the workspace relative to `cwd`.
    pub fn workspace(&self, cwd: &Path) -> anyhow::Result<Workspace> {
        let mut options = LayeredConfigOptions::new(cwd);
        if let Some(path) = &self.config {
            options = options.with_runtime_path(cwd.join(path));
        }
        let project_root = self.project_root.as_ref().map(|root| cwd.join(root));
        let workspace =
            Workspace::discover(options, project_root).context("failed to load configuration")?;
        Ok(match &self.memory_dir {
            Some(dir) => workspace.with_memory_dir(dir.clone()),
            None => workspace,
        })
    }
}
