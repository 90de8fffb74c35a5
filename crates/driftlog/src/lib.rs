//! driftlog command-line application.
//!
//! Wires layered configuration, the record store, context reconstruction,
//! and the semantic indexer behind the `driftlog` subcommands.

pub mod cli;
pub mod commands;
pub mod prompt;

/// Re-export for convenience.
pub use driftlog_config as config;
/// Re-export for convenience.
pub use driftlog_core as core;
/// Re-export for convenience.
pub use driftlog_graph as graph;
/// Re-export for convenience.
pub use driftlog_memory as memory;

use anyhow::Context;
use cli::{Cli, Command};
use driftlog_core::Workspace;
use driftlog_graph::Neo4jIndexer;
use log::info;
use prompt::{Prompter, StdinPrompter};
use std::io;

/// Initialize `env_logger`; `RUST_LOG` selects the level.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}

/// Execute the parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let workspace = cli.workspace(&cwd)?;
    info!(
        "starting driftlog (project_root={}, memory_dir={})",
        workspace.project_root().display(),
        workspace.memory_dir().display()
    );

    match cli.command {
        Command::Init => {
            commands::init::run(&workspace, &mut io::stdout())?;
        }
        Command::Decide => {
            run_interactive(workspace, |workspace, prompter| {
                commands::decide::run(workspace, prompter).map(|_| ())
            })
            .await?;
        }
        Command::Quick => {
            run_interactive(workspace, |workspace, prompter| {
                commands::quick::run(workspace, prompter).map(|_| ())
            })
            .await?;
        }
        Command::EndSession => {
            run_interactive(workspace, |workspace, prompter| {
                commands::end_session::run(workspace, prompter).map(|_| ())
            })
            .await?;
        }
        Command::Context { output } => {
            let output = output.map(|path| cwd.join(path));
            commands::context::run(&workspace, output.as_deref(), &mut io::stdout())?;
        }
        Command::Remind {
            context,
            change,
            original,
        } => {
            commands::remind::run(
                &context,
                change.as_deref(),
                original.as_deref(),
                &mut io::stdout(),
            )?;
        }
        Command::Index(args) => {
            let entity = commands::index::entity_from_args(&args)?;
            let graph = workspace
                .config()
                .graph
                .clone()
                .with_credential_overrides(workspace.project_root())
                .context("failed to load graph credentials")?;
            let indexer = Neo4jIndexer::from_config(&graph);
            commands::index::run(&indexer, &entity, args.check, &mut io::stdout()).await?;
        }
    }
    Ok(())
}

/// Run a prompt-driven flow on the blocking pool over stdin/stdout.
async fn run_interactive<F>(workspace: Workspace, flow: F) -> anyhow::Result<()>
where
    F: FnOnce(&Workspace, &mut dyn Prompter) -> anyhow::Result<()> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut prompter = StdinPrompter::new();
        flow(&workspace, &mut prompter)
    })
    .await
    .context("interactive task failed")?
}
