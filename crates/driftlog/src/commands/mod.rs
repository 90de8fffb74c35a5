//! Subcommand implementations.

pub mod context;
pub mod decide;
pub mod end_session;
pub mod index;
pub mod init;
pub mod quick;
pub mod remind;

use crate::prompt::Prompter;
use anyhow::Context;
use driftlog_core::Workspace;

const RULE: &str = "==================================================";

/// Offer to regenerate the context file after a write.
fn offer_context_refresh(
    workspace: &Workspace,
    prompter: &mut dyn Prompter,
    question: &str,
) -> anyhow::Result<bool> {
    prompter.say("")?;
    if !prompter.confirm(question)? {
        return Ok(false);
    }
    let path = workspace.context_output_path();
    workspace
        .reconstructor()
        .write_context_file(&path)
        .with_context(|| format!("failed to write context to {}", path.display()))?;
    prompter.say(&format!("Context updated in {}", path.display()))?;
    Ok(true)
}
