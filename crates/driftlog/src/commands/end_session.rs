use super::{RULE, offer_context_refresh};
use crate::prompt::Prompter;
use anyhow::Context;
use driftlog_core::Workspace;
use driftlog_memory::{FileChange, SessionSummary, Timestamp, default_session_id};

/// Collect changes and decisions for the session and save a summary.
///
/// Nothing is written when neither changes nor decisions were entered.
pub fn run(
    workspace: &Workspace,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Option<SessionSummary>> {
    prompter.say("Ending Session")?;
    prompter.say(RULE)?;

    let session_id = prompter.ask("Session name (e.g., 'auth-work'): ")?;
    let session_id = match session_id.trim() {
        "" => {
            let generated = default_session_id(Timestamp::now());
            prompter.say(&format!("Using default: {generated}"))?;
            generated
        }
        name => name.to_string(),
    };

    prompter.say("")?;
    prompter.say("What files did you modify? (enter 'done' when finished)")?;
    let mut changes = Vec::new();
    loop {
        let file = prompter.ask("File: ")?;
        let file = file.trim();
        if is_terminator(file) {
            break;
        }
        let change = prompter.ask(&format!("What changed in {file}?: "))?;
        let change = change.trim();
        if !change.is_empty() {
            changes.push(FileChange::new(file, change));
        }
    }

    prompter.say("")?;
    prompter.say("What decisions were made? (enter 'done' when finished)")?;
    let mut decisions = Vec::new();
    loop {
        let decision = prompter.ask("Decision: ")?;
        let decision = decision.trim();
        if is_terminator(decision) {
            break;
        }
        decisions.push(decision.to_string());
    }

    if changes.is_empty() && decisions.is_empty() {
        prompter.say("")?;
        prompter.say("No changes or decisions recorded. Session not saved.")?;
        return Ok(None);
    }

    let summary = workspace
        .summarizer()
        .create_session_summary(&session_id, changes, decisions)
        .context("failed to save session summary")?;
    let path = workspace.store().summary_path(&summary.session_id)?;
    prompter.say("")?;
    prompter.say("Session summary created.")?;
    prompter.say(&format!("Saved as: {}", path.display()))?;

    if offer_context_refresh(workspace, prompter, "Generate context for next session?")? {
        prompter.say("Ready for the next session.")?;
    }
    Ok(Some(summary))
}

fn is_terminator(answer: &str) -> bool {
    answer.is_empty() || answer.eq_ignore_ascii_case("done")
}
