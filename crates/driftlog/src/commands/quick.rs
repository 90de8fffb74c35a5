use crate::prompt::Prompter;
use anyhow::Context;
use driftlog_core::Workspace;
use driftlog_memory::{DecisionRecord, DriftType, RecordStore};

const DEFAULT_RATIONALE: &str = "Performance/UX improvement";

/// Minimal decision entry. An empty area or change cancels.
pub fn run(
    workspace: &Workspace,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Option<DecisionRecord>> {
    prompter.say("Quick Decision Entry")?;
    prompter.say("==============================")?;

    let area = prompter.ask("What area? (e.g., auth, database): ")?;
    let area = area.trim();
    if area.is_empty() {
        prompter.say("Cancelled.")?;
        return Ok(None);
    }
    let change = prompter.ask("What changed?: ")?;
    let change = change.trim();
    if change.is_empty() {
        prompter.say("Cancelled.")?;
        return Ok(None);
    }
    let why = prompter.ask("Why?: ")?;
    let why = match why.trim() {
        "" => DEFAULT_RATIONALE,
        why => why,
    };

    let record = DecisionRecord::new(area, change)
        .with_rationale(why)
        .with_drift_type(DriftType::Enhancement)
        .approved(true);
    workspace
        .store()
        .append_decision(record.clone())
        .context("failed to save decision")?;
    prompter.say(&format!("Saved: {area} - {change}"))?;
    Ok(Some(record))
}
