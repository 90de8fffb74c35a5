use super::{RULE, offer_context_refresh};
use crate::prompt::Prompter;
use anyhow::Context;
use driftlog_core::Workspace;
use driftlog_memory::{DecisionRecord, RecordStore};

/// Full interactive decision entry; `None` when the user backs out.
pub fn run(
    workspace: &Workspace,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Option<DecisionRecord>> {
    prompter.say("Add Decision")?;
    prompter.say(RULE)?;
    prompter.say("Document architectural decisions, technology changes,")?;
    prompter.say("or significant deviations from the original plan.")?;
    prompter.say("")?;

    if !prompter.confirm("Do you want to add a new decision?")? {
        prompter.say("Cancelled.")?;
        return Ok(None);
    }

    let context =
        prompter.ask_required("Context (e.g., 'User authentication', 'Database design')")?;
    let requirement = prompter.ask_default("Original requirement/plan", "Not specified")?;
    let actual = prompter.ask_required("What was actually implemented")?;
    let drift_type = prompter.ask_default("Drift type", "enhancement")?.to_lowercase();
    let rationale = prompter.ask_required("Why did you make this change?")?;
    let impact = prompter.ask_list("What other parts of the code were affected?")?;
    let approved = prompter
        .ask_default("Is this change approved? (y/n)", "y")?
        .eq_ignore_ascii_case("y");

    let record = DecisionRecord::new(context, actual)
        .with_prp_requirement(requirement)
        .with_drift_type(drift_type)
        .with_rationale(rationale)
        .with_impact(impact)
        .approved(approved);

    show_preview(prompter, &record)?;
    if !prompter.confirm("Save this decision?")? {
        prompter.say("Cancelled.")?;
        return Ok(None);
    }

    workspace
        .store()
        .append_decision(record.clone())
        .context("failed to save decision")?;
    prompter.say("Decision saved.")?;
    prompter.say(&format!(
        "Location: {}",
        workspace.store().decisions_path().display()
    ))?;

    offer_context_refresh(workspace, prompter, "Generate updated context?")?;
    Ok(Some(record))
}

fn show_preview(prompter: &mut dyn Prompter, record: &DecisionRecord) -> anyhow::Result<()> {
    let impact = if record.impact.is_empty() {
        "None".to_string()
    } else {
        record.impact.join(", ")
    };
    prompter.say("")?;
    prompter.say("Decision Preview:")?;
    prompter.say(RULE)?;
    prompter.say(&format!("Timestamp: {}", record.timestamp))?;
    prompter.say(&format!("Context: {}", record.context))?;
    prompter.say(&format!(
        "Original: {}",
        record.prp_requirement.as_deref().unwrap_or_default()
    ))?;
    prompter.say(&format!("Actual: {}", record.actual_implementation))?;
    if let Some(drift_type) = &record.drift_type {
        prompter.say(&format!("Drift Type: {drift_type}"))?;
    }
    prompter.say(&format!(
        "Rationale: {}",
        record.rationale.as_deref().unwrap_or_default()
    ))?;
    prompter.say(&format!("Impact: {impact}"))?;
    prompter.say(&format!(
        "Approved: {}",
        if record.approved { "Yes" } else { "No" }
    ))?;
    prompter.say(RULE)?;
    Ok(())
}
