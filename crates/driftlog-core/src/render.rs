//! Markdown rendering of a context snapshot.

use crate::context::ContextSnapshot;
use crate::drift::{DriftWarning, PrpStatus};
use driftlog_memory::{DecisionRecord, SessionSummary};

const NEXT_STEPS: [&str; 5] = [
    "## Next Steps",
    "Based on the context above, consider:",
    "1. Reviewing recent decisions for consistency",
    "2. Checking if current work aligns with PRP goals",
    "3. Identifying any incomplete tasks from recent sessions",
];

/// Render a snapshot as the context report.
///
/// Sections without data are omitted; the header and next-steps footer are
/// always present.
pub fn render_context(snapshot: &ContextSnapshot) -> String {
    let mut lines: Vec<String> = vec![
        "## Current Context Summary".to_string(),
        format!("Retrieved at: {}", snapshot.retrieved_at),
        String::new(),
    ];

    if let Some(milestone) = snapshot.milestone.as_deref() {
        lines.push("## Current Milestone".to_string());
        lines.push(milestone.trim_end().to_string());
        lines.push(String::new());
    }

    if !snapshot.recent_decisions.is_empty() {
        lines.push("## Recent Decisions".to_string());
        for decision in &snapshot.recent_decisions {
            push_decision(&mut lines, decision);
        }
        lines.push(String::new());
    }

    if !snapshot.recent_summaries.is_empty() {
        lines.push("## Recent Session Summaries".to_string());
        for summary in &snapshot.recent_summaries {
            push_summary(&mut lines, summary);
        }
        lines.push(String::new());
    }

    if !snapshot.prp_status.is_empty() {
        push_prp_status(&mut lines, &snapshot.prp_status);
        lines.push(String::new());
    }

    lines.extend(NEXT_STEPS.iter().map(|line| line.to_string()));
    lines.join("\n")
}

fn push_decision(lines: &mut Vec<String>, decision: &DecisionRecord) {
    lines.push(format!("- **{}**: {}", decision.timestamp, decision.context));
    if let Some(rationale) = decision.rationale.as_deref().filter(|text| !text.is_empty()) {
        lines.push(format!("  - Rationale: {rationale}"));
    }
    if let Some(drift_type) = &decision.drift_type {
        lines.push(format!("  - Drift Type: {drift_type}"));
    }
}

fn push_summary(lines: &mut Vec<String>, summary: &SessionSummary) {
    lines.push(format!("\n### Session {}", summary.session_id));
    lines.push(format!("- Time: {}", summary.timestamp));
    let files: Vec<&str> = summary.files_modified.iter().map(String::as_str).collect();
    lines.push(format!("- Files Modified: {}", files.join(", ")));
    if !summary.decisions.is_empty() {
        lines.push(format!("- Decisions Made: {}", summary.decisions.len()));
    }
}

fn push_prp_status(lines: &mut Vec<String>, status: &PrpStatus) {
    lines.push("## PRP Status".to_string());
    if status.found {
        match status.last_modified {
            Some(modified) => {
                lines.push(format!("- PRP Document: Found (last modified: {modified})"))
            }
            None => lines.push("- PRP Document: Found".to_string()),
        }
    } else {
        lines.push("- PRP Document: Not found".to_string());
    }
    if !status.drift_warnings.is_empty() {
        lines.push("- Drift Warnings:".to_string());
        lines.extend(status.drift_warnings.iter().map(warning_line));
    }
}

fn warning_line(warning: &DriftWarning) -> String {
    if warning.impact.is_empty() {
        format!("  - {}: {}", warning.timestamp, warning.context)
    } else {
        format!(
            "  - {}: {} (impact: {})",
            warning.timestamp,
            warning.context,
            warning.impact.join(", ")
        )
    }
}
