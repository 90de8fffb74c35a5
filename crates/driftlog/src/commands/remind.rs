use std::io::Write;

const DEFAULT_CHANGE: &str = "Significant change";
const WIDE_RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Banner shown at a decision point.
pub fn render_reminder(context: &str, change: Option<&str>, original: Option<&str>) -> String {
    let mut lines = vec![
        String::new(),
        WIDE_RULE.to_string(),
        "DECISION POINT DETECTED".to_string(),
        WIDE_RULE.to_string(),
        String::new(),
        format!("Context: {context}"),
        format!("Change: {}", change.unwrap_or(DEFAULT_CHANGE)),
    ];
    if let Some(original) = original {
        lines.push(format!("Original Plan: {original}"));
    }
    lines.extend(
        [
            "",
            THIN_RULE,
            "This looks like an important architectural decision.",
            "",
            "Options:",
            "1. Quick decision:  driftlog quick",
            "2. Full decision:   driftlog decide",
            "3. Skip for now:    continue coding",
            "",
            "Tip: record the 'why' while it is fresh.",
            WIDE_RULE,
        ]
        .map(str::to_string),
    );
    lines.join("\n")
}

pub fn run(
    context: &str,
    change: Option<&str>,
    original: Option<&str>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    writeln!(out, "{}", render_reminder(context, change, original))?;
    Ok(())
}
