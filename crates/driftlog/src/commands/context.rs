use anyhow::Context;
use driftlog_core::Workspace;
use std::io::Write;
use std::path::Path;

/// Print the report, or write it to `output` when given.
pub fn run(
    workspace: &Workspace,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let reconstructor = workspace.reconstructor();
    match output {
        Some(path) => {
            reconstructor
                .write_context_file(path)
                .with_context(|| format!("failed to write context to {}", path.display()))?;
            writeln!(out, "Context written to {}", path.display())?;
        }
        None => {
            let report = reconstructor
                .reconstruct()
                .context("failed to reconstruct context")?;
            writeln!(out, "{report}")?;
        }
    }
    Ok(())
}
