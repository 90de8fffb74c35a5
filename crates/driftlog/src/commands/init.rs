use anyhow::Context;
use driftlog_core::Workspace;
use driftlog_memory::InitReport;
use std::io::Write;

/// Create the memory layout and report each part.
pub fn run(workspace: &Workspace, out: &mut dyn Write) -> anyhow::Result<InitReport> {
    let report = workspace.init().context("failed to initialize memory directory")?;
    let store = workspace.store();
    let lines = [
        (report.memory_dir, store.root().to_path_buf()),
        (report.summaries_dir, store.summaries_dir()),
        (report.decisions_file, store.decisions_path()),
    ];
    for (created, path) in lines {
        let state = if created { "created" } else { "exists" };
        writeln!(out, "{state:>8}  {}", path.display())?;
    }
    writeln!(out, "Memory system initialized")?;
    Ok(report)
}
