use driftlog::commands;
use driftlog::prompt::{PromptError, ScriptedPrompter};
use driftlog_config::DriftlogConfig;
use driftlog_core::Workspace;
use driftlog_memory::{DriftType, RecordStore};
use driftlog_test_utils::MemoryFixture;
use pretty_assertions::assert_eq;
use std::fs;

fn workspace(fixture: &MemoryFixture) -> Workspace {
    Workspace::new(fixture.project_root(), DriftlogConfig::default())
}

#[test]
fn decide_saves_full_record_and_refreshes_context() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new([
        "y",
        "Database design",
        "",
        "SQLite instead of Postgres",
        "MAJOR",
        "Single binary deployment",
        "storage",
        "migrations",
        "done",
        "",
        "y",
        "y",
    ]);

    let record = commands::decide::run(&workspace, &mut prompter)
        .expect("decide")
        .expect("saved");
    assert_eq!(prompter.remaining(), 0);

    let stored = workspace.store().load_decisions().expect("load");
    assert_eq!(stored, vec![record.clone()]);
    assert_eq!(record.context, "Database design");
    assert_eq!(record.prp_requirement.as_deref(), Some("Not specified"));
    assert_eq!(record.drift_type, Some(DriftType::Major));
    assert_eq!(
        record.impact,
        vec!["storage".to_string(), "migrations".to_string()]
    );
    assert!(record.approved);

    let context = fs::read_to_string(workspace.context_output_path()).expect("context");
    assert!(context.contains("- **"));
    assert!(context.contains(": Database design"));
    assert!(context.contains("- Drift Warnings:"));
}

#[test]
fn decide_declined_at_start_writes_nothing() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new(["n"]);
    let outcome = commands::decide::run(&workspace, &mut prompter).expect("decide");
    assert_eq!(outcome, None);
    assert!(!workspace.store().decisions_path().exists());
    assert_eq!(prompter.transcript().last().map(String::as_str), Some("Cancelled."));
}

#[test]
fn decide_not_confirmed_at_preview_writes_nothing() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new([
        "y", "auth", "sessions", "JWT", "", "stateless", "done", "n", "n",
    ]);
    let outcome = commands::decide::run(&workspace, &mut prompter).expect("decide");
    assert_eq!(outcome, None);
    assert!(workspace.store().load_decisions().expect("load").is_empty());
    assert!(prompter.output().contains("Approved: No"));
}

#[test]
fn end_of_input_cancels_decide() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new(["y", "auth"]);
    let err = commands::decide::run(&workspace, &mut prompter).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PromptError>(),
        Some(PromptError::Cancelled)
    ));
    assert!(!workspace.store().decisions_path().exists());
}

#[test]
fn quick_uses_default_rationale() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new(["auth", "JWT tokens", ""]);
    commands::quick::run(&workspace, &mut prompter)
        .expect("quick")
        .expect("saved");

    let stored = workspace.store().load_decisions().expect("load");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].context, "auth");
    assert_eq!(stored[0].actual_implementation, "JWT tokens");
    assert_eq!(
        stored[0].rationale.as_deref(),
        Some("Performance/UX improvement")
    );
    assert_eq!(stored[0].drift_type, Some(DriftType::Enhancement));
    assert!(stored[0].approved);
    assert!(prompter.output().contains("Saved: auth - JWT tokens"));
}

#[test]
fn quick_with_empty_change_cancels() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new(["auth", "  "]);
    let outcome = commands::quick::run(&workspace, &mut prompter).expect("quick");
    assert_eq!(outcome, None);
    assert!(!workspace.store().decisions_path().exists());
}

#[test]
fn quick_prepends_to_existing_decisions() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    for area in ["first", "second"] {
        let mut prompter = ScriptedPrompter::new([area, "change", "why"]);
        commands::quick::run(&workspace, &mut prompter).expect("quick");
    }
    let contexts: Vec<String> = workspace
        .store()
        .load_decisions()
        .expect("load")
        .into_iter()
        .map(|decision| decision.context)
        .collect();
    assert_eq!(contexts, vec!["second".to_string(), "first".to_string()]);
}

#[test]
fn end_session_saves_summary_without_refresh() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new([
        "auth-work",
        "src/auth.rs",
        "added login",
        "src/lib.rs",
        "",
        "done",
        "use JWT",
        "",
        "n",
    ]);
    let summary = commands::end_session::run(&workspace, &mut prompter)
        .expect("end session")
        .expect("saved");

    assert_eq!(summary.session_id, "auth-work");
    assert_eq!(summary.changes.len(), 1);
    assert_eq!(summary.decisions, vec!["use JWT".to_string()]);
    let loaded = workspace
        .store()
        .load_summary("auth-work")
        .expect("load")
        .expect("present");
    assert_eq!(loaded, summary);
    assert!(!workspace.context_output_path().exists());
}

#[test]
fn end_session_generates_default_id() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new(["", "", "refactor storage", "done", "y"]);
    let summary = commands::end_session::run(&workspace, &mut prompter)
        .expect("end session")
        .expect("saved");

    assert_eq!(summary.session_id.len(), "20250101-0930".len());
    assert!(prompter.output().contains(&format!("Using default: {}", summary.session_id)));
    let context = fs::read_to_string(workspace.context_output_path()).expect("context");
    assert!(context.contains(&format!("### Session {}", summary.session_id)));
}

#[test]
fn end_session_with_nothing_entered_saves_nothing() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut prompter = ScriptedPrompter::new(["empty", "done", "done"]);
    let outcome = commands::end_session::run(&workspace, &mut prompter).expect("end session");
    assert_eq!(outcome, None);
    assert!(!workspace.store().summaries_dir().exists());
    assert!(prompter.output().contains("Session not saved."));
}

#[test]
fn init_reports_created_then_existing() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);
    let mut out = Vec::new();
    let first = commands::init::run(&workspace, &mut out).expect("init");
    assert!(first.memory_dir && first.summaries_dir && first.decisions_file);

    let mut out = Vec::new();
    let second = commands::init::run(&workspace, &mut out).expect("init again");
    assert!(!second.decisions_file);
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("exists"));
    assert!(!text.contains("created"));
}

#[test]
fn context_prints_report_or_writes_file() {
    let fixture = MemoryFixture::new();
    let workspace = workspace(&fixture);

    let mut out = Vec::new();
    commands::context::run(&workspace, None, &mut out).expect("print");
    let printed = String::from_utf8(out).expect("utf8");
    assert!(printed.starts_with("## Current Context Summary\n"));

    let path = fixture.project_root().join("ctx.md");
    let mut out = Vec::new();
    commands::context::run(&workspace, Some(&path), &mut out).expect("write");
    assert!(fs::read_to_string(&path).expect("read").ends_with("recent sessions"));
}
