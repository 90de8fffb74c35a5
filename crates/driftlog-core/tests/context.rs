use driftlog_core::{ContextOptions, ContextReconstructor, CoreError};
use driftlog_memory::{FileChange, SessionSummarizer, SessionSummary, Timestamp};
use driftlog_test_utils::{InMemoryRecordStore, MemoryFixture, decision_days_ago};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn reconstructor(fixture: &MemoryFixture) -> ContextReconstructor {
    ContextReconstructor::new(
        Arc::new(fixture.store()),
        ContextOptions::new(fixture.project_root()),
    )
}

fn without_retrieved_line(report: &str) -> String {
    report
        .lines()
        .filter(|line| !line.starts_with("Retrieved at:"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn empty_memory_renders_header_and_next_steps_only() {
    let fixture = MemoryFixture::new();
    let now = Timestamp::parse("2025-06-01T10:00:00").expect("timestamp");
    let report = reconstructor(&fixture).reconstruct_at(now).expect("report");
    let headings: Vec<&str> = report
        .lines()
        .filter(|line| line.starts_with("## "))
        .collect();
    assert_eq!(headings, vec!["## Current Context Summary", "## Next Steps"]);
    assert!(report.contains("Retrieved at: 2025-06-01T10:00:00\n"));
}

#[test]
fn major_drift_inside_window_warns_and_older_does_not() {
    let fixture = MemoryFixture::new();
    let now = Timestamp::now();
    fixture.write_decisions(&[
        decision_days_ago(now, 10, "cache layer")
            .with_drift_type("major")
            .with_impact(vec!["latency".to_string()]),
        decision_days_ago(now, 31, "queue swap").with_drift_type("major"),
        decision_days_ago(now, 2, "button color").with_drift_type("enhancement"),
    ]);

    let status = reconstructor(&fixture).drift_status_at(now).expect("status");
    let contexts: Vec<&str> = status
        .drift_warnings
        .iter()
        .map(|warning| warning.context.as_str())
        .collect();
    assert_eq!(contexts, vec!["cache layer"]);
    assert_eq!(status.drift_warnings[0].impact, vec!["latency".to_string()]);
    assert!(!status.found);
}

#[test]
fn warnings_render_even_without_requirements_document() {
    let fixture = MemoryFixture::new();
    let now = Timestamp::now();
    fixture.write_decisions(&[decision_days_ago(now, 10, "cache layer").with_drift_type("major")]);

    let report = reconstructor(&fixture).reconstruct_at(now).expect("report");
    assert!(report.contains("## PRP Status\n- PRP Document: Not found\n- Drift Warnings:"));
    assert!(report.contains(": cache layer"));
    // Ten days old is outside the recent-decision window.
    assert!(!report.contains("## Recent Decisions"));
}

#[test]
fn recent_window_lists_only_last_seven_days() {
    let fixture = MemoryFixture::new();
    let now = Timestamp::now();
    fixture.write_decisions(&[
        decision_days_ago(now, 1, "fresh").with_rationale("measured"),
        decision_days_ago(now, 8, "stale"),
    ]);

    let snapshot = reconstructor(&fixture).snapshot_at(now).expect("snapshot");
    let contexts: Vec<&str> = snapshot
        .recent_decisions
        .iter()
        .map(|decision| decision.context.as_str())
        .collect();
    assert_eq!(contexts, vec!["fresh"]);
}

#[test]
fn requirements_document_is_reported_with_mtime() {
    let fixture = MemoryFixture::new();
    fixture.write_prp("# Plan\n");
    let report = reconstructor(&fixture).reconstruct().expect("report");
    assert!(report.contains("- PRP Document: Found (last modified: "));
}

#[test]
fn summaries_and_milestone_come_from_latest_documents() {
    let fixture = MemoryFixture::new();
    let now = Timestamp::now();
    fixture.write_milestone("alpha", "Alpha milestone", 5);
    fixture.write_milestone("beta", "Beta milestone\n", 1);
    for (index, id) in ["s1", "s2", "s3", "s4", "s5", "s6"].iter().enumerate() {
        let summary = SessionSummary::new(
            *id,
            now,
            vec![FileChange::new(format!("{id}.rs"), "edit")],
            Vec::new(),
        );
        fixture.write_summary(&summary, (10 - index) as u64);
    }

    let snapshot = reconstructor(&fixture).snapshot_at(now).expect("snapshot");
    assert_eq!(snapshot.milestone.as_deref(), Some("Beta milestone\n"));
    let ids: Vec<&str> = snapshot
        .recent_summaries
        .iter()
        .map(|summary| summary.session_id.as_str())
        .collect();
    assert_eq!(ids, vec!["s6", "s5", "s4", "s3", "s2"]);

    let report = reconstructor(&fixture).render(&snapshot);
    assert!(report.contains("## Current Milestone\nBeta milestone\n\n## Recent Session Summaries"));
}

#[test]
fn reconstruction_is_stable_apart_from_retrieval_time() {
    let fixture = MemoryFixture::new();
    let now = Timestamp::now();
    fixture.write_decisions(&[decision_days_ago(now, 1, "auth").with_drift_type("major")]);
    fixture.write_prp("# Plan\n");

    let reconstructor = reconstructor(&fixture);
    let first = reconstructor.reconstruct().expect("first");
    let second = reconstructor.reconstruct().expect("second");
    assert_eq!(without_retrieved_line(&first), without_retrieved_line(&second));
}

#[test]
fn malformed_decisions_abort_reconstruction() {
    let fixture = MemoryFixture::new();
    fixture.write_raw_decisions("decisions: [ {timestamp: nope, context: x");
    let err = reconstructor(&fixture).reconstruct().unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn write_context_file_persists_report() {
    let fixture = MemoryFixture::new();
    let path = fixture.project_root().join("out").join("current_context.md");
    let report = reconstructor(&fixture)
        .write_context_file(&path)
        .expect("write");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), report);
}

#[test]
fn works_against_any_record_store() {
    let store = Arc::new(InMemoryRecordStore::new().with_milestone("M1"));
    let now = Timestamp::now();
    let reconstructor = ContextReconstructor::new(store, ContextOptions::new("/nonexistent"));
    let snapshot = reconstructor.snapshot_at(now).expect("snapshot");
    assert_eq!(snapshot.milestone.as_deref(), Some("M1"));
    assert!(!snapshot.prp_status.found);
}

#[test]
fn summaries_saved_through_summarizer_feed_the_snapshot() {
    let store = Arc::new(InMemoryRecordStore::new());
    let summarizer = SessionSummarizer::new(store.clone());
    let now = Timestamp::parse("2025-06-01T10:00:00").expect("timestamp");
    summarizer
        .create_session_summary_at("first", vec![FileChange::new("a.rs", "edit")], Vec::new(), now)
        .expect("first");
    summarizer
        .create_session_summary_at("second", Vec::new(), vec!["use sqlite".to_string()], now)
        .expect("second");
    summarizer
        .create_session_summary_at("first", Vec::new(), Vec::new(), now)
        .expect("replace");

    let stored: Vec<String> = store
        .summaries()
        .into_iter()
        .map(|summary| summary.session_id)
        .collect();
    assert_eq!(stored, vec!["second".to_string(), "first".to_string()]);

    let reconstructor = ContextReconstructor::new(store, ContextOptions::new("/nonexistent"));
    let snapshot = reconstructor.snapshot_at(now).expect("snapshot");
    let recent: Vec<&str> = snapshot
        .recent_summaries
        .iter()
        .map(|summary| summary.session_id.as_str())
        .collect();
    assert_eq!(recent, vec!["first", "second"]);
}

#[test]
fn unreadable_requirements_location_aborts_reconstruction() {
    let fixture = MemoryFixture::new();
    let blocker = fixture.project_root().join("docs");
    std::fs::write(&blocker, "a file, not a directory").expect("write");
    let mut options = ContextOptions::new(fixture.project_root());
    options.prp_path = blocker.join("prp.md");
    let reconstructor = ContextReconstructor::new(Arc::new(fixture.store()), options);

    let err = reconstructor.reconstruct().unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}
