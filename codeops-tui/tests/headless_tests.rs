use codeops_core::{Completion, EngineMode, MISSION_ACCOMPLISHED};
use codeops_test_utils::fixtures::{status_response, success_response, transport_error};
use codeops_test_utils::ScriptedSolver;
use codeops_tui::headless::{run_once, write_report};
use std::path::PathBuf;

#[tokio::test]
async fn success_exits_zero_and_prints_solution() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("input.py");
    std::fs::write(&file, "x = 1").unwrap();

    let solver = ScriptedSolver::new().with_response(Ok(success_response(&["ran"], "print(x)")));
    let run = run_once(&solver, "print x", EngineMode::Local, &[file])
        .await
        .unwrap();

    assert_eq!(run.completion, Some(Completion::Success));
    assert_eq!(run.exit_code(), 0);

    let sent = solver.requests();
    assert_eq!(sent[0].mode, EngineMode::Local);
    assert_eq!(sent[0].attachments[0].file_name(), "input.py");

    let mut out = Vec::new();
    write_report(&mut out, &run).unwrap();
    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("[COMMANDER] print x"));
    assert!(report.contains(&format!("[SYSTEM AI] {}", MISSION_ACCOMPLISHED)));
    assert!(report.contains("🚀 STARTING MISSION (LOCAL ENGINE): print x"));
    assert!(report.contains("== SOLUTION.py ==\nprint(x)"));
}

#[tokio::test]
async fn failures_exit_one() {
    let solver = ScriptedSolver::new()
        .with_response(Ok(status_response("error")))
        .with_response(Err(transport_error()));

    let backend_failure = run_once(&solver, "a", EngineMode::Cloud, &[]).await.unwrap();
    assert_eq!(backend_failure.exit_code(), 1);

    let transport_failure = run_once(&solver, "b", EngineMode::Cloud, &[]).await.unwrap();
    assert_eq!(transport_failure.exit_code(), 1);

    let mut out = Vec::new();
    write_report(&mut out, &transport_failure).unwrap();
    let report = String::from_utf8(out).unwrap();
    assert!(!report.contains("SYSTEM AI"));
    assert!(!report.contains("SOLUTION.py"));
}

#[tokio::test]
async fn blank_task_sends_nothing() {
    let solver = ScriptedSolver::new();
    let run = run_once(&solver, "  ", EngineMode::Cloud, &[]).await.unwrap();
    assert_eq!(run.completion, None);
    assert_eq!(run.exit_code(), 1);
    assert_eq!(solver.request_count(), 0);
}

#[tokio::test]
async fn unreadable_file_aborts_before_sending() {
    let dir = tempfile::tempdir().unwrap();
    let missing: PathBuf = dir.path().join("absent.py");

    let solver = ScriptedSolver::new();
    assert!(run_once(&solver, "go", EngineMode::Cloud, &[missing]).await.is_err());
    assert_eq!(solver.request_count(), 0);
}
