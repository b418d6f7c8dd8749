//! One-shot missions for `codeops run`.

use codeops_core::{
    load_paths, Completion, EngineMode, MessageView, MissionOrchestrator, SolverBackend,
    StagingArea, StagingError,
};
use std::io::{self, Write};
use std::path::PathBuf;

pub struct HeadlessRun {
    pub orchestrator: MissionOrchestrator,
    pub completion: Option<Completion>,
}

impl HeadlessRun {
    /// 0 only when the mission completed successfully.
    pub fn exit_code(&self) -> i32 {
        match self.completion {
            Some(Completion::Success) => 0,
            _ => 1,
        }
    }
}

/// Stage `files`, run a single mission and return the final state.
///
/// Any file that cannot be read aborts the run before a request is sent.
pub async fn run_once<B>(
    backend: &B,
    task: &str,
    mode: EngineMode,
    files: &[PathBuf],
) -> Result<HeadlessRun, StagingError>
where
    B: SolverBackend + ?Sized,
{
    let mut staging = StagingArea::new();
    let subscription = staging.subscribe();

    let loaded = load_paths(files);
    if let Some(err) = loaded.errors.into_iter().next() {
        return Err(err);
    }
    staging.add(loaded.attachments);

    let mut orchestrator = MissionOrchestrator::new(mode);
    let completion = orchestrator
        .run(backend, task, mode, &subscription.snapshot())
        .await;

    Ok(HeadlessRun {
        orchestrator,
        completion,
    })
}

pub fn write_report<W: Write>(out: &mut W, run: &HeadlessRun) -> io::Result<()> {
    let orchestrator = &run.orchestrator;

    writeln!(out, "== Transcript ==")?;
    for message in orchestrator.transcript() {
        let view = MessageView::project(message);
        writeln!(out, "[{}] {}", view.speaker, view.body)?;
    }

    writeln!(out, "\n== Execution Log ==")?;
    for line in orchestrator.execution_log() {
        writeln!(out, "{}", line)?;
    }

    if let Some(code) = orchestrator.artifact() {
        writeln!(out, "\n== SOLUTION.py ==")?;
        writeln!(out, "{}", code)?;
    }
    Ok(())
}
