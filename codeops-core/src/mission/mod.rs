//! Mission Orchestrator
//!
//! Owns the transcript, execution log, artifact, engine-mode preference and
//! the busy flag. A mission is split into two synchronous steps around the
//! single suspension point:
//!
//! 1. [`MissionOrchestrator::submit`] applies the entry actions and returns
//!    the immutable [`MissionRequest`] to send.
//! 2. [`MissionOrchestrator::complete`] applies one [`MissionOutcome`].
//!
//! The caller performs the request in between, so state mutation stays on
//! whichever single logical thread owns the orchestrator.

mod types;

pub use types::{
    EngineMode, Message, MissionId, MissionOutcome, MissionRequest, Role, SolveResponse,
    SUCCESS_STATUS,
};

use crate::attachment::Attachment;
use crate::backend::{Clipboard, SolverBackend};
use crate::error::ClipboardError;

/// Agent message appended when the backend reports success.
pub const MISSION_ACCOMPLISHED: &str = "Mission Accomplished. Solution Verified.";

/// Agent message appended when the backend responds with any other status.
pub const MISSION_FAILED: &str = "Mission Failed. Check logs.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionState {
    Idle,
    Submitting(MissionId),
}

/// Terminal state of the most recent mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Success,
    Failure,
}

#[derive(Debug, Clone, Default)]
pub struct MissionOrchestrator {
    transcript: Vec<Message>,
    execution_log: Vec<String>,
    artifact: Option<String>,
    engine_mode: EngineMode,
    in_flight: Option<MissionId>,
    last_outcome: Option<Completion>,
    next_id: u64,
}

impl MissionOrchestrator {
    pub fn new(engine_mode: EngineMode) -> Self {
        Self {
            engine_mode,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn execution_log(&self) -> &[String] {
        &self.execution_log
    }

    /// The most recent generated solution, if the last mission produced one.
    pub fn artifact(&self) -> Option<&str> {
        self.artifact.as_deref()
    }

    pub fn engine_mode(&self) -> EngineMode {
        self.engine_mode
    }

    /// Sticky operator preference; independent of mission outcomes.
    pub fn set_engine_mode(&mut self, mode: EngineMode) {
        if self.engine_mode != mode {
            tracing::debug!(mode = %mode, "Engine mode changed");
        }
        self.engine_mode = mode;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn state(&self) -> MissionState {
        match self.in_flight {
            Some(id) => MissionState::Submitting(id),
            None => MissionState::Idle,
        }
    }

    pub fn last_outcome(&self) -> Option<Completion> {
        self.last_outcome
    }

    // ------------------------------------------------------------------------
    // Mission lifecycle
    // ------------------------------------------------------------------------

    /// Start a mission.
    ///
    /// Returns `None`, with no observable change, when the task is blank or a
    /// mission is already in flight. Otherwise marks the orchestrator busy,
    /// records the user message and start log line, clears the artifact and
    /// returns the request carrying a snapshot of `staged`.
    pub fn submit(
        &mut self,
        task: &str,
        mode: EngineMode,
        staged: &[Attachment],
    ) -> Option<MissionRequest> {
        if task.trim().is_empty() {
            tracing::debug!("Blank task ignored");
            return None;
        }
        if let Some(active) = self.in_flight {
            tracing::debug!(active = %active, "Mission in flight; submit dropped");
            return None;
        }

        let id = MissionId(self.next_id);
        self.next_id += 1;
        self.in_flight = Some(id);

        self.transcript.push(Message::user(task));
        self.artifact = None;
        self.execution_log.push(start_line(mode, task));

        tracing::info!(
            mission = %id,
            mode = %mode,
            attachments = staged.len(),
            "Mission submitted"
        );

        Some(MissionRequest {
            id,
            task: task.to_string(),
            mode,
            attachments: staged.to_vec(),
        })
    }

    /// Apply the outcome of the in-flight mission and return to idle.
    ///
    /// A completion for any other mission id (or while idle) is ignored.
    pub fn complete(&mut self, id: MissionId, outcome: MissionOutcome) -> Option<Completion> {
        match self.in_flight {
            Some(active) if active == id => {}
            active => {
                tracing::warn!(
                    mission = %id,
                    active = ?active,
                    "Completion for a mission that is not in flight ignored"
                );
                return None;
            }
        }

        let label = outcome.label();
        let completion = match outcome {
            MissionOutcome::Success { logs, code } => {
                self.execution_log.extend(logs);
                self.transcript.push(Message::agent(MISSION_ACCOMPLISHED));
                self.artifact = code.filter(|code| !code.is_empty());
                Completion::Success
            }
            MissionOutcome::BackendFailure { logs } => {
                self.execution_log.extend(logs);
                self.transcript.push(Message::agent(MISSION_FAILED));
                Completion::Failure
            }
            MissionOutcome::TransportFailure { description } => {
                self.execution_log.push(error_line(&description));
                Completion::Failure
            }
        };

        self.in_flight = None;
        self.last_outcome = Some(completion);
        tracing::info!(mission = %id, outcome = label, "Mission completed");
        Some(completion)
    }

    /// Submit, await the backend and complete in one call.
    ///
    /// Holding `&mut self` across the await means no other submission can
    /// interleave; callers that need to keep handling events while the
    /// request is pending use `submit`/`complete` directly.
    pub async fn run<B>(
        &mut self,
        backend: &B,
        task: &str,
        mode: EngineMode,
        staged: &[Attachment],
    ) -> Option<Completion>
    where
        B: SolverBackend + ?Sized,
    {
        let request = self.submit(task, mode, staged)?;
        let outcome = MissionOutcome::from_result(backend.solve(&request).await);
        self.complete(request.id, outcome)
    }

    /// Copy the artifact to the clipboard. Returns `false` when there is
    /// nothing to copy. Never changes mission state.
    pub fn copy_artifact<C>(&self, clipboard: &mut C) -> Result<bool, ClipboardError>
    where
        C: Clipboard + ?Sized,
    {
        match self.artifact() {
            Some(code) if !code.is_empty() => {
                clipboard.set_text(code)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

fn start_line(mode: EngineMode, task: &str) -> String {
    format!(
        "🚀 STARTING MISSION ({} ENGINE): {}",
        mode.as_str().to_ascii_uppercase(),
        task
    )
}

fn error_line(description: &str) -> String {
    format!("❌ ERROR: {}", description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(logs: &[&str], code: &str) -> MissionOutcome {
        MissionOutcome::Success {
            logs: logs.iter().map(|l| l.to_string()).collect(),
            code: Some(code.to_string()),
        }
    }

    #[test]
    fn start_line_names_mode_and_task() {
        assert_eq!(
            start_line(EngineMode::Local, "list files"),
            "🚀 STARTING MISSION (LOCAL ENGINE): list files"
        );
    }

    #[test]
    fn submit_enters_submitting() {
        let mut orchestrator = MissionOrchestrator::default();
        let request = orchestrator
            .submit("list files", EngineMode::Cloud, &[])
            .unwrap();

        assert!(orchestrator.is_busy());
        assert_eq!(orchestrator.state(), MissionState::Submitting(request.id));
        assert_eq!(orchestrator.transcript(), &[Message::user("list files")]);
        assert_eq!(orchestrator.execution_log().len(), 1);
        assert_eq!(request.mode, EngineMode::Cloud);
        assert_eq!(request.task, "list files");
    }

    #[test]
    fn task_text_is_kept_verbatim() {
        let mut orchestrator = MissionOrchestrator::default();
        let request = orchestrator
            .submit("  padded task ", EngineMode::Cloud, &[])
            .unwrap();
        assert_eq!(request.task, "  padded task ");
        assert_eq!(orchestrator.transcript()[0].content, "  padded task ");
    }

    #[test]
    fn mission_ids_increase() {
        let mut orchestrator = MissionOrchestrator::default();
        let first = orchestrator.submit("a", EngineMode::Cloud, &[]).unwrap();
        orchestrator.complete(first.id, success(&[], "x"));
        let second = orchestrator.submit("b", EngineMode::Cloud, &[]).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut orchestrator = MissionOrchestrator::default();
        let request = orchestrator.submit("a", EngineMode::Cloud, &[]).unwrap();
        let stale = MissionId(request.id.0 + 7);

        assert_eq!(orchestrator.complete(stale, success(&["x"], "y")), None);
        assert!(orchestrator.is_busy());
        assert_eq!(orchestrator.transcript().len(), 1);
    }

    #[test]
    fn completion_while_idle_is_ignored() {
        let mut orchestrator = MissionOrchestrator::default();
        assert_eq!(orchestrator.complete(MissionId(0), success(&[], "y")), None);
        assert!(orchestrator.transcript().is_empty());
        assert!(orchestrator.execution_log().is_empty());
    }

    #[test]
    fn empty_code_leaves_artifact_empty() {
        let mut orchestrator = MissionOrchestrator::default();
        let request = orchestrator.submit("a", EngineMode::Cloud, &[]).unwrap();
        orchestrator.complete(
            request.id,
            MissionOutcome::Success {
                logs: Vec::new(),
                code: Some(String::new()),
            },
        );
        assert_eq!(orchestrator.artifact(), None);
        assert_eq!(orchestrator.last_outcome(), Some(Completion::Success));
    }

    #[test]
    fn engine_mode_is_sticky_across_outcomes() {
        let mut orchestrator = MissionOrchestrator::new(EngineMode::Local);
        let request = orchestrator
            .submit("a", orchestrator.engine_mode(), &[])
            .unwrap();
        orchestrator.complete(
            request.id,
            MissionOutcome::TransportFailure {
                description: "down".to_string(),
            },
        );
        assert_eq!(orchestrator.engine_mode(), EngineMode::Local);
    }
}
