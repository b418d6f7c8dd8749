//! CodeOps Test Utilities
//!
//! Shared test infrastructure for the CodeOps workspace:
//! - Mock solver backends and clipboards
//! - Proptest generators for attachments, tasks and staging operations
//! - Fixtures for canned solver responses
//! - Assertions over orchestrator state

pub use codeops_core::{
    Attachment, ClipboardError, Completion, EngineMode, Message, MissionOrchestrator,
    MissionOutcome, MissionRequest, SolveResponse, SolverBackend, SolverError, StagingArea,
};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

// ============================================================================
// MOCK BACKENDS
// ============================================================================

/// Solver that replays a queue of canned results and records every request.
#[derive(Debug, Default)]
pub struct ScriptedSolver {
    responses: Mutex<VecDeque<Result<SolveResponse, SolverError>>>,
    requests: Mutex<Vec<MissionRequest>>,
}

impl ScriptedSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: Result<SolveResponse, SolverError>) -> Self {
        self.push(response);
        self
    }

    pub fn push(&self, response: Result<SolveResponse, SolverError>) {
        lock(&self.responses).push_back(response);
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<MissionRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl SolverBackend for ScriptedSolver {
    async fn solve(&self, request: &MissionRequest) -> Result<SolveResponse, SolverError> {
        lock(&self.requests).push(request.clone());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(SolverError::Transport("no scripted response".to_string())))
    }
}

/// Solver that holds every request until [`GatedSolver::release`] is called,
/// so tests can act while a mission is in flight.
#[derive(Debug)]
pub struct GatedSolver {
    response: Result<SolveResponse, SolverError>,
    gate: Notify,
    arrived: Notify,
    requests: Mutex<Vec<MissionRequest>>,
}

impl GatedSolver {
    pub fn new(response: Result<SolveResponse, SolverError>) -> Self {
        Self {
            response,
            gate: Notify::new(),
            arrived: Notify::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Let one pending (or the next) request complete.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Wait until a request has reached the backend.
    pub async fn wait_for_request(&self) {
        self.arrived.notified().await;
    }

    pub fn requests(&self) -> Vec<MissionRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl SolverBackend for GatedSolver {
    async fn solve(&self, request: &MissionRequest) -> Result<SolveResponse, SolverError> {
        lock(&self.requests).push(request.clone());
        self.arrived.notify_one();
        self.gate.notified().await;
        self.response.clone()
    }
}

/// Clipboard that keeps everything written to it.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub contents: Vec<String>,
}

impl codeops_core::Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents.push(text.to_string());
        Ok(())
    }
}

/// Clipboard that always fails, for error-path tests.
#[derive(Debug, Default)]
pub struct UnavailableClipboard;

impl codeops_core::Clipboard for UnavailableClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no display".to_string()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for CodeOps inputs.

    use super::*;
    use proptest::prelude::*;

    /// One mutation of the staging area.
    #[derive(Debug, Clone)]
    pub enum StagingOp {
        Add(Vec<Attachment>),
        Remove(usize),
    }

    pub fn arb_engine_mode() -> impl Strategy<Value = EngineMode> {
        prop_oneof![Just(EngineMode::Cloud), Just(EngineMode::Local)]
    }

    pub fn arb_attachment() -> impl Strategy<Value = Attachment> {
        (
            "[a-z]{1,8}\\.(py|txt|md|png|pdf)",
            prop::sample::select(vec![
                "text/plain",
                "text/x-python",
                "image/png",
                "application/pdf",
                "application/octet-stream",
            ]),
            prop::collection::vec(any::<u8>(), 0..64),
        )
            .prop_map(|(name, mime, bytes)| Attachment::new(name, mime, bytes))
    }

    pub fn arb_attachments(max: usize) -> impl Strategy<Value = Vec<Attachment>> {
        prop::collection::vec(arb_attachment(), 0..=max)
    }

    /// Strings that are empty once trimmed.
    pub fn arb_blank_task() -> impl Strategy<Value = String> {
        "[ \t\n\r]{0,16}"
    }

    /// Tasks with at least one non-whitespace character.
    pub fn arb_task() -> impl Strategy<Value = String> {
        "[ ]{0,2}[a-zA-Z0-9][a-zA-Z0-9 ,.]{0,40}"
    }

    pub fn arb_staging_op() -> impl Strategy<Value = StagingOp> {
        prop_oneof![
            arb_attachments(3).prop_map(StagingOp::Add),
            (0usize..8).prop_map(StagingOp::Remove),
        ]
    }

    pub fn arb_staging_ops(max: usize) -> impl Strategy<Value = Vec<StagingOp>> {
        prop::collection::vec(arb_staging_op(), 0..=max)
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Canned values for common scenarios.

    use super::*;

    pub fn text_attachment(name: &str, content: &str) -> Attachment {
        Attachment::new(name, "text/plain", content.as_bytes().to_vec())
    }

    pub fn success_response(logs: &[&str], code: &str) -> SolveResponse {
        SolveResponse {
            logs: Some(logs.iter().map(|line| line.to_string()).collect()),
            status: Some("success".to_string()),
            code: Some(code.to_string()),
            ..SolveResponse::default()
        }
    }

    pub fn status_response(status: &str) -> SolveResponse {
        SolveResponse {
            status: Some(status.to_string()),
            ..SolveResponse::default()
        }
    }

    pub fn failure_response(logs: &[&str]) -> SolveResponse {
        SolveResponse {
            logs: Some(logs.iter().map(|line| line.to_string()).collect()),
            status: Some("error".to_string()),
            ..SolveResponse::default()
        }
    }

    pub fn transport_error() -> SolverError {
        SolverError::Transport("connection refused".to_string())
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions over orchestrator state.

    use super::*;

    /// Everything an operator can observe about the orchestrator.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Observable {
        pub transcript: Vec<Message>,
        pub execution_log: Vec<String>,
        pub artifact: Option<String>,
        pub busy: bool,
    }

    pub fn observe(orchestrator: &MissionOrchestrator) -> Observable {
        Observable {
            transcript: orchestrator.transcript().to_vec(),
            execution_log: orchestrator.execution_log().to_vec(),
            artifact: orchestrator.artifact().map(str::to_string),
            busy: orchestrator.is_busy(),
        }
    }

    #[track_caller]
    pub fn assert_unchanged(before: &Observable, orchestrator: &MissionOrchestrator) {
        assert_eq!(before, &observe(orchestrator), "orchestrator state changed");
    }

    #[track_caller]
    pub fn assert_idle(orchestrator: &MissionOrchestrator) {
        assert!(!orchestrator.is_busy(), "expected idle orchestrator");
    }

    /// The transcript has no agent message after the last user message.
    #[track_caller]
    pub fn assert_no_agent_reply(orchestrator: &MissionOrchestrator) {
        let last = orchestrator.transcript().last();
        assert!(
            matches!(last, Some(message) if message.role == codeops_core::Role::User),
            "expected the last transcript entry to be the user's task, got {:?}",
            last
        );
    }
}
