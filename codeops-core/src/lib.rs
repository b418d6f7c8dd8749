//! CodeOps Core - Mission Orchestration
//!
//! Client-side state for driving an autonomous solver backend: the file
//! staging area, the mission state machine that turns a task into a single
//! outbound request, and the projection of transcript entries for display.
//! No terminal or HTTP code lives here; the backend is reached through the
//! [`SolverBackend`] trait.

pub mod attachment;
pub mod backend;
pub mod error;
pub mod mission;
pub mod render;
pub mod staging;

pub use attachment::{Attachment, AttachmentKind, DEFAULT_MIME_TYPE};
pub use backend::{Clipboard, SolverBackend};
pub use error::{ClipboardError, SolverError, StagingError};
pub use mission::{
    Completion, EngineMode, Message, MissionId, MissionOrchestrator, MissionOutcome,
    MissionRequest, MissionState, Role, SolveResponse, MISSION_ACCOMPLISHED, MISSION_FAILED,
    SUCCESS_STATUS,
};
pub use render::{empty_transcript_hint, input_placeholder, MessageAlign, MessageView};
pub use staging::{
    load_paths, parse_dropped_paths, resolve_drop, BrowseOutcome, StagingArea,
    StagingSubscription,
};
