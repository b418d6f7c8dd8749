//! Collaborator seams: the solver backend and the operator's clipboard.

use crate::error::{ClipboardError, SolverError};
use crate::mission::{MissionRequest, SolveResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// The remote solver that executes a mission.
///
/// `solve` is the only suspension point in a mission. An `Ok` carries
/// whatever structured response the backend produced, including non-success
/// statuses; `Err` means no response object was obtained at all.
#[async_trait]
pub trait SolverBackend: Send + Sync {
    async fn solve(&self, request: &MissionRequest) -> Result<SolveResponse, SolverError>;
}

#[async_trait]
impl<T: SolverBackend + ?Sized> SolverBackend for Arc<T> {
    async fn solve(&self, request: &MissionRequest) -> Result<SolveResponse, SolverError> {
        (**self).solve(request).await
    }
}

/// Destination for the copy-artifact side effect.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
