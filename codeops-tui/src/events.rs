//! Event types for the console event loop.

use codeops_core::{MissionId, MissionOutcome};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    /// Bracketed paste; terminals deliver dropped files this way.
    Paste(String),
    Tick,
    Resize { width: u16, height: u16 },
    MissionFinished {
        id: MissionId,
        outcome: MissionOutcome,
    },
}
