//! Keybinding definitions for the console.
//!
//! Keys that map to no action fall through to the focused text input.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit,
    ToggleEngine,
    OpenBrowse,
    SelectPrevious,
    SelectNext,
    RemoveSelected,
    CopyArtifact,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('t') => Some(Action::ToggleEngine),
            KeyCode::Char('o') => Some(Action::OpenBrowse),
            KeyCode::Char('x') => Some(Action::RemoveSelected),
            KeyCode::Char('y') => Some(Action::CopyArtifact),
            _ => None,
        };
    }

    match code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Up => Some(Action::SelectPrevious),
        KeyCode::Down => Some(Action::SelectNext),
        _ => None,
    }
}
