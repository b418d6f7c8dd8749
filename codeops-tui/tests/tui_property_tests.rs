use codeops_core::EngineMode;
use codeops_tui::config::TuiConfig;
use codeops_tui::keys::{map_key, Action};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use proptest::prelude::*;

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

#[test]
fn control_bindings() {
    let ctrl = KeyModifiers::CONTROL;
    assert_eq!(map_key(key(KeyCode::Char('c'), ctrl)), Some(Action::Quit));
    assert_eq!(map_key(key(KeyCode::Char('q'), ctrl)), Some(Action::Quit));
    assert_eq!(map_key(key(KeyCode::Char('t'), ctrl)), Some(Action::ToggleEngine));
    assert_eq!(map_key(key(KeyCode::Char('o'), ctrl)), Some(Action::OpenBrowse));
    assert_eq!(map_key(key(KeyCode::Char('x'), ctrl)), Some(Action::RemoveSelected));
    assert_eq!(map_key(key(KeyCode::Char('y'), ctrl)), Some(Action::CopyArtifact));
}

#[test]
fn plain_bindings() {
    let none = KeyModifiers::NONE;
    assert_eq!(map_key(key(KeyCode::Enter, none)), Some(Action::Submit));
    assert_eq!(map_key(key(KeyCode::Esc, none)), Some(Action::Cancel));
    assert_eq!(map_key(key(KeyCode::Up, none)), Some(Action::SelectPrevious));
    assert_eq!(map_key(key(KeyCode::Down, none)), Some(Action::SelectNext));
}

#[test]
fn key_release_is_ignored() {
    let mut event = key(KeyCode::Enter, KeyModifiers::NONE);
    event.kind = KeyEventKind::Release;
    assert_eq!(map_key(event), None);
}

proptest! {
    #[test]
    fn printable_characters_reach_the_task_input(ch in proptest::char::range(' ', '~')) {
        prop_assert_eq!(map_key(key(KeyCode::Char(ch), KeyModifiers::NONE)), None);
        prop_assert_eq!(map_key(key(KeyCode::Char(ch), KeyModifiers::SHIFT)), None);
    }

    #[test]
    fn positive_tick_interval_is_valid(ms in 1u64..=60_000) {
        let config = TuiConfig { tick_interval_ms: ms, ..TuiConfig::default() };
        prop_assert!(config.validate().is_ok());
    }

    #[test]
    fn solve_path_must_be_absolute(segment in "[a-z]{1,12}") {
        let relative = TuiConfig { solve_path: segment.clone(), ..TuiConfig::default() };
        prop_assert!(relative.validate().is_err());
        let absolute = TuiConfig { solve_path: format!("/{}", segment), ..TuiConfig::default() };
        prop_assert!(absolute.validate().is_ok());
    }

    #[test]
    fn default_mode_round_trips_through_toml(local in any::<bool>()) {
        let mode = if local { EngineMode::Local } else { EngineMode::Cloud };
        let config = TuiConfig::from_toml(&format!("default_mode = \"{}\"", mode.as_str())).unwrap();
        prop_assert_eq!(config.default_mode, mode);
    }
}
