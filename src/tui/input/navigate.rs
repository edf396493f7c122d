use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Action;

/// Map a key in Normal mode to an action
pub(super) fn navigate_action(key: KeyEvent) -> Option<Action> {
    let action = match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Action::Quit,
        (KeyModifiers::NONE, KeyCode::Char('q')) => Action::Quit,
        (KeyModifiers::NONE, KeyCode::Char('n')) => Action::NewTask,
        (KeyModifiers::NONE, KeyCode::Char(' ')) => Action::Toggle,
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => Action::Delete,
        (KeyModifiers::NONE, KeyCode::Char('p')) => Action::CyclePriority,
        (KeyModifiers::NONE, KeyCode::Char('w')) => Action::Save,
        (KeyModifiers::NONE, KeyCode::Char('a')) => Action::Archive,
        (KeyModifiers::NONE, KeyCode::Char('k')) | (_, KeyCode::Up) => Action::CursorUp,
        (KeyModifiers::NONE, KeyCode::Char('j')) | (_, KeyCode::Down) => Action::CursorDown,
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => Action::CursorTop,
        (KeyModifiers::NONE, KeyCode::Char('G')) | (_, KeyCode::End) => Action::CursorBottom,
        _ => return None,
    };
    Some(action)
}
