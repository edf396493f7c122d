use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Action;

/// Map a key in the archive confirmation dialog to an action
pub(super) fn confirm_action(key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y' | 'Y')) => Some(Action::Yes),
        (KeyModifiers::NONE, KeyCode::Char('n' | 'N')) => Some(Action::No),
        (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Cancel),
        _ => None,
    }
}
