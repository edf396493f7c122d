use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{Action, EditAction};

/// Map a key in a text dialog (add task, archive label) to an action
pub(super) fn edit_action(key: KeyEvent) -> Option<Action> {
    let edit = match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => return Some(Action::Confirm),
        (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            return Some(Action::Cancel);
        }
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => EditAction::Home,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => EditAction::End,
        (KeyModifiers::CONTROL, KeyCode::Char('w')) | (KeyModifiers::ALT, KeyCode::Backspace) => {
            EditAction::DeleteWordBack
        }
        (_, KeyCode::Backspace) => EditAction::Backspace,
        (_, KeyCode::Delete) => EditAction::DeleteForward,
        (_, KeyCode::Left) => EditAction::Left,
        (_, KeyCode::Right) => EditAction::Right,
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            EditAction::Insert(c)
        }
        _ => return None,
    };
    Some(Action::Edit(edit))
}
