mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{Action, EditAction, Mode};
use crate::tui::app::App;

use confirm::confirm_action;
use edit::edit_action;
use navigate::navigate_action;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    let key = normalize_key(key);
    let action = match app.session.mode() {
        Mode::Normal => navigate_action(key),
        Mode::AddingTask | Mode::ArchiveLabel => edit_action(key),
        Mode::ArchiveConfirm => confirm_action(key),
    };
    if let Some(action) = action {
        app.apply(action);
    }
}

/// Handle a bracketed paste event. Only dialogs with a text buffer take it.
pub fn handle_paste(app: &mut App, text: &str) {
    if !app.session.mode().captures_text() || text.is_empty() {
        return;
    }
    app.apply(Action::Edit(EditAction::InsertStr(text.to_string())));
}

/// Fold SHIFT into the character for letter keys, so `Shift+g` and a
/// terminal-reported `G` both arrive as `Char('G')` with no modifiers.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}
