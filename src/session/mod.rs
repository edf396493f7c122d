//! The interaction state machine between key handling and the store.
//!
//! A `Session` owns the store, the modal state, the text buffer used by the
//! add and archive-label dialogs, and the selection. The front end turns
//! key presses into [`Action`]s and feeds them to [`Session::dispatch`]; it
//! reads back [`Session::rows`], [`Session::mode`] and [`Session::prompt`]
//! to draw. Only the session calls mutating store operations.

pub mod text_input;

use std::path::PathBuf;

use crate::io::store::{Store, StoreError};
use crate::model::Priority;

pub use text_input::{EditAction, TextInput};

/// Which dialog, if any, is capturing input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    AddingTask,
    ArchiveConfirm,
    ArchiveLabel,
}

impl Mode {
    /// Whether text keys go to the input buffer in this mode
    pub fn captures_text(self) -> bool {
        matches!(self, Mode::AddingTask | Mode::ArchiveLabel)
    }
}

/// A semantic action, independent of the key bound to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NewTask,
    Toggle,
    Delete,
    CyclePriority,
    Save,
    Archive,
    Quit,
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    Yes,
    No,
    Confirm,
    Cancel,
    Edit(EditAction),
}

/// Result of a successfully dispatched action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The task file was archived to this path
    Archived(PathBuf),
    Quit,
}

/// Text shown by the dialog for the current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub hints: &'static str,
    /// Whether the dialog shows the text buffer
    pub has_input: bool,
}

/// Display fields for one task in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub index: usize,
    pub checkbox: &'static str,
    pub priority: Priority,
    pub priority_glyph: &'static str,
    pub text: &'a str,
    pub done: bool,
    pub selected: bool,
}

#[derive(Debug)]
pub struct Session {
    store: Store,
    mode: Mode,
    input: TextInput,
    /// Index into the store's tasks; None only when the list is empty
    selection: Option<usize>,
}

impl Session {
    pub fn new(store: Store) -> Self {
        let selection = if store.is_empty() { None } else { Some(0) };
        Session {
            store,
            mode: Mode::Normal,
            input: TextInput::default(),
            selection,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Byte offset of the cursor within `input()`
    pub fn input_cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Move the selection, clamped to the list (used when restoring UI state)
    pub fn select(&mut self, index: usize) {
        self.selection = Some(index);
        self.clamp_selection();
    }

    /// The task list with derived display fields, in store order
    pub fn rows(&self) -> Vec<TaskRow<'_>> {
        self.store
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, task)| TaskRow {
                index: i,
                checkbox: if task.done { "\u{2713}" } else { "\u{25CB}" },
                priority: task.priority,
                priority_glyph: task.priority.glyph(),
                text: &task.text,
                done: task.done,
                selected: self.selection == Some(i),
            })
            .collect()
    }

    /// Dialog text for the current mode; None in Normal mode
    pub fn prompt(&self) -> Option<Prompt> {
        match self.mode {
            Mode::Normal => None,
            Mode::AddingTask => Some(Prompt {
                title: "Add New Task",
                hints: "enter: save \u{2022} esc: cancel",
                has_input: true,
            }),
            Mode::ArchiveConfirm => Some(Prompt {
                title: "Archive todo list?",
                hints: "y: yes \u{2022} n: no \u{2022} esc: cancel",
                has_input: false,
            }),
            Mode::ArchiveLabel => Some(Prompt {
                title: "Enter archive label (optional)",
                hints: "enter: save \u{2022} esc: cancel",
                has_input: true,
            }),
        }
    }

    /// Apply one action. Actions with no meaning in the current mode do
    /// nothing.
    ///
    /// A store error is returned after the transition completes: the mode
    /// is back to Normal and the selection is valid. Changes already made to
    /// the in-memory list are kept, except for a failed archive, which
    /// leaves the list untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, StoreError> {
        match self.mode {
            Mode::Normal => self.handle_normal(action),
            Mode::AddingTask => self.handle_adding_task(action),
            Mode::ArchiveConfirm => self.handle_archive_confirm(action),
            Mode::ArchiveLabel => self.handle_archive_label(action),
        }
    }

    fn handle_normal(&mut self, action: Action) -> Result<Outcome, StoreError> {
        match action {
            Action::NewTask => {
                self.input.clear();
                self.mode = Mode::AddingTask;
            }
            Action::Toggle => {
                if let Some(i) = self.selection {
                    self.store.toggle(i)?;
                }
            }
            Action::Delete => {
                if let Some(i) = self.selection {
                    let result = self.store.remove(i);
                    self.clamp_selection();
                    result?;
                }
            }
            Action::CyclePriority => {
                if let Some(i) = self.selection {
                    self.store.cycle_priority(i)?;
                }
            }
            Action::Save => self.store.save()?,
            Action::Archive => self.mode = Mode::ArchiveConfirm,
            Action::Quit => return Ok(Outcome::Quit),
            Action::CursorUp => {
                if let Some(i) = self.selection {
                    self.selection = Some(i.saturating_sub(1));
                }
            }
            Action::CursorDown => {
                if let Some(i) = self.selection
                    && i + 1 < self.store.len()
                {
                    self.selection = Some(i + 1);
                }
            }
            Action::CursorTop => {
                if !self.store.is_empty() {
                    self.selection = Some(0);
                }
            }
            Action::CursorBottom => {
                self.selection = self.store.len().checked_sub(1);
            }
            _ => {}
        }
        Ok(Outcome::Continue)
    }

    fn handle_adding_task(&mut self, action: Action) -> Result<Outcome, StoreError> {
        match action {
            Action::Confirm => {
                let text = self.input.take();
                self.mode = Mode::Normal;
                if !text.trim().is_empty() {
                    let result = self.store.add(&text);
                    self.selection = self.store.len().checked_sub(1);
                    result?;
                }
            }
            Action::Cancel => {
                self.input.clear();
                self.mode = Mode::Normal;
            }
            Action::Edit(edit) => self.input.apply(edit),
            _ => {}
        }
        Ok(Outcome::Continue)
    }

    fn handle_archive_confirm(&mut self, action: Action) -> Result<Outcome, StoreError> {
        match action {
            Action::Yes => {
                self.input.clear();
                self.mode = Mode::ArchiveLabel;
            }
            Action::No | Action::Cancel => self.mode = Mode::Normal,
            _ => {}
        }
        Ok(Outcome::Continue)
    }

    fn handle_archive_label(&mut self, action: Action) -> Result<Outcome, StoreError> {
        match action {
            Action::Confirm => {
                let label = self.input.take();
                self.mode = Mode::Normal;
                let path = self.store.archive(&label)?;
                self.selection = None;
                return Ok(Outcome::Archived(path));
            }
            Action::Cancel => {
                self.input.clear();
                self.mode = Mode::Normal;
            }
            Action::Edit(edit) => self.input.apply(edit),
            _ => {}
        }
        Ok(Outcome::Continue)
    }

    fn clamp_selection(&mut self) {
        self.selection = match self.store.len() {
            0 => None,
            len => Some(self.selection.unwrap_or(0).min(len - 1)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn session_with(dir: &Path, texts: &[&str]) -> Session {
        let mut store = Store::new(dir.join(".todo"));
        for t in texts {
            store.add(t).unwrap();
        }
        Session::new(store)
    }

    fn type_text(session: &mut Session, text: &str) {
        for c in text.chars() {
            session.dispatch(Action::Edit(EditAction::Insert(c))).unwrap();
        }
    }

    fn texts(session: &Session) -> Vec<String> {
        session
            .store()
            .tasks()
            .iter()
            .map(|t| t.text.clone())
            .collect()
    }

    #[test]
    fn starts_in_normal_with_first_task_selected() {
        let tmp = TempDir::new().unwrap();
        let session = session_with(tmp.path(), &["a", "b"]);
        assert_eq!(session.mode(), Mode::Normal);
        assert_eq!(session.selection(), Some(0));
        assert!(session.prompt().is_none());

        let empty = session_with(tmp.path(), &[]);
        assert_eq!(empty.selection(), None);
    }

    #[test]
    fn add_task_flow() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["first"]);

        session.dispatch(Action::NewTask).unwrap();
        assert_eq!(session.mode(), Mode::AddingTask);
        assert!(session.prompt().unwrap().has_input);

        type_text(&mut session, "  Buy milk ");
        assert_eq!(session.input(), "  Buy milk ");
        session.dispatch(Action::Confirm).unwrap();

        assert_eq!(session.mode(), Mode::Normal);
        assert_eq!(session.input(), "");
        assert_eq!(texts(&session), vec!["first", "Buy milk"]);
        assert_eq!(session.selection(), Some(1));
        assert_eq!(
            fs::read_to_string(session.store().path()).unwrap(),
            "[ ] first\n[ ] Buy milk\n"
        );
    }

    #[test]
    fn confirming_blank_input_adds_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &[]);
        session.dispatch(Action::NewTask).unwrap();
        type_text(&mut session, "   ");
        session.dispatch(Action::Confirm).unwrap();

        assert_eq!(session.mode(), Mode::Normal);
        assert!(session.store().is_empty());
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn cancelling_add_leaves_file_untouched() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["keep"]);
        let before = fs::read(session.store().path()).unwrap();

        session.dispatch(Action::NewTask).unwrap();
        type_text(&mut session, "never saved");
        session.dispatch(Action::Cancel).unwrap();

        assert_eq!(session.mode(), Mode::Normal);
        assert_eq!(session.input(), "");
        assert_eq!(fs::read(session.store().path()).unwrap(), before);
        assert_eq!(texts(&session), vec!["keep"]);
    }

    #[test]
    fn new_task_clears_leftover_input() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &[]);
        session.dispatch(Action::NewTask).unwrap();
        type_text(&mut session, "draft");
        session.dispatch(Action::Cancel).unwrap();
        session.dispatch(Action::NewTask).unwrap();
        assert_eq!(session.input(), "");
    }

    #[test]
    fn normal_keys_are_ignored_while_typing() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a"]);
        session.dispatch(Action::NewTask).unwrap();
        session.dispatch(Action::Toggle).unwrap();
        session.dispatch(Action::Delete).unwrap();
        assert_eq!(
            session.dispatch(Action::Quit).unwrap(),
            Outcome::Continue
        );
        assert_eq!(session.mode(), Mode::AddingTask);
        assert_eq!(texts(&session), vec!["a"]);
        assert!(!session.store().tasks()[0].done);
    }

    #[test]
    fn toggle_and_priority_address_selection() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a", "b"]);
        session.dispatch(Action::CursorDown).unwrap();
        session.dispatch(Action::Toggle).unwrap();
        session.dispatch(Action::CyclePriority).unwrap();
        session.dispatch(Action::CyclePriority).unwrap();

        let tasks = session.store().tasks();
        assert!(!tasks[0].done);
        assert!(tasks[1].done);
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert_eq!(
            fs::read_to_string(session.store().path()).unwrap(),
            "[ ] a\n[x] !! b\n"
        );
    }

    #[test]
    fn selection_actions_on_empty_list_are_noops() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &[]);
        for action in [
            Action::Toggle,
            Action::Delete,
            Action::CyclePriority,
            Action::CursorUp,
            Action::CursorDown,
            Action::CursorTop,
            Action::CursorBottom,
        ] {
            assert_eq!(session.dispatch(action).unwrap(), Outcome::Continue);
        }
        assert!(session.store().is_empty());
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn deleting_last_task_moves_selection_up() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a", "b", "c"]);
        session.dispatch(Action::CursorBottom).unwrap();
        assert_eq!(session.selection(), Some(2));

        session.dispatch(Action::Delete).unwrap();
        assert_eq!(session.selection(), Some(1));
        assert_eq!(texts(&session), vec!["a", "b"]);

        session.dispatch(Action::Delete).unwrap();
        session.dispatch(Action::Delete).unwrap();
        assert_eq!(session.selection(), None);
        assert!(session.store().is_empty());
    }

    #[test]
    fn deleting_middle_task_keeps_index() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a", "b", "c"]);
        session.dispatch(Action::CursorDown).unwrap();
        session.dispatch(Action::Delete).unwrap();
        assert_eq!(session.selection(), Some(1));
        assert_eq!(texts(&session), vec!["a", "c"]);
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a", "b"]);
        session.dispatch(Action::CursorUp).unwrap();
        assert_eq!(session.selection(), Some(0));
        session.dispatch(Action::CursorDown).unwrap();
        session.dispatch(Action::CursorDown).unwrap();
        assert_eq!(session.selection(), Some(1));
        session.dispatch(Action::CursorTop).unwrap();
        assert_eq!(session.selection(), Some(0));
    }

    #[test]
    fn explicit_save_rewrites_file() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a"]);
        fs::write(session.store().path(), "").unwrap();
        session.dispatch(Action::Save).unwrap();
        assert_eq!(
            fs::read_to_string(session.store().path()).unwrap(),
            "[ ] a\n"
        );
    }

    #[test]
    fn quit_ends_session() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &[]);
        assert_eq!(session.dispatch(Action::Quit).unwrap(), Outcome::Quit);
    }

    #[test]
    fn archive_flow_with_label() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a", "b"]);

        session.dispatch(Action::Archive).unwrap();
        assert_eq!(session.mode(), Mode::ArchiveConfirm);
        assert!(!session.prompt().unwrap().has_input);

        session.dispatch(Action::Yes).unwrap();
        assert_eq!(session.mode(), Mode::ArchiveLabel);
        type_text(&mut session, "backup");

        let outcome = session.dispatch(Action::Confirm).unwrap();
        let Outcome::Archived(path) = outcome else {
            panic!("expected an archive outcome");
        };

        assert_eq!(session.mode(), Mode::Normal);
        assert_eq!(session.input(), "");
        assert!(session.store().is_empty());
        assert_eq!(session.selection(), None);
        assert!(path.to_str().unwrap().ends_with(".backup"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[ ] a\n[ ] b\n");
        assert_eq!(fs::read_to_string(session.store().path()).unwrap(), "");
    }

    #[test]
    fn archive_confirm_declined() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a"]);

        session.dispatch(Action::Archive).unwrap();
        session.dispatch(Action::No).unwrap();
        assert_eq!(session.mode(), Mode::Normal);

        session.dispatch(Action::Archive).unwrap();
        session.dispatch(Action::Confirm).unwrap();
        assert_eq!(session.mode(), Mode::ArchiveConfirm);
        session.dispatch(Action::Cancel).unwrap();
        assert_eq!(session.mode(), Mode::Normal);
        assert_eq!(texts(&session), vec!["a"]);
    }

    #[test]
    fn archive_label_cancel_keeps_tasks() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a"]);
        session.dispatch(Action::Archive).unwrap();
        session.dispatch(Action::Yes).unwrap();
        type_text(&mut session, "nope");
        session.dispatch(Action::Cancel).unwrap();

        assert_eq!(session.mode(), Mode::Normal);
        assert_eq!(session.input(), "");
        assert_eq!(texts(&session), vec!["a"]);
        let entries = fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn failed_archive_returns_to_normal_and_keeps_tasks() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a"]);
        fs::remove_file(session.store().path()).unwrap();

        session.dispatch(Action::Archive).unwrap();
        session.dispatch(Action::Yes).unwrap();
        assert!(session.dispatch(Action::Confirm).is_err());

        assert_eq!(session.mode(), Mode::Normal);
        assert_eq!(texts(&session), vec!["a"]);
        assert_eq!(session.selection(), Some(0));
    }

    #[test]
    fn rows_carry_display_fields() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a", "b"]);
        session.dispatch(Action::CursorDown).unwrap();
        session.dispatch(Action::Toggle).unwrap();
        session.dispatch(Action::CyclePriority).unwrap();

        let rows = session.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].checkbox, "\u{25CB}");
        assert_eq!(rows[0].priority_glyph, "");
        assert!(!rows[0].selected);
        assert_eq!(rows[1].checkbox, "\u{2713}");
        assert_eq!(rows[1].priority_glyph, Priority::Low.glyph());
        assert!(rows[1].done);
        assert!(rows[1].selected);
        assert_eq!(rows[1].text, "b");
    }

    #[test]
    fn select_clamps_to_list() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_with(tmp.path(), &["a", "b"]);
        session.select(7);
        assert_eq!(session.selection(), Some(1));

        let mut empty = session_with(tmp.path(), &[]);
        empty.select(0);
        assert_eq!(empty.selection(), None);
    }
}
