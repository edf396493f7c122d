use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left};

/// A single edit applied to the text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Insert(char),
    /// Pasted text. Line breaks are flattened to spaces.
    InsertStr(String),
    Backspace,
    DeleteForward,
    DeleteWordBack,
    Left,
    Right,
    Home,
    End,
}

/// Single-line text buffer with a cursor kept on grapheme boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    /// Byte offset into `buffer`
    cursor: usize,
}

impl TextInput {
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Return the contents and leave the buffer empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    pub fn apply(&mut self, edit: EditAction) {
        match edit {
            EditAction::Insert(c) => {
                if c == '\n' || c == '\r' {
                    return;
                }
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            EditAction::InsertStr(text) => {
                let clean = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
                self.buffer.insert_str(self.cursor, &clean);
                self.cursor += clean.len();
            }
            EditAction::Backspace => {
                if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
                    self.buffer.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            EditAction::DeleteForward => {
                if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
                    self.buffer.replace_range(self.cursor..next, "");
                }
            }
            EditAction::DeleteWordBack => {
                let start = word_boundary_left(&self.buffer, self.cursor);
                self.buffer.replace_range(start..self.cursor, "");
                self.cursor = start;
            }
            EditAction::Left => {
                if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
                    self.cursor = prev;
                }
            }
            EditAction::Right => {
                if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
                    self.cursor = next;
                }
            }
            EditAction::Home => self.cursor = 0,
            EditAction::End => self.cursor = self.buffer.len(),
        }
    }
}
