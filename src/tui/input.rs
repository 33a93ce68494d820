//! Edit buffer for text controls.
//!
//! Holds a copy of a control's value while the user edits it in place. The
//! app pushes the buffer back into the control after every change.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Text being edited, with a byte-offset cursor
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    content: String,
    cursor: usize,
    /// Whether Enter inserts a line break
    multiline: bool,
}

impl EditBuffer {
    /// Start editing `content` with the cursor at the end
    pub fn new(content: &str, multiline: bool) -> Self {
        Self {
            content: content.to_string(),
            cursor: content.len(),
            multiline,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Line and column of the cursor, both zero-based
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        let column = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0);
        (line, column)
    }

    pub fn insert(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text; line breaks are flattened to spaces in single-line mode
    pub fn insert_str(&mut self, text: &str) {
        let text = if self.multiline {
            text.replace("\r\n", "\n")
        } else {
            text.replace("\r\n", " ").replace('\n', " ")
        };
        self.content.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary(self.cursor);
            self.content.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    /// Move to the start of the current line
    pub fn move_home(&mut self) {
        self.cursor = self.content[..self.cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
    }

    /// Move to the end of the current line
    pub fn move_end(&mut self) {
        self.cursor = self.content[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.content.len());
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Apply an editing key; returns whether the content changed
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let before = self.content.len();
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let changed = !self.content.is_empty();
                self.clear();
                return changed;
            }
            KeyCode::Char(c) => {
                self.insert(c);
                return true;
            }
            KeyCode::Enter if self.multiline => {
                self.insert('\n');
                return true;
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => {}
        }
        self.content.len() != before
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut idx = pos.saturating_sub(1);
        while idx > 0 && !self.content.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut idx = pos + 1;
        while idx < self.content.len() && !self.content.is_char_boundary(idx) {
            idx += 1;
        }
        idx.min(self.content.len())
    }
}
