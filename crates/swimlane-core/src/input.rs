//! Single-line text buffer used by dialogs and the filter bar.

#[derive(Debug, Clone, Default)]
pub struct InputState {
    buffer: String,
    /// Byte offset, always on a char boundary.
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set(text.into());
        input
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.buffer[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.buffer.len();
    }

    /// Return the buffer contents and reset to empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters, for terminal placement.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_editing() {
        let mut input = InputState::new();
        for c in "Wrte".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.move_left();
        input.insert_char('i');
        assert_eq!(input.as_str(), "Write");
        assert_eq!(input.cursor_column(), 3);

        input.move_end();
        input.backspace();
        assert_eq!(input.as_str(), "Writ");
    }

    #[test]
    fn test_backspace_and_delete_at_edges_are_noops() {
        let mut input = InputState::with_text("ab");
        input.delete();
        assert_eq!(input.as_str(), "ab");

        input.move_home();
        input.backspace();
        assert_eq!(input.as_str(), "ab");
        input.delete();
        assert_eq!(input.as_str(), "b");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut input = InputState::with_text("día");
        assert_eq!(input.cursor_column(), 3);
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor_column(), 1);
        input.delete();
        assert_eq!(input.as_str(), "da");
    }

    #[test]
    fn test_take_resets() {
        let mut input = InputState::with_text("blocked on review");
        assert_eq!(input.take(), "blocked on review");
        assert!(input.is_empty());
        assert_eq!(input.cursor_column(), 0);
    }
}
