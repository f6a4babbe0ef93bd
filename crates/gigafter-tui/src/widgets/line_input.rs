//! Single-line text editing shared by the search bar and the command bar.
//!
//! The cursor is a char index, not a byte offset, so it maps directly to a
//! terminal column.

use crate::event::{AppEvent, Direction};

/// Result of feeding an event to a [`LineInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// The text changed.
    Changed,
    /// Only the cursor moved, or nothing happened.
    Unchanged,
}

#[derive(Debug, Default, Clone)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars from the start of the text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text.char_indices().nth(char_idx).map_or(self.text.len(), |(b, _)| b)
    }

    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn apply(&mut self, event: &AppEvent) -> Edit {
        match event {
            AppEvent::Char(c) => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, *c);
                self.cursor += 1;
                Edit::Changed
            }
            AppEvent::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_at(self.cursor);
                self.text.remove(at);
                Edit::Changed
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
                Edit::Unchanged
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = (self.cursor + 1).min(self.len_chars());
                Edit::Unchanged
            }
            _ => Edit::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineInput {
        let mut input = LineInput::default();
        for c in text.chars() {
            input.apply(&AppEvent::Char(c));
        }
        input
    }

    #[test]
    fn multibyte_backspace() {
        let mut input = typed("café");
        assert_eq!(input.cursor(), 4);
        assert_eq!(input.apply(&AppEvent::Backspace), Edit::Changed);
        assert_eq!(input.text(), "caf");
    }

    #[test]
    fn insert_mid_line() {
        let mut input = typed("ac");
        input.apply(&AppEvent::Nav(Direction::Left));
        input.apply(&AppEvent::Char('b'));
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn cursor_is_clamped() {
        let mut input = typed("ab");
        for _ in 0..4 {
            input.apply(&AppEvent::Nav(Direction::Right));
        }
        assert_eq!(input.cursor(), 2);
        input.clear();
        assert_eq!(input.apply(&AppEvent::Backspace), Edit::Unchanged);
        assert_eq!(input.apply(&AppEvent::Nav(Direction::Left)), Edit::Unchanged);
        assert_eq!(input.cursor(), 0);
    }
}
