use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// Cursor moved or nothing happened.
    Continue,
    /// Text changed; results need refreshing.
    Edited,
    SelectNext,
    SelectPrev,
    Submit,
    Cancel,
}

/// Single-line search field with cursor editing and a selected result row.
#[derive(Default)]
pub struct SearchBox {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    pub selected: usize,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.selected = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Down => return InputResult::SelectNext,
            KeyCode::Up => return InputResult::SelectPrev,
            KeyCode::Tab => return InputResult::SelectNext,
            KeyCode::BackTab => return InputResult::SelectPrev,

            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                let len = self.text.chars().count();
                if self.cursor < len {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.remove_char_at(self.cursor - 1);
                    self.cursor -= 1;
                    return self.edited();
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.chars().count() {
                    self.remove_char_at(self.cursor);
                    return self.edited();
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.text.chars().count();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.clear();
                self.cursor = 0;
                return self.edited();
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.delete_word_back() {
                    return self.edited();
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let byte_offset = self.char_to_byte(self.cursor);
                self.text.insert(byte_offset, ch);
                self.cursor += 1;
                return self.edited();
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn edited(&mut self) -> InputResult {
        self.selected = 0;
        InputResult::Edited
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_char_at(&mut self, char_idx: usize) {
        let byte_offset = self.char_to_byte(char_idx);
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn typed(text: &str) -> SearchBox {
        let mut input = SearchBox::new();
        for ch in text.chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
        input
    }

    #[test]
    fn typing_reports_edits() {
        let mut input = SearchBox::new();
        assert_eq!(input.handle(key(KeyCode::Char('h'))), InputResult::Edited);
        assert_eq!(input.handle(key(KeyCode::Left)), InputResult::Continue);
        assert_eq!(input.value(), "h");
    }

    #[test]
    fn insert_in_middle() {
        let mut input = typed("hml");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Char('t')));
        assert_eq!(input.value(), "html");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_at_boundaries() {
        let mut input = typed("ab");
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        assert_eq!(input.handle(key(KeyCode::Backspace)), InputResult::Continue);
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn delete_at_end_is_noop() {
        let mut input = typed("ab");
        assert_eq!(input.handle(key(KeyCode::Delete)), InputResult::Continue);
        input.handle(key(KeyCode::Home));
        assert_eq!(input.handle(key(KeyCode::Delete)), InputResult::Edited);
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn ctrl_w_and_ctrl_u() {
        let mut input = typed("web apis");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "web ");
        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn edits_reset_selection() {
        let mut input = typed("ht");
        input.selected = 3;
        input.handle(key(KeyCode::Char('m')));
        assert_eq!(input.selected, 0);
    }

    #[test]
    fn navigation_keys_map_to_results() {
        let mut input = SearchBox::new();
        assert_eq!(input.handle(key(KeyCode::Down)), InputResult::SelectNext);
        assert_eq!(input.handle(key(KeyCode::Up)), InputResult::SelectPrev);
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn render_parts_splits_at_cursor() {
        let mut input = typed("héllo");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Right));
        assert_eq!(input.render_parts(), ("h", Some('é'), "llo"));
        input.handle(key(KeyCode::End));
        assert_eq!(input.render_parts(), ("héllo", None, ""));
    }
}
