//! Multi-line message composer

use crossterm::event::{KeyCode, KeyModifiers};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Continue,
    /// Enter on non-blank content; the caller decides whether to take it
    Submit,
    ContentChanged,
}

#[derive(Debug, Default)]
pub struct Composer {
    content: String,
    /// Byte offset into `content`, always on a char boundary
    cursor_position: usize,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    /// Take the content, leaving the composer empty
    pub fn take(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.content)
    }

    pub fn insert_char(&mut self, ch: char) {
        self.content.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
    }

    pub fn insert_text(&mut self, text: &str) {
        self.content.insert_str(self.cursor_position, text);
        self.cursor_position += text.len();
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        match code {
            // Shift+Enter or Alt+Enter inserts newline
            KeyCode::Enter
                if modifiers.contains(KeyModifiers::SHIFT)
                    || modifiers.contains(KeyModifiers::ALT) =>
            {
                self.insert_char('\n');
                InputAction::ContentChanged
            }
            // Some terminals send Ctrl+J for Shift+Enter
            KeyCode::Char('j') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char('\n');
                InputAction::ContentChanged
            }
            KeyCode::Enter => {
                if self.is_blank() {
                    InputAction::Continue
                } else {
                    InputAction::Submit
                }
            }
            KeyCode::Char('w') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word_backwards();
                InputAction::ContentChanged
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                InputAction::ContentChanged
            }
            KeyCode::Char('a') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_line_start();
                InputAction::Continue
            }
            KeyCode::Char('e') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_line_end();
                InputAction::Continue
            }
            KeyCode::Char('v') if modifiers.contains(KeyModifiers::CONTROL) => {
                match arboard::Clipboard::new().and_then(|mut c| c.get_text()) {
                    Ok(text) => {
                        self.insert_text(&text.replace("\r\n", "\n"));
                        InputAction::ContentChanged
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Paste failed");
                        InputAction::Continue
                    }
                }
            }
            KeyCode::Char(_) if modifiers.contains(KeyModifiers::CONTROL) => InputAction::Continue,
            KeyCode::Char(ch) => {
                self.insert_char(ch);
                InputAction::ContentChanged
            }
            KeyCode::Backspace => {
                if self.cursor_position == 0 {
                    return InputAction::Continue;
                }
                let start = self.prev_boundary(self.cursor_position);
                self.content.drain(start..self.cursor_position);
                self.cursor_position = start;
                InputAction::ContentChanged
            }
            KeyCode::Delete => {
                if self.cursor_position >= self.content.len() {
                    return InputAction::Continue;
                }
                let end = self.next_boundary(self.cursor_position);
                self.content.drain(self.cursor_position..end);
                InputAction::ContentChanged
            }
            KeyCode::Left => {
                self.cursor_position = self.prev_boundary(self.cursor_position);
                InputAction::Continue
            }
            KeyCode::Right => {
                self.cursor_position = self.next_boundary(self.cursor_position);
                InputAction::Continue
            }
            KeyCode::Home => {
                self.move_cursor_line_start();
                InputAction::Continue
            }
            KeyCode::End => {
                self.move_cursor_line_end();
                InputAction::Continue
            }
            _ => InputAction::Continue,
        }
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.content[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, pos: usize) -> usize {
        self.content[pos..]
            .chars()
            .next()
            .map(|c| pos + c.len_utf8())
            .unwrap_or(pos)
    }

    fn move_cursor_line_start(&mut self) {
        self.cursor_position = self.content[..self.cursor_position]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    fn move_cursor_line_end(&mut self) {
        self.cursor_position = self.content[self.cursor_position..]
            .find('\n')
            .map(|i| self.cursor_position + i)
            .unwrap_or(self.content.len());
    }

    fn delete_word_backwards(&mut self) {
        let before = &self.content[..self.cursor_position];
        let trimmed = before.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.content.drain(start..self.cursor_position);
        self.cursor_position = start;
    }

    /// Content broken into display lines of at most `width` columns, plus the
    /// cursor's (line, column) within them
    pub fn layout(&self, width: usize) -> (Vec<String>, (usize, usize)) {
        let width = width.max(1);
        let mut lines = vec![String::new()];
        let mut line_width = 0usize;
        let mut cursor = (0, 0);

        for (idx, ch) in self.content.char_indices() {
            if idx == self.cursor_position {
                cursor = (lines.len() - 1, line_width);
            }
            if ch == '\n' {
                lines.push(String::new());
                line_width = 0;
                continue;
            }
            let ch_width = ch.width().unwrap_or(1);
            if line_width + ch_width > width && line_width > 0 {
                lines.push(String::new());
                line_width = 0;
                if idx == self.cursor_position {
                    cursor = (lines.len() - 1, 0);
                }
            }
            if let Some(line) = lines.last_mut() {
                line.push(ch);
            }
            line_width += ch_width;
        }
        if self.cursor_position >= self.content.len() {
            cursor = (lines.len() - 1, line_width);
        }
        (lines, cursor)
    }
}
