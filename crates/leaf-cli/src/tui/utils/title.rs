//! Inline rename editor for chats and folders

use crossterm::event::{KeyCode, KeyModifiers};

const MAX_TITLE_CHARS: usize = 80;

/// Result of handling a key while renaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleAction {
    Continue,
    Save,
    Cancel,
}

/// What is being renamed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameTarget {
    Chat(leaf_core::chat::ChatId),
    Folder(leaf_core::chat::FolderId),
}

#[derive(Debug, Default)]
pub struct TitleEditor {
    pub target: Option<RenameTarget>,
    pub buffer: String,
}

impl TitleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.target.is_some()
    }

    pub fn start(&mut self, target: RenameTarget, current: &str) {
        self.target = Some(target);
        self.buffer = current.to_string();
    }

    pub fn cancel(&mut self) {
        self.target = None;
        self.buffer.clear();
    }

    /// Stop editing. Returns the target and trimmed title unless it is empty.
    pub fn finish(&mut self) -> Option<(RenameTarget, String)> {
        let target = self.target.take()?;
        let title = std::mem::take(&mut self.buffer);
        let title = title.trim();
        if title.is_empty() {
            None
        } else {
            Some((target, title.to_string()))
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> TitleAction {
        match code {
            KeyCode::Enter => TitleAction::Save,
            KeyCode::Esc => TitleAction::Cancel,
            KeyCode::Backspace => {
                self.buffer.pop();
                TitleAction::Continue
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                if self.buffer.chars().count() < MAX_TITLE_CHARS {
                    self.buffer.push(c);
                }
                TitleAction::Continue
            }
            _ => TitleAction::Continue,
        }
    }
}
