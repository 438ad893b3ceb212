//! Chat, folder and message operations

use leaf_core::chat::{ChatId, FolderId, Message, MessageId};

use crate::tui::app::{App, Focus, Popup};
use crate::tui::components::{sidebar_entries, SidebarEntry};
use crate::tui::utils::RenameTarget;

impl App {
    /// Switch the thread to `id`, abandoning replies owed to the previous chat
    pub fn open_chat(&mut self, id: ChatId) {
        if self.current_chat.as_ref() == Some(&id) {
            return;
        }
        if let Some(previous) = self.current_chat.take() {
            self.replies.cancel_chat(&previous);
        }
        tracing::debug!(chat = %id, "Opened chat");
        self.current_chat = Some(id);
        self.selected_reply = None;
    }

    /// Create an empty chat and make it current
    pub fn new_chat(&mut self, folder: Option<FolderId>) {
        match self.store.new_chat(folder) {
            Ok(id) => {
                self.open_chat(id);
                self.focus = Focus::Composer;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to create chat"),
        }
    }

    /// Send the composer content as a user message and request a reply
    pub fn submit_message(&mut self) {
        if self.composer.is_blank() || self.reply_pending() {
            return;
        }
        let content = self.composer.take();
        let text = content.trim();

        let appended = match self.current_chat.clone() {
            Some(id) => match self.store.push_message(&id, Message::user(text)) {
                Ok(()) => Some(id),
                Err(e) => {
                    tracing::warn!(error = %e, "Current chat vanished");
                    None
                }
            },
            None => None,
        };
        let chat_id = match appended {
            Some(id) => id,
            None => match self.store.start_chat(Message::user(text), None) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to start chat");
                    return;
                }
            },
        };

        self.open_chat(chat_id.clone());
        self.replies.request(chat_id, text, &self.model);
        self.selected_reply = None;
    }

    /// Regenerate reply `id` of the current chat from the prompt before it
    pub fn retry_reply(&mut self, id: &MessageId) {
        let Some(chat_id) = self.current_chat.clone() else {
            return;
        };
        if self.replies.is_pending(&chat_id) {
            return;
        }
        match self.store.take_retry_prompt(&chat_id, id) {
            Ok(retry) => {
                tracing::info!(chat = %chat_id, message = %id, "Retrying reply");
                self.replies
                    .request_at(chat_id, &retry.prompt, &self.model, retry.position);
                self.selected_reply = None;
            }
            Err(e) => tracing::warn!(error = %e, "Retry failed"),
        }
    }

    /// Copy the selected reply's raw text
    pub fn copy_selected(&mut self) {
        let Some(id) = self.selected_reply_id() else {
            return;
        };
        let raw = self
            .current_chat
            .as_ref()
            .and_then(|c| self.store.chat(c))
            .and_then(|c| c.message(&id))
            .map(|m| m.content.clone());
        if let Some(raw) = raw {
            self.message_actions.copy(&id, &raw, self.clipboard.as_mut());
        }
    }

    pub fn retry_selected(&mut self) {
        let Some(id) = self.selected_reply_id() else {
            return;
        };
        let mut requested = None;
        self.message_actions
            .retry(&id, |m| requested = Some(m.clone()));
        if let Some(id) = requested {
            self.retry_reply(&id);
        }
    }

    /// Move the reply selection by `delta`, clamped to the thread
    pub fn select_reply(&mut self, delta: isize) {
        let count = self.assistant_messages().len();
        if count == 0 {
            self.selected_reply = None;
            return;
        }
        let next = match self.selected_reply {
            None if delta < 0 => count - 1,
            None => 0,
            Some(idx) => idx.saturating_add_signed(delta).min(count - 1),
        };
        self.selected_reply = Some(next);
    }

    pub fn sidebar_entries(&self) -> Vec<SidebarEntry> {
        sidebar_entries(&self.store, &self.sidebar)
    }

    pub fn selected_entry(&self) -> Option<SidebarEntry> {
        self.sidebar_entries().get(self.sidebar.selected).cloned()
    }

    /// Enter on a sidebar entry
    pub fn activate_entry(&mut self, entry: SidebarEntry) {
        match entry {
            SidebarEntry::NewChat => self.new_chat(None),
            SidebarEntry::Search => {
                if !self.sidebar.open {
                    self.sidebar.toggle();
                }
                self.sidebar.searching = true;
            }
            SidebarEntry::NewFolder => self.new_folder(),
            SidebarEntry::Folder(id) => self.sidebar.toggle_folder(&id),
            SidebarEntry::FolderChat { chat, .. } | SidebarEntry::Chat(chat) => {
                self.open_chat(chat);
                self.focus = Focus::Composer;
            }
            SidebarEntry::Settings => self.open_theme_popup(),
        }
    }

    pub fn new_folder(&mut self) {
        let id = self.store.new_folder();
        let entries = self.sidebar_entries();
        self.sidebar
            .select(&entries, &SidebarEntry::Folder(id));
    }

    /// New chat inside the selected folder, if any
    pub fn new_chat_in_selection(&mut self) {
        let folder = self.selected_entry().and_then(|e| e.folder_id().cloned());
        if let Some(folder) = &folder {
            self.sidebar.expanded.insert(folder.clone());
        }
        self.new_chat(folder);
    }

    /// Open the title editor on the selected chat or folder
    pub fn start_rename(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let (target, current) = match entry {
            SidebarEntry::Folder(id) => {
                let name = self.store.folder(&id).map(|f| f.name.clone());
                (RenameTarget::Folder(id), name)
            }
            SidebarEntry::FolderChat { chat, .. } | SidebarEntry::Chat(chat) => {
                let title = self.store.chat(&chat).map(|c| c.title.clone());
                (RenameTarget::Chat(chat), title)
            }
            _ => return,
        };
        if let Some(current) = current {
            self.title_editor.start(target, &current);
        }
    }

    pub fn finish_rename(&mut self) {
        let Some((target, title)) = self.title_editor.finish() else {
            return;
        };
        let result = match &target {
            RenameTarget::Chat(id) => self.store.rename_chat(id, &title),
            RenameTarget::Folder(id) => self.store.rename_folder(id, &title),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Rename failed");
        }
    }

    /// Delete the selected chat or folder
    pub fn delete_selected(&mut self) {
        match self.selected_entry() {
            Some(SidebarEntry::FolderChat { chat, .. } | SidebarEntry::Chat(chat)) => {
                self.replies.cancel_chat(&chat);
                if let Err(e) = self.store.delete_chat(&chat) {
                    tracing::warn!(error = %e, "Delete failed");
                    return;
                }
                if self.current_chat.as_ref() == Some(&chat) {
                    self.current_chat = None;
                    self.selected_reply = None;
                }
            }
            Some(SidebarEntry::Folder(folder)) => {
                if let Err(e) = self.store.delete_folder(&folder) {
                    tracing::warn!(error = %e, "Delete failed");
                    return;
                }
                self.sidebar.expanded.remove(&folder);
            }
            _ => return,
        }
        let len = self.sidebar_entries().len();
        self.sidebar.clamp(len);
    }

    /// Move the selected chat to the next folder, wrapping through "no folder"
    pub fn move_selected(&mut self) {
        let Some(chat_id) = self.selected_entry().and_then(|e| e.chat_id().cloned()) else {
            return;
        };
        let Some(current) = self.store.chat(&chat_id).map(|c| c.folder_id.clone()) else {
            return;
        };
        let folders: Vec<FolderId> = self.store.folders().iter().map(|f| f.id.clone()).collect();
        let target = match current {
            None => folders.first().cloned(),
            Some(folder) => folders
                .iter()
                .position(|f| f == &folder)
                .and_then(|pos| folders.get(pos + 1).cloned()),
        };
        if let Err(e) = self.store.move_chat(&chat_id, target.clone()) {
            tracing::warn!(error = %e, "Move failed");
            return;
        }

        let entries = self.sidebar_entries();
        let entry = match target {
            Some(folder) if self.sidebar.expanded.contains(&folder) => SidebarEntry::FolderChat {
                chat: chat_id,
                folder,
            },
            Some(folder) => SidebarEntry::Folder(folder),
            None => SidebarEntry::Chat(chat_id),
        };
        self.sidebar.select(&entries, &entry);
        self.sidebar.clamp(entries.len());
    }

    pub fn open_theme_popup(&mut self) {
        self.theme_popup.open(self.theme_id);
        self.popup = Popup::ThemeSelect;
    }

    /// The model can only change before the first message
    pub fn open_model_popup(&mut self) {
        if self.chat_started() {
            tracing::debug!("Model is fixed once a chat has started");
            return;
        }
        self.model_popup.open(&self.model);
        self.popup = Popup::ModelSelect;
    }
}
