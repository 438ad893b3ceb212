//! In-memory chat and folder store
//!
//! Chats are kept newest first, folders in creation order. Nothing here is
//! written to disk.

use thiserror::Error;

use super::types::{
    title_from_message, Chat, ChatId, Folder, FolderId, Message, MessageId, Role,
    DEFAULT_CHAT_TITLE, DEFAULT_FOLDER_NAME,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat {0} not found")]
    ChatNotFound(ChatId),
    #[error("folder {0} not found")]
    FolderNotFound(FolderId),
    #[error("message {0} not found")]
    MessageNotFound(MessageId),
    #[error("message {0} is not an assistant reply")]
    NotAReply(MessageId),
    #[error("no user message precedes reply {0}")]
    NoPromptForReply(MessageId),
    #[error("title cannot be empty")]
    EmptyTitle,
}

/// What a retry needs: the prompt to answer again and the slot the removed
/// reply occupied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPrompt {
    pub prompt: String,
    pub position: usize,
}

/// All chats and folders of the running session
#[derive(Debug, Default)]
pub struct ChatStore {
    chats: Vec<Chat>,
    folders: Vec<Folder>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All chats, newest first
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn chat(&self, id: &ChatId) -> Option<&Chat> {
        self.chats.iter().find(|c| &c.id == id)
    }

    pub fn chat_mut(&mut self, id: &ChatId) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|c| &c.id == id)
    }

    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    fn require_chat_mut(&mut self, id: &ChatId) -> Result<&mut Chat, ChatError> {
        self.chats
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ChatError::ChatNotFound(id.clone()))
    }

    fn require_folder(&self, id: &FolderId) -> Result<(), ChatError> {
        if self.folder(id).is_some() {
            Ok(())
        } else {
            Err(ChatError::FolderNotFound(id.clone()))
        }
    }

    /// Create an empty chat titled "New Chat", optionally inside a folder
    pub fn new_chat(&mut self, folder: Option<FolderId>) -> Result<ChatId, ChatError> {
        if let Some(folder_id) = &folder {
            self.require_folder(folder_id)?;
        }
        let chat = Chat::new(DEFAULT_CHAT_TITLE, folder);
        let id = chat.id.clone();
        tracing::info!(chat = %id, "Created chat");
        self.chats.insert(0, chat);
        Ok(id)
    }

    /// Create a chat from its first user message; the title comes from the text
    pub fn start_chat(
        &mut self,
        first_message: Message,
        folder: Option<FolderId>,
    ) -> Result<ChatId, ChatError> {
        if let Some(folder_id) = &folder {
            self.require_folder(folder_id)?;
        }
        let mut chat = Chat::new(title_from_message(&first_message.content), folder);
        chat.messages.push(first_message);
        let id = chat.id.clone();
        tracing::info!(chat = %id, title = %chat.title, "Started chat");
        self.chats.insert(0, chat);
        Ok(id)
    }

    /// Append a message. The title is left alone, so an empty chat keeps
    /// "New Chat" until it is renamed.
    pub fn push_message(&mut self, chat_id: &ChatId, message: Message) -> Result<(), ChatError> {
        self.require_chat_mut(chat_id)?.messages.push(message);
        Ok(())
    }

    /// Insert a message at `index`, or append it when `index` is past the end
    pub fn insert_message_at(
        &mut self,
        chat_id: &ChatId,
        index: usize,
        message: Message,
    ) -> Result<(), ChatError> {
        let messages = &mut self.require_chat_mut(chat_id)?.messages;
        let index = index.min(messages.len());
        messages.insert(index, message);
        Ok(())
    }

    pub fn new_folder(&mut self) -> FolderId {
        let folder = Folder::new(DEFAULT_FOLDER_NAME);
        let id = folder.id.clone();
        tracing::info!(folder = %id, "Created folder");
        self.folders.push(folder);
        id
    }

    pub fn rename_chat(&mut self, id: &ChatId, title: &str) -> Result<(), ChatError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::EmptyTitle);
        }
        self.require_chat_mut(id)?.title = title.to_string();
        Ok(())
    }

    pub fn rename_folder(&mut self, id: &FolderId, name: &str) -> Result<(), ChatError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChatError::EmptyTitle);
        }
        let folder = self
            .folders
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| ChatError::FolderNotFound(id.clone()))?;
        folder.name = name.to_string();
        Ok(())
    }

    pub fn delete_chat(&mut self, id: &ChatId) -> Result<Chat, ChatError> {
        let pos = self
            .chats
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| ChatError::ChatNotFound(id.clone()))?;
        tracing::info!(chat = %id, "Deleted chat");
        Ok(self.chats.remove(pos))
    }

    /// Delete a folder; its chats move back to the unorganized list
    pub fn delete_folder(&mut self, id: &FolderId) -> Result<Folder, ChatError> {
        let pos = self
            .folders
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| ChatError::FolderNotFound(id.clone()))?;
        for chat in self.chats.iter_mut() {
            if chat.folder_id.as_ref() == Some(id) {
                chat.folder_id = None;
            }
        }
        tracing::info!(folder = %id, "Deleted folder");
        Ok(self.folders.remove(pos))
    }

    /// Move a chat into a folder, or out of any folder with `None`
    pub fn move_chat(&mut self, id: &ChatId, target: Option<FolderId>) -> Result<(), ChatError> {
        if let Some(folder_id) = &target {
            self.require_folder(folder_id)?;
        }
        let chat = self.require_chat_mut(id)?;
        tracing::debug!(chat = %id, folder = ?target, "Moved chat");
        chat.folder_id = target;
        Ok(())
    }

    pub fn chats_in<'a>(&'a self, folder: &'a FolderId) -> impl Iterator<Item = &'a Chat> + 'a {
        self.chats
            .iter()
            .filter(move |c| c.folder_id.as_ref() == Some(folder))
    }

    /// Chats that are not inside any folder
    pub fn unorganized(&self) -> impl Iterator<Item = &Chat> {
        self.chats.iter().filter(|c| c.folder_id.is_none())
    }

    /// Unorganized chats whose title contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Chat> {
        let needle = query.to_lowercase();
        self.unorganized()
            .filter(|c| needle.is_empty() || c.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Prepare a retry: remove the given assistant reply and return the text
    /// of the closest user message before it, plus the index the reply had.
    pub fn take_retry_prompt(
        &mut self,
        chat_id: &ChatId,
        reply_id: &MessageId,
    ) -> Result<RetryPrompt, ChatError> {
        let chat = self.require_chat_mut(chat_id)?;
        let pos = chat
            .messages
            .iter()
            .position(|m| &m.id == reply_id)
            .ok_or_else(|| ChatError::MessageNotFound(reply_id.clone()))?;
        if chat.messages[pos].role != Role::Assistant {
            return Err(ChatError::NotAReply(reply_id.clone()));
        }
        let prompt = chat.messages[..pos]
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .ok_or_else(|| ChatError::NoPromptForReply(reply_id.clone()))?;
        chat.messages.remove(pos);
        Ok(RetryPrompt {
            prompt,
            position: pos,
        })
    }
}
