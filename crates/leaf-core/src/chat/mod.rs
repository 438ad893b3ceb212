//! Chats, folders and messages

mod store;
mod types;

pub use store::{ChatError, ChatStore, RetryPrompt};
pub use types::{
    title_from_message, Chat, ChatId, Folder, FolderId, Message, MessageId, Role,
    DEFAULT_CHAT_TITLE, DEFAULT_FOLDER_NAME, TITLE_MAX_CHARS,
};
