//! Chat data structures

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest title derived from a first message before it gets an ellipsis
pub const TITLE_MAX_CHARS: usize = 50;

/// Title given to chats created empty
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// Name given to freshly created folders
pub const DEFAULT_FOLDER_NAME: &str = "New Folder";

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifies a chat
    ChatId
);
opaque_id!(
    /// Identifies a folder in the sidebar
    FolderId
);
opaque_id!(
    /// Identifies a single message; used as the retry key
    MessageId
);

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Clock time shown under the message bubble
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// A conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Local>,
    /// None means the chat sits in the unorganized list
    pub folder_id: Option<FolderId>,
}

impl Chat {
    pub fn new(title: impl Into<String>, folder_id: Option<FolderId>) -> Self {
        Self {
            id: ChatId::generate(),
            title: title.into(),
            messages: Vec::new(),
            created_at: Local::now(),
            folder_id,
        }
    }

    pub fn has_started(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }
}

/// A sidebar folder grouping chats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub created_at: DateTime<Local>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FolderId::generate(),
            name: name.into(),
            created_at: Local::now(),
        }
    }
}

/// Title for a chat started from its first message: the trimmed text cut to
/// [`TITLE_MAX_CHARS`] characters, with "..." appended when cut.
pub fn title_from_message(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        let cut: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_kept() {
        assert_eq!(title_from_message("  hello there \n"), "hello there");
    }

    #[test]
    fn test_long_title_truncated() {
        let text = "a".repeat(60);
        let title = title_from_message(&text);
        assert_eq!(title, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_title_exactly_at_limit() {
        let text = "é".repeat(50);
        assert_eq!(title_from_message(&text), text);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ChatId::generate(), ChatId::generate());
        assert_eq!(MessageId::from("m1").to_string(), "m1");
    }

    #[test]
    fn test_time_label_format() {
        let msg = Message::user("hi");
        let label = msg.time_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }
}
