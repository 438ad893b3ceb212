//! Reusable UI pieces

pub mod message_actions;
pub mod sidebar;

pub use message_actions::{ArboardClipboard, ClipboardSink, MessageActions, COPIED_ACK};
pub use sidebar::{sidebar_entries, SidebarEntry, SidebarState, SidebarView};
