//! Event handlers for the TUI
//!
//! Each file adds an `impl App` block for one concern.

pub mod chats;
pub mod event_loop;
pub mod keyboard;
pub mod popup_keys;
pub mod rendering;
