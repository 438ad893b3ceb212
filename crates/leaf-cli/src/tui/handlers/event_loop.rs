//! Tick handlers
//!
//! Reply delivery and timed UI state, run once per loop tick.

use std::time::Instant;

use crate::tui::app::App;

impl App {
    /// Deliver finished replies into their chats. Returns true if any arrived.
    pub fn poll_replies(&mut self) -> bool {
        let events = self.replies.try_recv();
        let delivered = !events.is_empty();
        for event in events {
            let chat = event.chat.clone();
            let result = match event.position {
                Some(index) => self.store.insert_message_at(&chat, index, event.message),
                None => self.store.push_message(&chat, event.message),
            };
            match result {
                Ok(()) => tracing::debug!(chat = %chat, "Reply delivered"),
                Err(e) => tracing::debug!(error = %e, "Dropping reply for missing chat"),
            }
        }
        delivered
    }

    pub fn on_tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        self.poll_replies();
        self.message_actions.tick(Instant::now());
        let len = self.sidebar_entries().len();
        self.sidebar.clamp(len);
    }
}
