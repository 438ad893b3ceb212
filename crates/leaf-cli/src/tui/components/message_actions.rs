//! Copy and retry affordances under assistant messages

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use leaf_core::chat::MessageId;

/// How long the "copied" acknowledgement stays visible
pub const COPIED_ACK: Duration = Duration::from_secs(2);

/// Somewhere copied text can go
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard, opened per copy
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ClipboardSink for ArboardClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to write clipboard")
    }
}

/// Copy/retry state for the thread
#[derive(Debug, Default)]
pub struct MessageActions {
    copied: Option<(MessageId, Instant)>,
}

impl MessageActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the raw message text. Returns whether it reached the clipboard.
    pub fn copy(&mut self, id: &MessageId, raw: &str, sink: &mut dyn ClipboardSink) -> bool {
        self.copy_at(id, raw, sink, Instant::now())
    }

    pub fn copy_at(
        &mut self,
        id: &MessageId,
        raw: &str,
        sink: &mut dyn ClipboardSink,
        now: Instant,
    ) -> bool {
        match sink.set_text(raw) {
            Ok(()) => {
                tracing::debug!(message = %id, "Copied message");
                self.copied = Some((id.clone(), now));
                true
            }
            Err(e) => {
                tracing::warn!(message = %id, error = %e, "Failed to copy message");
                false
            }
        }
    }

    /// Whether `id` should show its "copied" acknowledgement at `now`
    pub fn is_copied(&self, id: &MessageId, now: Instant) -> bool {
        matches!(&self.copied, Some((copied, at)) if copied == id && now.duration_since(*at) < COPIED_ACK)
    }

    /// Clear an expired acknowledgement. Returns true if one is still showing.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some((_, at)) = &self.copied {
            if now.duration_since(*at) >= COPIED_ACK {
                self.copied = None;
            }
        }
        self.copied.is_some()
    }

    /// Hand the message id to the retry callback
    pub fn retry(&self, id: &MessageId, on_retry: impl FnOnce(&MessageId)) {
        tracing::debug!(message = %id, "Retry requested");
        on_retry(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryClipboard {
        text: Option<String>,
    }

    impl ClipboardSink for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            anyhow::bail!("no display")
        }
    }

    #[test]
    fn test_copy_writes_raw_text_and_acknowledges() {
        let mut actions = MessageActions::new();
        let mut sink = MemoryClipboard::default();
        let id = MessageId::from("m1");
        let now = Instant::now();

        assert!(actions.copy_at(&id, "**raw** text", &mut sink, now));
        assert_eq!(sink.text.as_deref(), Some("**raw** text"));
        assert!(actions.is_copied(&id, now));
        assert!(!actions.is_copied(&MessageId::from("m2"), now));
    }

    #[test]
    fn test_acknowledgement_expires_after_two_seconds() {
        let mut actions = MessageActions::new();
        let id = MessageId::from("m1");
        let now = Instant::now();
        actions.copy_at(&id, "x", &mut MemoryClipboard::default(), now);

        assert!(actions.tick(now + Duration::from_millis(1999)));
        assert!(actions.is_copied(&id, now + Duration::from_millis(1999)));
        assert!(!actions.tick(now + COPIED_ACK));
        assert!(!actions.is_copied(&id, now + COPIED_ACK));
    }

    #[test]
    fn test_failed_copy_leaves_state_untouched() {
        let mut actions = MessageActions::new();
        let id = MessageId::from("m1");
        let now = Instant::now();
        assert!(!actions.copy_at(&id, "x", &mut BrokenClipboard, now));
        assert!(!actions.is_copied(&id, now));
    }

    #[test]
    fn test_retry_passes_id() {
        let actions = MessageActions::new();
        let id = MessageId::from("m9");
        let mut seen = None;
        actions.retry(&id, |m| seen = Some(m.clone()));
        assert_eq!(seen, Some(id));
    }
}
