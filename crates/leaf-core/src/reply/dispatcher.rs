//! Cancellable simulated replies
//!
//! Each request spawns a tokio task that sleeps for the simulated latency and
//! then sends the finished message back over a channel. Every request gets a
//! [`ReplyHandle`]; cancelling the handle (or every handle of a chat) makes
//! sure the reply is never delivered.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::generator::{ReplyGenerator, ReplyTiming};
use crate::chat::{ChatId, Message};

/// A reply that finished and should be added to its chat
#[derive(Debug, Clone)]
pub struct ReplyEvent {
    pub chat: ChatId,
    pub message: Message,
    /// Thread index for the reply; `None` appends
    pub position: Option<usize>,
}

/// Handle to one in-flight reply
#[derive(Debug, Clone)]
pub struct ReplyHandle {
    id: u64,
    chat: ChatId,
    token: CancellationToken,
}

impl ReplyHandle {
    pub fn chat(&self) -> &ChatId {
        &self.chat
    }

    /// Stop the reply; it will not be delivered
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

struct Finished {
    id: u64,
    event: ReplyEvent,
}

/// Issues simulated replies and tracks which are still pending
pub struct ReplyDispatcher {
    generator: ReplyGenerator,
    timing: ReplyTiming,
    tx: mpsc::UnboundedSender<Finished>,
    rx: mpsc::UnboundedReceiver<Finished>,
    pending: Vec<ReplyHandle>,
    next_id: u64,
}

impl ReplyDispatcher {
    pub fn new(timing: ReplyTiming) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            generator: ReplyGenerator::new(),
            timing,
            tx,
            rx,
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Start a reply to `prompt` in `chat`. Must be called inside a tokio runtime.
    pub fn request(&mut self, chat: ChatId, prompt: &str, model: &str) -> ReplyHandle {
        self.spawn_reply(chat, prompt, model, None)
    }

    /// Like [`request`](Self::request), but the reply is delivered for
    /// `position` in the thread. Used by retry to refill the removed slot.
    pub fn request_at(
        &mut self,
        chat: ChatId,
        prompt: &str,
        model: &str,
        position: usize,
    ) -> ReplyHandle {
        self.spawn_reply(chat, prompt, model, Some(position))
    }

    fn spawn_reply(
        &mut self,
        chat: ChatId,
        prompt: &str,
        model: &str,
        position: Option<usize>,
    ) -> ReplyHandle {
        let (content, delay) = {
            let mut rng = rand::thread_rng();
            (
                self.generator.compose_with(&mut rng, prompt, model),
                self.timing.sample(&mut rng),
            )
        };

        self.next_id += 1;
        let handle = ReplyHandle {
            id: self.next_id,
            chat: chat.clone(),
            token: CancellationToken::new(),
        };
        self.pending.push(handle.clone());

        debug!(
            chat = %chat,
            model,
            ?position,
            delay_ms = delay.as_millis() as u64,
            "Reply requested"
        );

        let token = handle.token.clone();
        let tx = self.tx.clone();
        let id = handle.id;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(chat = %chat, "Reply cancelled before delivery");
                }
                _ = tokio::time::sleep(delay) => {
                    let event = ReplyEvent {
                        chat,
                        message: Message::assistant(content),
                        position,
                    };
                    // Receiver gone means the app is shutting down
                    let _ = tx.send(Finished { id, event });
                }
            }
        });

        handle
    }

    /// Cancel every pending reply tied to `chat`. Returns how many were cancelled.
    pub fn cancel_chat(&mut self, chat: &ChatId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|handle| {
            if handle.chat() == chat {
                handle.cancel();
                false
            } else {
                true
            }
        });
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            debug!(chat = %chat, cancelled, "Cancelled pending replies");
        }
        cancelled
    }

    pub fn cancel_all(&mut self) {
        for handle in self.pending.drain(..) {
            handle.cancel();
        }
    }

    pub fn is_pending(&self, chat: &ChatId) -> bool {
        self.pending
            .iter()
            .any(|h| h.chat() == chat && !h.is_cancelled())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_cancelled()).count()
    }

    /// Accept a finished reply unless its handle was cancelled in the meantime
    fn accept(&mut self, finished: Finished) -> Option<ReplyEvent> {
        let pos = self.pending.iter().position(|h| h.id == finished.id)?;
        let handle = self.pending.remove(pos);
        if handle.is_cancelled() {
            None
        } else {
            Some(finished.event)
        }
    }

    /// Drain replies that have finished, without waiting
    pub fn try_recv(&mut self) -> Vec<ReplyEvent> {
        let mut events = Vec::new();
        while let Ok(finished) = self.rx.try_recv() {
            if let Some(event) = self.accept(finished) {
                events.push(event);
            }
        }
        events
    }

    /// Wait for the next delivered reply
    pub async fn next_event(&mut self) -> Option<ReplyEvent> {
        loop {
            let finished = self.rx.recv().await?;
            if let Some(event) = self.accept(finished) {
                return Some(event);
            }
        }
    }
}

impl Drop for ReplyDispatcher {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;
    use std::time::Duration;

    fn dispatcher() -> ReplyDispatcher {
        ReplyDispatcher::new(ReplyTiming::fixed(Duration::from_millis(1500)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_delivered_after_delay() {
        let mut replies = dispatcher();
        let chat = ChatId::from("c1");
        replies.request(chat.clone(), "hello", "GPT-4");
        assert!(replies.is_pending(&chat));
        assert!(replies.try_recv().is_empty());

        let event = tokio::time::timeout(Duration::from_secs(5), replies.next_event())
            .await
            .expect("reply should arrive")
            .expect("channel open");
        assert_eq!(event.chat, chat);
        assert_eq!(event.message.role, Role::Assistant);
        assert!(event.message.content.contains("hello"));
        assert_eq!(event.position, None);
        assert!(!replies.is_pending(&chat));
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_at_carries_position() {
        let mut replies = dispatcher();
        let chat = ChatId::from("c1");
        replies.request_at(chat.clone(), "again", "GPT-4", 1);

        let event = tokio::time::timeout(Duration::from_secs(5), replies.next_event())
            .await
            .expect("reply should arrive")
            .expect("channel open");
        assert_eq!(event.chat, chat);
        assert_eq!(event.position, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_chat_drops_reply() {
        let mut replies = dispatcher();
        let chat = ChatId::from("c1");
        let handle = replies.request(chat.clone(), "hello", "GPT-4");
        assert_eq!(replies.cancel_chat(&chat), 1);
        assert!(handle.is_cancelled());
        assert!(!replies.is_pending(&chat));

        let waited = tokio::time::timeout(Duration::from_secs(5), replies.next_event()).await;
        assert!(waited.is_err(), "cancelled reply must never arrive");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_only_affects_one_chat() {
        let mut replies = dispatcher();
        let old_chat = ChatId::from("old");
        let new_chat = ChatId::from("new");
        replies.request(old_chat.clone(), "a", "GPT-4");
        replies.request(new_chat.clone(), "b", "GPT-4");

        replies.cancel_chat(&old_chat);
        assert_eq!(replies.pending_count(), 1);

        let event = tokio::time::timeout(Duration::from_secs(5), replies.next_event())
            .await
            .expect("reply should arrive")
            .expect("channel open");
        assert_eq!(event.chat, new_chat);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_cancel_after_send_is_filtered() {
        let mut replies = ReplyDispatcher::new(ReplyTiming::fixed(Duration::from_millis(10)));
        let chat = ChatId::from("c1");
        let handle = replies.request(chat, "x", "GPT-4");

        tokio::time::sleep(Duration::from_millis(50)).await;
        tokio::task::yield_now().await;
        handle.cancel();
        assert!(replies.try_recv().is_empty());
        assert_eq!(replies.pending_count(), 0);
    }
}
