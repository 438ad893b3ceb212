//! Application state and the main event loop

use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use leaf_core::chat::{ChatId, ChatStore, Message, MessageId, Role};
use leaf_core::reply::ReplyDispatcher;
use leaf_core::{Config, ThemeId};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::tui::components::{ArboardClipboard, ClipboardSink, MessageActions, SidebarState};
use crate::tui::input::Composer;
use crate::tui::markdown::MarkdownCache;
use crate::tui::popups::{ModelSelectPopup, ThemeSelectPopup};
use crate::tui::themes::{theme_for, Theme};
use crate::tui::utils::TitleEditor;

const TICK: Duration = Duration::from_millis(100);

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Thread,
    Composer,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Thread,
            Focus::Thread => Focus::Composer,
            Focus::Composer => Focus::Sidebar,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Composer,
            Focus::Thread => Focus::Sidebar,
            Focus::Composer => Focus::Thread,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    ThemeSelect,
    ModelSelect,
}

pub struct App {
    pub store: ChatStore,
    /// None shows the welcome screen; the first message starts a chat
    pub current_chat: Option<ChatId>,
    pub theme_id: ThemeId,
    pub model: String,

    pub focus: Focus,
    pub popup: Popup,
    pub sidebar: SidebarState,
    pub title_editor: TitleEditor,
    pub composer: Composer,

    pub replies: ReplyDispatcher,
    pub message_actions: MessageActions,
    pub clipboard: Box<dyn ClipboardSink>,
    pub markdown_cache: MarkdownCache,

    pub theme_popup: ThemeSelectPopup,
    pub model_popup: ModelSelectPopup,

    /// Index into the current chat's assistant messages
    pub selected_reply: Option<usize>,
    /// Advances every tick, drives the typing indicator
    pub frame: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            store: ChatStore::new(),
            current_chat: None,
            theme_id: config.theme,
            model: config.model.clone(),
            focus: Focus::Composer,
            popup: Popup::None,
            sidebar: SidebarState::new(config.sidebar.open),
            title_editor: TitleEditor::new(),
            composer: Composer::new(),
            replies: ReplyDispatcher::new(config.reply_timing()),
            message_actions: MessageActions::new(),
            clipboard: Box::new(ArboardClipboard),
            markdown_cache: MarkdownCache::new(),
            theme_popup: ThemeSelectPopup::new(),
            model_popup: ModelSelectPopup::new(),
            selected_reply: None,
            frame: 0,
            should_quit: false,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn theme(&self) -> &'static Theme {
        theme_for(self.theme_id)
    }

    /// Whether the current chat already has messages
    pub fn chat_started(&self) -> bool {
        self.current_chat
            .as_ref()
            .and_then(|id| self.store.chat(id))
            .is_some_and(|c| c.has_started())
    }

    pub fn reply_pending(&self) -> bool {
        self.current_chat
            .as_ref()
            .is_some_and(|id| self.replies.is_pending(id))
    }

    /// Assistant messages of the current chat, in thread order
    pub fn assistant_messages(&self) -> Vec<&Message> {
        self.current_chat
            .as_ref()
            .and_then(|id| self.store.chat(id))
            .map(|c| c.messages.iter().filter(|m| m.role == Role::Assistant).collect())
            .unwrap_or_default()
    }

    pub fn selected_reply_id(&self) -> Option<MessageId> {
        let index = self.selected_reply?;
        self.assistant_messages().get(index).map(|m| m.id.clone())
    }

    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);

        while !self.should_quit {
            terminal.draw(|f| self.ui(f))?;

            tokio::select! {
                _ = tick.tick() => self.on_tick(),
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            }
        }

        self.replies.cancel_all();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::bail;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    /// Clipboard that records into shared memory
    #[derive(Clone, Default)]
    pub struct SharedClipboard(pub Arc<Mutex<Option<String>>>);

    impl ClipboardSink for SharedClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            match self.0.lock() {
                Ok(mut slot) => {
                    *slot = Some(text.to_string());
                    Ok(())
                }
                Err(_) => bail!("poisoned"),
            }
        }
    }

    pub fn test_app() -> (App, SharedClipboard) {
        let clipboard = SharedClipboard::default();
        let mut config = Config::default();
        config.reply.min_delay_ms = 1000;
        config.reply.max_delay_ms = 1000;
        let app = App::new(&config).with_clipboard(Box::new(clipboard.clone()));
        (app, clipboard)
    }

    pub fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.composer.insert_char(ch);
        }
    }

    pub async fn wait_for_reply(app: &mut App) {
        tokio::time::sleep(Duration::from_millis(1100)).await;
        tokio::task::yield_now().await;
        app.poll_replies();
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_message_starts_chat_and_gets_reply() {
        let (mut app, _) = test_app();
        type_text(&mut app, "  Tell me about moss  ");
        app.submit_message();

        let id = app.current_chat.clone().unwrap();
        let chat = app.store.chat(&id).unwrap();
        assert_eq!(chat.title, "Tell me about moss");
        assert_eq!(chat.messages.len(), 1);
        assert!(app.reply_pending());
        assert!(app.composer.is_blank());

        wait_for_reply(&mut app).await;
        let chat = app.store.chat(&id).unwrap();
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].role, Role::Assistant);
        assert!(!app.reply_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_ignored_while_pending() {
        let (mut app, _) = test_app();
        type_text(&mut app, "one");
        app.submit_message();
        type_text(&mut app, "two");
        app.submit_message();

        let id = app.current_chat.clone().unwrap();
        assert_eq!(app.store.chat(&id).unwrap().messages.len(), 1);
        assert_eq!(app.composer.content(), "two");
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_chat_cancels_pending_reply() {
        let (mut app, _) = test_app();
        type_text(&mut app, "first");
        app.submit_message();
        let first = app.current_chat.clone().unwrap();

        let other = app.store.new_chat(None).unwrap();
        app.open_chat(other);

        wait_for_reply(&mut app).await;
        assert_eq!(app.store.chat(&first).unwrap().messages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_and_retry_selected_reply() {
        let (mut app, clipboard) = test_app();
        type_text(&mut app, "hello");
        app.submit_message();
        wait_for_reply(&mut app).await;

        app.selected_reply = Some(0);
        let reply = app.assistant_messages()[0].clone();
        app.copy_selected();
        assert_eq!(
            clipboard.0.lock().unwrap().as_deref(),
            Some(reply.content.as_str())
        );
        assert!(app.message_actions.is_copied(&reply.id, Instant::now()));

        app.retry_selected();
        let id = app.current_chat.clone().unwrap();
        assert_eq!(app.store.chat(&id).unwrap().messages.len(), 1);
        assert!(app.reply_pending());

        wait_for_reply(&mut app).await;
        let chat = app.store.chat(&id).unwrap();
        assert_eq!(chat.messages.len(), 2);
        assert_ne!(chat.messages[1].id, reply.id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_earlier_reply_keeps_thread_order() {
        let (mut app, _) = test_app();
        type_text(&mut app, "first");
        app.submit_message();
        wait_for_reply(&mut app).await;
        type_text(&mut app, "second");
        app.submit_message();
        wait_for_reply(&mut app).await;

        let id = app.current_chat.clone().unwrap();
        let later_reply = app.store.chat(&id).unwrap().messages[3].id.clone();

        app.selected_reply = Some(0);
        app.retry_selected();
        wait_for_reply(&mut app).await;

        let msgs = &app.store.chat(&id).unwrap().messages;
        let roles: Vec<Role> = msgs.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(msgs[0].content, "first");
        assert!(msgs[1].content.contains("first"));
        assert_eq!(msgs[2].content, "second");
        assert_eq!(msgs[3].id, later_reply);
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Sidebar.next(), Focus::Thread);
        assert_eq!(Focus::Composer.next(), Focus::Sidebar);
        assert_eq!(Focus::Sidebar.prev(), Focus::Composer);
    }
}
