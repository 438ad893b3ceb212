//! Keyboard event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus, Popup};
use crate::tui::input::InputAction;
use crate::tui::utils::TitleAction;

impl App {
    /// Main keyboard dispatcher
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return;
        }

        if self.title_editor.is_editing() {
            match self.title_editor.handle_key(key.code, key.modifiers) {
                TitleAction::Save => self.finish_rename(),
                TitleAction::Cancel => self.title_editor.cancel(),
                TitleAction::Continue => {}
            }
            return;
        }

        if self.sidebar.searching {
            self.handle_search_key(key);
            return;
        }

        if ctrl {
            match key.code {
                KeyCode::Char('t') => return self.open_theme_popup(),
                KeyCode::Char('o') => return self.open_model_popup(),
                KeyCode::Char('b') => return self.sidebar.toggle(),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Thread => self.handle_thread_key(key),
            Focus::Composer => {
                if self.composer.handle_key(key.code, key.modifiers) == InputAction::Submit {
                    self.submit_message();
                }
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.sidebar.search.clear();
                self.sidebar.searching = false;
            }
            KeyCode::Enter | KeyCode::Down => self.sidebar.searching = false,
            KeyCode::Backspace => {
                self.sidebar.search.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.sidebar.search.push(c);
            }
            _ => {}
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.sidebar.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.sidebar_entries().len();
                self.sidebar.select_next(len);
            }
            KeyCode::Enter => {
                if let Some(entry) = self.selected_entry() {
                    self.activate_entry(entry);
                }
            }
            KeyCode::Char('n') => self.new_chat_in_selection(),
            KeyCode::Char('f') => self.new_folder(),
            KeyCode::Char('r') => self.start_rename(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('m') => self.move_selected(),
            KeyCode::Char('/') => {
                if !self.sidebar.open {
                    self.sidebar.toggle();
                }
                self.sidebar.searching = true;
            }
            _ => {}
        }
    }

    fn handle_thread_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_reply(-1),
            KeyCode::Down | KeyCode::Char('j') => self.select_reply(1),
            KeyCode::Char('c') => self.copy_selected(),
            KeyCode::Char('r') => self.retry_selected(),
            KeyCode::Esc => self.selected_reply = None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tui::app::tests::test_app;
    use crate::tui::app::{Focus, Popup};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(app: &mut crate::tui::app::App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::empty()));
    }

    fn ctrl(app: &mut crate::tui::app::App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_ctrl_q_quits() {
        let (mut app, _) = test_app();
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let (mut app, _) = test_app();
        assert_eq!(app.focus, Focus::Composer);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Sidebar);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Composer);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_and_enter_submits() {
        let (mut app, _) = test_app();
        for c in "hi there".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        let id = app.current_chat.clone().unwrap();
        assert_eq!(app.store.chat(&id).unwrap().messages[0].content, "hi there");
        assert!(app.reply_pending());
    }

    #[test]
    fn test_sidebar_rename_flow() {
        let (mut app, _) = test_app();
        app.focus = Focus::Sidebar;
        press(&mut app, KeyCode::Char('f'));
        let folder = app.store.folders()[0].id.clone();

        press(&mut app, KeyCode::Char('r'));
        assert!(app.title_editor.is_editing());
        // Keys go to the editor, not the sidebar
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.folder(&folder).unwrap().name, "New Folderd");
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let (mut app, _) = test_app();
        app.focus = Focus::Sidebar;
        press(&mut app, KeyCode::Char('/'));
        assert!(app.sidebar.searching);
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.sidebar.search, "no");
        assert!(app.store.chats().is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(!app.sidebar.searching);
        assert!(app.sidebar.search.is_empty());
    }

    #[test]
    fn test_ctrl_t_opens_theme_popup_and_swallows_keys() {
        let (mut app, _) = test_app();
        ctrl(&mut app, 't');
        assert_eq!(app.popup, Popup::ThemeSelect);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.composer.is_blank());
    }
}
