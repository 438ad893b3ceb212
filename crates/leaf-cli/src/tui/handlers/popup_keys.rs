//! Popup keyboard handlers

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Popup};

impl App {
    /// Route a key to the open popup
    pub fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::None => {}
            Popup::ThemeSelect => self.handle_theme_popup_key(key.code),
            Popup::ModelSelect => self.handle_model_popup_key(key.code),
        }
    }

    fn handle_theme_popup_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.theme_id = self.theme_popup.prev(),
            KeyCode::Down | KeyCode::Char('j') => self.theme_id = self.theme_popup.next(),
            KeyCode::Enter => {
                self.theme_id = self.theme_popup.confirm();
                tracing::info!(theme = %self.theme_id, "Theme changed");
                self.popup = Popup::None;
            }
            KeyCode::Esc => {
                if let Some(original) = self.theme_popup.cancel() {
                    self.theme_id = original;
                }
                self.popup = Popup::None;
            }
            _ => {}
        }
    }

    fn handle_model_popup_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.model_popup.prev(),
            KeyCode::Down | KeyCode::Char('j') => self.model_popup.next(),
            KeyCode::Enter => {
                self.model = self.model_popup.selected().to_string();
                tracing::info!(model = %self.model, "Model changed");
                self.popup = Popup::None;
            }
            KeyCode::Esc => self.popup = Popup::None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tui::app::tests::test_app;
    use crate::tui::app::Popup;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use leaf_core::ThemeId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_theme_preview_then_escape_restores() {
        let (mut app, _) = test_app();
        assert_eq!(app.theme_id, ThemeId::Leaf);
        app.open_theme_popup();

        app.handle_popup_key(key(KeyCode::Down));
        assert_eq!(app.theme_id, ThemeId::ALL[1]);
        app.handle_popup_key(key(KeyCode::Down));
        assert_eq!(app.theme_id, ThemeId::ALL[2]);

        app.handle_popup_key(key(KeyCode::Esc));
        assert_eq!(app.theme_id, ThemeId::Leaf);
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_theme_enter_applies() {
        let (mut app, _) = test_app();
        app.open_theme_popup();
        app.handle_popup_key(key(KeyCode::Down));
        app.handle_popup_key(key(KeyCode::Enter));
        assert_eq!(app.theme_id, ThemeId::ALL[1]);
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_model_select() {
        let (mut app, _) = test_app();
        app.open_model_popup();
        app.handle_popup_key(key(KeyCode::Down));
        app.handle_popup_key(key(KeyCode::Enter));
        assert_eq!(app.model, "GPT-3.5");
    }
}
