//! UI rendering coordinator
//!
//! Main entry point that dispatches to specialized render modules.

mod thread;
mod views;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::tui::app::{App, Focus, Popup};
use crate::tui::components::SidebarView;

/// Composer rows shown before it starts scrolling
const MAX_COMPOSER_ROWS: u16 = 6;

impl App {
    /// Main UI rendering dispatcher
    pub fn ui(&mut self, f: &mut Frame) {
        let theme = self.theme();
        let bg = Block::default().style(Style::default().bg(theme.bg_color));
        f.render_widget(bg, f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(self.sidebar.width()),
                Constraint::Min(20),
            ])
            .split(f.area());

        f.render_widget(
            SidebarView {
                store: &self.store,
                state: &self.sidebar,
                current: self.current_chat.as_ref(),
                focused: self.focus == Focus::Sidebar,
                editor: &self.title_editor,
                theme,
            },
            columns[0],
        );

        let composer_rows = self.composer_rows(columns[1].width.saturating_sub(4));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(composer_rows + 2),
                Constraint::Length(1),
            ])
            .split(columns[1]);

        self.render_title_bar(f, rows[0]);
        if self.chat_started() || self.reply_pending() {
            self.render_thread(f, rows[1]);
        } else {
            self.render_welcome(f, rows[1]);
        }
        self.render_composer(f, rows[2]);
        self.render_hints(f, rows[3]);

        match self.popup {
            Popup::None => {}
            Popup::ThemeSelect => self.theme_popup.render(f, theme),
            Popup::ModelSelect => self.model_popup.render(f, theme, &self.model),
        }
    }

    fn composer_rows(&self, width: u16) -> u16 {
        let (lines, _) = self.composer.layout(width as usize);
        (lines.len() as u16).clamp(1, MAX_COMPOSER_ROWS)
    }
}
