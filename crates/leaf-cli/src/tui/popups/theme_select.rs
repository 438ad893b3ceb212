//! Theme selection popup
//!
//! Moving the selection previews the theme immediately; Esc restores the one
//! that was active when the popup opened.

use leaf_core::ThemeId;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::common::{
    center_content, center_rect, key_hints, popup_block, popup_title, render_popup_background,
    PopupSize,
};
use crate::tui::themes::{Theme, THEME_REGISTRY};

#[derive(Debug, Default)]
pub struct ThemeSelectPopup {
    pub selected_index: usize,
    pub scroll_offset: usize,
    /// Theme active when the popup was opened, restored on cancel
    original: Option<ThemeId>,
}

impl ThemeSelectPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, current: ThemeId) {
        self.original = Some(current);
        self.selected_index = current.index();
        self.scroll_offset = 0;
        self.ensure_visible(VISIBLE_ROWS);
    }

    pub fn original(&self) -> Option<ThemeId> {
        self.original
    }

    /// Theme under the cursor
    pub fn selected(&self) -> ThemeId {
        ThemeId::ALL
            .get(self.selected_index)
            .copied()
            .unwrap_or_default()
    }

    /// Move down; returns the theme to preview
    pub fn next(&mut self) -> ThemeId {
        if self.selected_index + 1 < ThemeId::ALL.len() {
            self.selected_index += 1;
            self.ensure_visible(VISIBLE_ROWS);
        }
        self.selected()
    }

    /// Move up; returns the theme to preview
    pub fn prev(&mut self) -> ThemeId {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.ensure_visible(VISIBLE_ROWS);
        }
        self.selected()
    }

    /// Close and return the theme to restore
    pub fn cancel(&mut self) -> Option<ThemeId> {
        self.original.take()
    }

    /// Close and return the chosen theme
    pub fn confirm(&mut self) -> ThemeId {
        self.original = None;
        self.selected()
    }

    fn ensure_visible(&mut self, visible_height: usize) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index + 1 - visible_height;
        }
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let (w, h) = PopupSize::Medium.dimensions();
        let area = center_rect(w, h, f.area());
        render_popup_background(f, area, theme);

        let block = popup_block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(popup_title("Select Theme", theme)).alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let visible = (chunks[1].height as usize).max(1);
        let current = theme.id;
        let mut lines: Vec<Line> = Vec::new();
        for (idx, t) in THEME_REGISTRY
            .list()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible)
        {
            let is_selected = idx == self.selected_index;
            let is_original = self.original == Some(t.id);

            let prefix = if is_selected { "› " } else { "  " };
            let name = if is_original {
                format!("{} (current)", t.display_name)
            } else {
                t.display_name.clone()
            };
            let name_style = if is_selected {
                Style::default()
                    .fg(theme.accent_color)
                    .add_modifier(Modifier::BOLD)
            } else if t.id == current {
                Style::default().fg(theme.success_color)
            } else {
                Style::default().fg(theme.text_color)
            };

            lines.push(Line::from(vec![
                Span::styled(prefix, name_style),
                Span::styled(format!("{:<28}", name), name_style),
                Span::styled("██", Style::default().fg(t.accent_color)),
                Span::styled("██", Style::default().fg(t.border_color)),
                Span::styled("██", Style::default().fg(t.bg_color)),
            ]));
        }

        let content = Paragraph::new(lines).style(Style::default().bg(theme.bg_color));
        f.render_widget(content, center_content(chunks[1], 3));

        let footer = Paragraph::new(key_hints(
            &[("↑/↓", "preview"), ("Enter", "apply"), ("Esc", "cancel")],
            theme,
        ))
        .alignment(Alignment::Center);
        f.render_widget(footer, chunks[2]);
    }
}

/// All nine themes fit in the medium popup
const VISIBLE_ROWS: usize = 11;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::themes::theme_for;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_open_selects_current() {
        let mut popup = ThemeSelectPopup::new();
        popup.open(ThemeId::Nord);
        assert_eq!(popup.selected(), ThemeId::Nord);
        assert_eq!(popup.original(), Some(ThemeId::Nord));
    }

    #[test]
    fn test_navigation_clamps() {
        let mut popup = ThemeSelectPopup::new();
        popup.open(ThemeId::Leaf);
        assert_eq!(popup.prev(), ThemeId::Leaf);
        assert_eq!(popup.next(), ThemeId::Ocean);
        popup.open(ThemeId::Dark);
        assert_eq!(popup.next(), ThemeId::Dark);
    }

    #[test]
    fn test_cancel_returns_original() {
        let mut popup = ThemeSelectPopup::new();
        popup.open(ThemeId::Paper);
        popup.next();
        assert_eq!(popup.cancel(), Some(ThemeId::Paper));
        assert_eq!(popup.original(), None);
    }

    #[test]
    fn test_confirm_returns_selection() {
        let mut popup = ThemeSelectPopup::new();
        popup.open(ThemeId::Leaf);
        popup.next();
        popup.next();
        assert_eq!(popup.confirm(), ThemeId::CherryWitch);
        assert_eq!(popup.original(), None);
    }

    #[test]
    fn test_render_lists_themes() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut popup = ThemeSelectPopup::new();
        popup.open(ThemeId::Leaf);
        terminal
            .draw(|f| popup.render(f, theme_for(ThemeId::Leaf)))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Select Theme"));
        assert!(text.contains("Leaf Theme (current)"));
        assert!(text.contains("Nord Light Theme"));
    }
}
