//! Title bar, welcome screen, composer and key hints

use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{App, Focus};
use crate::tui::popups::common::key_hints;
use crate::tui::utils::text::truncate_ellipsis;

impl App {
    pub(super) fn render_title_bar(&self, f: &mut Frame, area: Rect) {
        let theme = self.theme();
        let title = self
            .current_chat
            .as_ref()
            .and_then(|id| self.store.chat(id))
            .map(|c| c.title.clone())
            .unwrap_or_else(|| "Leaf Notes".to_string());
        let model = format!("{} ", self.model);
        let available = (area.width as usize).saturating_sub(model.len() + 2);

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", truncate_ellipsis(&title, available)),
                Style::default()
                    .fg(theme.title_color)
                    .add_modifier(Modifier::BOLD),
            ))),
            area,
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                model,
                Style::default().fg(theme.dim_color),
            )))
            .alignment(Alignment::Right),
            area,
        );
    }

    pub(super) fn render_welcome(&self, f: &mut Frame, area: Rect) {
        let theme = self.theme();
        let dim = Style::default().fg(theme.dim_color);

        let lines = vec![
            Line::from(Span::styled(
                "Leaf Notes",
                Style::default()
                    .fg(theme.title_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Model: ", dim),
                Span::styled(self.model.clone(), Style::default().fg(theme.accent_color)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Start typing to begin your conversation...",
                Style::default().fg(theme.text_color),
            )),
            Line::from(Span::styled("Ctrl+O to pick a different model", dim)),
        ];

        let top = area.height.saturating_sub(lines.len() as u16) / 2;
        let inner = Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        };
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    pub(super) fn render_composer(&self, f: &mut Frame, area: Rect) {
        let theme = self.theme();
        let focused = self.focus == Focus::Composer;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                theme.accent_color
            } else {
                theme.border_color
            }))
            .style(Style::default().bg(theme.input_bg_color));
        let inner = block.inner(area);
        f.render_widget(block, area);
        let inner = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.composer.content().is_empty() {
            let placeholder = if self.chat_started() {
                "Type your message..."
            } else {
                "Ask anything..."
            };
            f.render_widget(
                Paragraph::new(Span::styled(
                    placeholder,
                    Style::default().fg(theme.input_placeholder_color),
                )),
                inner,
            );
            if focused {
                f.set_cursor_position(Position::new(inner.x, inner.y));
            }
            return;
        }

        let (lines, (cursor_line, cursor_col)) = self.composer.layout(inner.width as usize);
        let visible = inner.height as usize;
        let offset = (cursor_line + 1).saturating_sub(visible);
        let text: Vec<Line> = lines
            .into_iter()
            .skip(offset)
            .take(visible)
            .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.text_color))))
            .collect();
        f.render_widget(Paragraph::new(text), inner);

        if focused {
            let x = inner.x + (cursor_col as u16).min(inner.width.saturating_sub(1));
            let y = inner.y + (cursor_line - offset) as u16;
            f.set_cursor_position(Position::new(x, y));
        }
    }

    pub(super) fn render_hints(&self, f: &mut Frame, area: Rect) {
        let theme = self.theme();
        let hints: &[(&str, &str)] = match self.focus {
            Focus::Composer => &[
                ("Enter", "send"),
                ("Shift+Enter", "newline"),
                ("Tab", "focus"),
                ("Ctrl+T", "theme"),
                ("Ctrl+B", "sidebar"),
                ("Ctrl+Q", "quit"),
            ],
            Focus::Thread => &[
                ("↑/↓", "select"),
                ("c", "copy"),
                ("r", "retry"),
                ("Tab", "focus"),
                ("Ctrl+Q", "quit"),
            ],
            Focus::Sidebar => &[
                ("Enter", "open"),
                ("n", "new"),
                ("f", "folder"),
                ("r", "rename"),
                ("d", "delete"),
                ("m", "move"),
                ("/", "search"),
            ],
        };
        f.render_widget(
            Paragraph::new(key_hints(hints, theme)).alignment(Alignment::Center),
            area,
        );
    }
}
