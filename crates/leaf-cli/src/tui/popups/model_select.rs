//! Model picker

use leaf_core::reply::MODELS;
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
use crate::tui::themes::Theme;

#[derive(Debug, Default)]
pub struct ModelSelectPopup {
    pub selected_index: usize,
}

impl ModelSelectPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, current: &str) {
        self.selected_index = MODELS.iter().position(|m| *m == current).unwrap_or(0);
    }

    pub fn next(&mut self) {
        if self.selected_index + 1 < MODELS.len() {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn selected(&self) -> &'static str {
        MODELS[self.selected_index.min(MODELS.len() - 1)]
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme, current: &str) {
        let (w, h) = PopupSize::Small.dimensions();
        let area = center_rect(w, h, f.area());
        render_popup_background(f, area, theme);

        let block = popup_block(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(popup_title("Select Model", theme)).alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let lines: Vec<Line> = MODELS
            .iter()
            .enumerate()
            .map(|(idx, model)| {
                let selected = idx == self.selected_index;
                let style = if selected {
                    Style::default()
                        .fg(theme.accent_color)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_color)
                };
                let marker = if *model == current { " ✓" } else { "" };
                Line::from(vec![
                    Span::styled(if selected { "› " } else { "  " }, style),
                    Span::styled(model.to_string(), style),
                    Span::styled(marker, Style::default().fg(theme.success_color)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), center_content(chunks[1], 4));

        let footer = Paragraph::new(key_hints(&[("Enter", "select"), ("Esc", "cancel")], theme))
            .alignment(Alignment::Center);
        f.render_widget(footer, chunks[2]);
    }
}
