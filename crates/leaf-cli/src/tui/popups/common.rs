//! Shared popup chrome

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::tui::themes::Theme;

#[derive(Debug, Clone, Copy)]
pub enum PopupSize {
    Small,
    Medium,
}

impl PopupSize {
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            PopupSize::Small => (44, 12),
            PopupSize::Medium => (60, 18),
        }
    }
}

/// Rect of at most `width` x `height` centred in `area`
pub fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Inset horizontally by `margin` on both sides
pub fn center_content(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - margin * 2,
        ..area
    }
}

pub fn render_popup_background(f: &mut Frame, area: Rect, theme: &Theme) {
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg_color)),
        area,
    );
}

pub fn popup_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent_color))
        .style(Style::default().bg(theme.bg_color))
}

pub fn popup_title(title: &str, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.title_color)
                .add_modifier(Modifier::BOLD),
        )),
    ]
}

/// Footer of `(key, action)` hints
pub fn key_hints(hints: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(theme.accent_color)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(": {}", action),
            Style::default().fg(theme.text_color),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(center_rect(60, 18, area), area);
        assert_eq!(center_rect(10, 4, area), Rect::new(10, 3, 10, 4));
    }

    #[test]
    fn test_center_content_margin() {
        let area = Rect::new(2, 1, 20, 5);
        assert_eq!(center_content(area, 4), Rect::new(6, 1, 12, 5));
        assert_eq!(center_content(Rect::new(0, 0, 4, 1), 4).width, 0);
    }
}
