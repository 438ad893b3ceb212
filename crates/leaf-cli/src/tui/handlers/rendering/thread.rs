//! Message thread rendering

use std::time::Instant;

use leaf_core::chat::Role;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, Focus};
use crate::tui::utils::text::{truncate_ellipsis, wrap_text};

/// Horizontal padding either side of the thread
const THREAD_MARGIN: u16 = 2;
const TYPING_FRAMES: [&str; 4] = ["", ".", "..", "..."];

impl App {
    pub(super) fn render_thread(&mut self, f: &mut Frame, area: Rect) {
        let theme = self.theme();
        let area = Rect {
            x: area.x + THREAD_MARGIN,
            width: area.width.saturating_sub(THREAD_MARGIN * 2),
            ..area
        };
        let width = area.width as usize;
        if width == 0 || area.height == 0 {
            return;
        }
        self.markdown_cache.check_width(width);

        let Some(chat) = self.current_chat.as_ref().and_then(|id| self.store.chat(id)) else {
            return;
        };

        let now = Instant::now();
        let thread_focused = self.focus == Focus::Thread;
        let dim = Style::default().fg(theme.dim_color);
        let user_width = (width * 3 / 4).max(1);

        let mut lines: Vec<Line> = Vec::new();
        // Last line of the selected reply, kept on screen
        let mut anchor = None;
        let mut reply_index = 0;

        for message in &chat.messages {
            match message.role {
                Role::User => {
                    let style = Style::default()
                        .fg(theme.user_msg_color)
                        .bg(theme.user_msg_bg_color);
                    for line in wrap_text(&message.content, user_width.saturating_sub(2)) {
                        lines.push(
                            Line::from(Span::styled(format!(" {} ", line), style))
                                .alignment(Alignment::Right),
                        );
                    }
                    lines.push(
                        Line::from(Span::styled(message.time_label(), dim))
                            .alignment(Alignment::Right),
                    );
                }
                Role::Assistant => {
                    let selected = self.selected_reply == Some(reply_index);
                    let header_style = if selected && thread_focused {
                        Style::default()
                            .fg(theme.accent_color)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.assistant_msg_color)
                    };
                    lines.push(Line::from(vec![
                        Span::styled(if selected { "▌ " } else { "  " }, header_style),
                        Span::styled("Assistant", header_style),
                        Span::styled(format!("  {}", message.time_label()), dim),
                    ]));

                    let rendered = self
                        .markdown_cache
                        .get_or_render(&message.content, width, theme);
                    lines.extend(rendered.lines.iter().cloned());

                    if selected {
                        let actions = if self.message_actions.is_copied(&message.id, now) {
                            Line::from(Span::styled(
                                "✓ Copied",
                                Style::default().fg(theme.success_color),
                            ))
                        } else {
                            Line::from(vec![
                                Span::styled("[c]", Style::default().fg(theme.accent_color)),
                                Span::styled(" Copy  ", dim),
                                Span::styled("[r]", Style::default().fg(theme.accent_color)),
                                Span::styled(" Retry", dim),
                            ])
                        };
                        lines.push(actions);
                        for url in rendered.link_targets() {
                            let label = truncate_ellipsis(url, width.saturating_sub(2));
                            lines.push(Line::from(vec![
                                Span::styled("↗ ", dim),
                                Span::styled(
                                    label.into_owned(),
                                    Style::default().fg(theme.link_color),
                                ),
                            ]));
                        }
                        anchor = Some(lines.len() - 1);
                    }
                    reply_index += 1;
                }
            }
            lines.push(Line::from(""));
        }

        if self.replies.is_pending(&chat.id) {
            let dots = TYPING_FRAMES[(self.frame / 3) % TYPING_FRAMES.len()];
            lines.push(Line::from(Span::styled(
                format!("  Assistant is thinking{}", dots),
                dim.add_modifier(Modifier::ITALIC),
            )));
        }

        let height = area.height as usize;
        let bottom = lines.len().saturating_sub(height);
        let offset = match anchor {
            Some(line) => (line + 1).saturating_sub(height).min(bottom),
            None => bottom,
        };

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(theme.text_color))
            .scroll((offset as u16, 0));
        f.render_widget(paragraph, area);
    }
}
