//! Inline content to styled pieces

use leaf_core::markdown::Inline;
use ratatui::style::{Modifier, Style};

use crate::tui::themes::Theme;

/// A run of text sharing one style, optionally part of a link
#[derive(Debug, Clone, PartialEq)]
pub struct StyledPiece {
    pub text: String,
    pub style: Style,
    /// Index into [`InlineRender::urls`]
    pub link: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct InlineRender {
    pub pieces: Vec<StyledPiece>,
    pub urls: Vec<String>,
}

/// Convert inline content to styled pieces on top of `base_style`
pub fn render_inline(content: &[Inline], theme: &Theme, base_style: Style) -> InlineRender {
    let mut out = InlineRender::default();
    for item in content {
        render_inline_item(item, theme, base_style, None, &mut out);
    }
    out
}

fn render_inline_item(
    item: &Inline,
    theme: &Theme,
    base_style: Style,
    link: Option<usize>,
    out: &mut InlineRender,
) {
    match item {
        Inline::Text { text } => push(out, text.clone(), base_style, link),
        Inline::Bold { children } => {
            let style = base_style.add_modifier(Modifier::BOLD);
            for inner in children {
                render_inline_item(inner, theme, style, link, out);
            }
        }
        Inline::Italic { children } => {
            let style = base_style.add_modifier(Modifier::ITALIC);
            for inner in children {
                render_inline_item(inner, theme, style, link, out);
            }
        }
        Inline::Code { code } => {
            let style = Style::default()
                .fg(theme.accent_color)
                .bg(theme.code_bg_color);
            push(out, format!(" {} ", code), style, link);
        }
        Inline::Link { label, url } => {
            let style = base_style
                .fg(theme.link_color)
                .add_modifier(Modifier::UNDERLINED);
            out.urls.push(url.clone());
            let index = out.urls.len() - 1;
            push(out, label.clone(), style, Some(index));
        }
    }
}

fn push(out: &mut InlineRender, text: String, style: Style, link: Option<usize>) {
    if text.is_empty() {
        return;
    }
    out.pieces.push(StyledPiece { text, style, link });
}
