//! Block rendering to ratatui lines
//!
//! Every block is laid out independently at the given width. Prose is word
//! wrapped; code is hard wrapped so whitespace survives.

use leaf_core::markdown::{Block, Inline};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::inline::{render_inline, InlineRender, StyledPiece};
use super::links::{LinkSpan, RenderedMarkdown};
use crate::tui::themes::Theme;
use crate::tui::utils::text::hard_wrap;

const BULLET: &str = "•";
const QUOTE_BORDER: &str = "│ ";
const DIVIDER: &str = "─";
const INDENT_WIDTH: usize = 2;

/// Render parsed blocks at `width` columns
pub fn render_blocks(blocks: &[Block], width: usize, theme: &Theme) -> RenderedMarkdown {
    let width = width.max(1);
    let mut out = RenderedMarkdown::default();
    for block in blocks {
        out.append(render_block(block, width, theme));
    }
    out
}

fn render_block(block: &Block, width: usize, theme: &Theme) -> RenderedMarkdown {
    let text_style = Style::default().fg(theme.text_color);
    match block {
        Block::Divider => RenderedMarkdown::with_links(
            vec![Line::from(Span::styled(
                DIVIDER.repeat(width),
                Style::default().fg(theme.dim_color),
            ))],
            Vec::new(),
        ),
        Block::Blank => RenderedMarkdown::with_links(vec![Line::default()], Vec::new()),
        Block::Heading { level, content } => {
            let style = heading_style(*level, theme);
            wrap_inline(content, theme, style, width, Vec::new(), Vec::new())
        }
        Block::Paragraph { content } => {
            wrap_inline(content, theme, text_style, width, Vec::new(), Vec::new())
        }
        Block::UnorderedList { items } => {
            let mut out = RenderedMarkdown::default();
            for item in items {
                let marker = format!("{} ", BULLET);
                out.append(list_item(&item.content, item.indent, &marker, width, theme));
            }
            out
        }
        Block::OrderedList { items } => {
            let mut out = RenderedMarkdown::default();
            for item in items {
                let marker = format!("{}. ", item.number);
                out.append(list_item(&item.content, item.indent, &marker, width, theme));
            }
            out
        }
        Block::CodeBlock { language, lines } => code_block(language.as_deref(), lines, width, theme),
        Block::Blockquote { lines } => {
            let border = || {
                vec![Span::styled(
                    QUOTE_BORDER,
                    Style::default().fg(theme.border_color),
                )]
            };
            let style = Style::default()
                .fg(theme.quote_color)
                .add_modifier(Modifier::ITALIC);
            let mut out = RenderedMarkdown::default();
            for line in lines {
                out.append(wrap_inline(line, theme, style, width, border(), border()));
            }
            out
        }
    }
}

fn heading_style(level: u8, theme: &Theme) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match level {
        1 => base.fg(theme.title_color).add_modifier(Modifier::UNDERLINED),
        2 => base.fg(theme.title_color),
        3 => base.fg(theme.accent_color),
        4 => base.fg(theme.text_color),
        _ => base.fg(theme.dim_color),
    }
}

fn list_item(
    content: &[Inline],
    indent: usize,
    marker: &str,
    width: usize,
    theme: &Theme,
) -> RenderedMarkdown {
    let pad = " ".repeat(indent * INDENT_WIDTH);
    let first = vec![
        Span::raw(pad.clone()),
        Span::styled(marker.to_string(), Style::default().fg(theme.dim_color)),
    ];
    let hanging = vec![Span::raw(format!("{}{}", pad, " ".repeat(marker.width())))];
    wrap_inline(
        content,
        theme,
        Style::default().fg(theme.text_color),
        width,
        first,
        hanging,
    )
}

fn code_block(
    language: Option<&str>,
    lines: &[String],
    width: usize,
    theme: &Theme,
) -> RenderedMarkdown {
    let mut out = Vec::new();
    if let Some(lang) = language {
        out.push(Line::from(Span::styled(
            lang.to_string(),
            Style::default()
                .fg(theme.dim_color)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let style = Style::default().fg(theme.text_color).bg(theme.code_bg_color);
    let inner = width.saturating_sub(2).max(1);
    for line in lines {
        for chunk in hard_wrap(line, inner) {
            let fill = inner.saturating_sub(chunk.width());
            out.push(Line::from(Span::styled(
                format!(" {}{} ", chunk, " ".repeat(fill)),
                style,
            )));
        }
    }
    RenderedMarkdown::with_links(out, Vec::new())
}

/// One word or whitespace run, possibly spanning several styled pieces
struct Token {
    parts: Vec<StyledPiece>,
    width: usize,
    space: bool,
}

fn tokenize(pieces: &[StyledPiece]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for piece in pieces {
        let mut run = String::new();
        let mut run_space = None;
        for ch in piece.text.chars() {
            let space = ch.is_whitespace();
            if run_space.is_some_and(|s| s != space) {
                push_run(&mut tokens, std::mem::take(&mut run), piece, run_space == Some(true));
            }
            run_space = Some(space);
            run.push(ch);
        }
        if !run.is_empty() {
            push_run(&mut tokens, run, piece, run_space == Some(true));
        }
    }
    tokens
}

/// Append a run, merging it into the previous token when both are the same kind
fn push_run(tokens: &mut Vec<Token>, text: String, piece: &StyledPiece, space: bool) {
    let width = text.width();
    let part = StyledPiece {
        text,
        style: piece.style,
        link: piece.link,
    };
    match tokens.last_mut() {
        Some(last) if last.space == space => {
            last.width += width;
            last.parts.push(part);
        }
        _ => tokens.push(Token {
            parts: vec![part],
            width,
            space,
        }),
    }
}

/// Accumulates wrapped lines and the link spans on them
struct LineBuilder<'a> {
    width: usize,
    urls: &'a [String],
    first_prefix: Vec<Span<'static>>,
    hanging_prefix: Vec<Span<'static>>,
    lines: Vec<Line<'static>>,
    links: Vec<(usize, LinkSpan)>,
    current: Vec<Span<'static>>,
    col: usize,
    prefix_width: usize,
    empty: bool,
}

impl<'a> LineBuilder<'a> {
    fn new(
        width: usize,
        urls: &'a [String],
        first_prefix: Vec<Span<'static>>,
        hanging_prefix: Vec<Span<'static>>,
    ) -> Self {
        let mut builder = Self {
            width,
            urls,
            first_prefix,
            hanging_prefix,
            lines: Vec::new(),
            links: Vec::new(),
            current: Vec::new(),
            col: 0,
            prefix_width: 0,
            empty: true,
        };
        builder.start_line();
        builder
    }

    fn start_line(&mut self) {
        let prefix = if self.lines.is_empty() {
            self.first_prefix.clone()
        } else {
            self.hanging_prefix.clone()
        };
        self.prefix_width = prefix.iter().map(|s| s.content.width()).sum();
        self.col = self.prefix_width;
        self.current = prefix;
        self.empty = true;
    }

    fn break_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
        self.start_line();
    }

    fn available(&self) -> usize {
        self.width.saturating_sub(self.col)
    }

    fn line_capacity(&self) -> usize {
        self.width.saturating_sub(self.prefix_width).max(1)
    }

    fn push_part(&mut self, part: &StyledPiece) {
        let width = part.text.width();
        if let Some(index) = part.link {
            let line = self.lines.len();
            let start = self.col;
            match self.links.last_mut() {
                Some((last_index, span))
                    if *last_index == index && span.line == line && span.end_col == start =>
                {
                    span.end_col += width;
                }
                _ => self.links.push((
                    index,
                    LinkSpan {
                        url: self.urls.get(index).cloned().unwrap_or_default(),
                        line,
                        start_col: start,
                        end_col: start + width,
                    },
                )),
            }
        }
        self.current.push(Span::styled(part.text.clone(), part.style));
        self.col += width;
        self.empty = false;
    }

    fn push_word(&mut self, token: &Token) {
        if token.width <= self.line_capacity() {
            if token.width > self.available() && !self.empty {
                self.break_line();
            }
            for part in &token.parts {
                self.push_part(part);
            }
            return;
        }

        // Longer than a whole line: break by character
        for part in &token.parts {
            let mut chunk = String::new();
            for ch in part.text.chars() {
                let w = ch.width().unwrap_or(0);
                if w > self.available().saturating_sub(chunk.width()) && !(self.empty && chunk.is_empty()) {
                    if !chunk.is_empty() {
                        self.push_part(&StyledPiece {
                            text: std::mem::take(&mut chunk),
                            style: part.style,
                            link: part.link,
                        });
                    }
                    self.break_line();
                }
                chunk.push(ch);
            }
            if !chunk.is_empty() {
                self.push_part(&StyledPiece {
                    text: chunk,
                    style: part.style,
                    link: part.link,
                });
            }
        }
    }

    fn finish(mut self) -> RenderedMarkdown {
        if !self.empty || self.lines.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
        RenderedMarkdown::with_links(
            self.lines,
            self.links.into_iter().map(|(_, span)| span).collect(),
        )
    }
}

/// Lay out inline content with word wrapping. `first_prefix` starts the first
/// line and `hanging_prefix` every continuation line.
fn wrap_inline(
    content: &[Inline],
    theme: &Theme,
    base_style: Style,
    width: usize,
    first_prefix: Vec<Span<'static>>,
    hanging_prefix: Vec<Span<'static>>,
) -> RenderedMarkdown {
    let InlineRender { pieces, urls } = render_inline(content, theme, base_style);
    let tokens = tokenize(&pieces);

    let mut builder = LineBuilder::new(width, &urls, first_prefix, hanging_prefix);
    let mut pending_space: Option<&Token> = None;
    let mut at_start = true;

    for token in &tokens {
        if token.space {
            if at_start {
                // Leading whitespace of the source line is kept as-is
                for part in &token.parts {
                    builder.push_part(part);
                }
            } else {
                pending_space = Some(token);
            }
            continue;
        }
        at_start = false;

        if let Some(space) = pending_space.take() {
            if space.width + token.width <= builder.available() || token.width > builder.line_capacity() {
                if space.width <= builder.available() {
                    for part in &space.parts {
                        builder.push_part(part);
                    }
                } else {
                    builder.break_line();
                }
            } else {
                builder.break_line();
            }
        }
        builder.push_word(token);
    }

    // Trailing whitespace is kept when it fits so plain text round-trips
    if let Some(space) = pending_space {
        if space.width <= builder.available() {
            for part in &space.parts {
                builder.push_part(part);
            }
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::themes::theme_for;
    use leaf_core::markdown::parse;
    use leaf_core::ThemeId;

    fn render(text: &str, width: usize) -> RenderedMarkdown {
        render_blocks(&parse(text), width, theme_for(ThemeId::Leaf))
    }

    fn plain(text: &str, width: usize) -> Vec<String> {
        render(text, width).plain_lines()
    }

    #[test]
    fn test_plain_text_renders_to_itself() {
        assert_eq!(plain("5 * 3 = 15", 80), vec!["5 * 3 = 15"]);
        assert_eq!(plain("just some words", 80), vec!["just some words"]);
    }

    #[test]
    fn test_paragraph_wraps_at_word_boundary() {
        assert_eq!(plain("hello world foo", 10), vec!["hello", "world foo"]);
    }

    #[test]
    fn test_long_word_is_force_broken() {
        assert_eq!(plain("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_bullets_use_fixed_marker_and_indent() {
        assert_eq!(
            plain("- a\n* b\n    + c", 40),
            vec!["• a", "• b", "    • c"]
        );
    }

    #[test]
    fn test_ordered_list_keeps_numbers() {
        assert_eq!(plain("1. a\n1. b", 40), vec!["1. a", "1. b"]);
    }

    #[test]
    fn test_list_continuation_hangs_under_text() {
        assert_eq!(plain("- aaa bbb", 7), vec!["• aaa", "  bbb"]);
    }

    #[test]
    fn test_code_block_is_padded_and_not_parsed() {
        let lines = plain("```js\nlet x = a * b;\n```", 20);
        assert_eq!(lines[0], "js");
        assert_eq!(lines[1], " let x = a * b;     ");
        assert_eq!(lines[1].chars().count(), 20);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_code_block_without_language() {
        let lines = plain("```\nx\n```", 6);
        assert_eq!(lines, vec![" x    "]);
    }

    #[test]
    fn test_blockquote_border_per_line() {
        let theme = theme_for(ThemeId::Leaf);
        let out = render("> one\n> two", 40);
        assert_eq!(out.plain_lines(), vec!["│ one", "│ two"]);
        let content = &out.lines[0].spans[1];
        assert!(content.style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(content.style.fg, Some(theme.quote_color));
    }

    #[test]
    fn test_divider_spans_width() {
        assert_eq!(plain("---", 5), vec!["─────"]);
    }

    #[test]
    fn test_heading_styles() {
        let theme = theme_for(ThemeId::Leaf);
        let out = render("# Big\n### Small", 40);
        let h1 = &out.lines[0].spans[0];
        assert!(h1.style.add_modifier.contains(Modifier::BOLD | Modifier::UNDERLINED));
        assert_eq!(h1.style.fg, Some(theme.title_color));
        assert_eq!(out.lines[1].spans[0].style.fg, Some(theme.accent_color));
    }

    #[test]
    fn test_blank_line_is_empty_line() {
        assert_eq!(plain("a\n\nb", 40), vec!["a", "", "b"]);
    }

    #[test]
    fn test_link_span_positions() {
        let out = render("see [docs](https://x.y) here", 80);
        assert_eq!(
            out.links,
            vec![LinkSpan {
                url: "https://x.y".to_string(),
                line: 0,
                start_col: 4,
                end_col: 8,
            }]
        );
        assert_eq!(out.link_targets(), vec!["https://x.y"]);
    }

    #[test]
    fn test_link_positions_follow_preceding_blocks() {
        let out = render("# Title\n\n- [a b](u)", 80);
        assert_eq!(out.links.len(), 1);
        assert_eq!(out.links[0].line, 2);
        assert_eq!(out.links[0].start_col, 2);
        assert_eq!(out.links[0].end_col, 5);
    }

    #[test]
    fn test_wrapped_link_gets_span_per_line() {
        let out = render("[aaa bbb](u)", 4);
        assert_eq!(out.plain_lines(), vec!["aaa", "bbb"]);
        assert_eq!(out.links.len(), 2);
        assert_eq!(out.links[1].line, 1);
        assert_eq!(out.link_targets(), vec!["u"]);
    }
}
