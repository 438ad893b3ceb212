//! Inline span parsing (bold, italic, code, links)
//!
//! Works on a single logical line. Each pass looks for the earliest span of
//! the highest-precedence kind in the unconsumed suffix, emits the text before
//! it verbatim, recurses into the span where formatting may nest, and carries
//! on after the closing delimiter. Anything unmatched stays literal.

use once_cell::sync::Lazy;
use regex::Regex;

use super::elements::Inline;

static BOLD_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)\*\*(.*?)\*\*(.*)$").unwrap());
static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)__(.*?)__(.*)$").unwrap());
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)\*(.*?)\*(.*)$").unwrap());
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)_(.*?)_(.*)$").unwrap());
static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)`([^`]+)`(.*)$").unwrap());
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\[([^\]]+)\]\(([^)]+)\)(.*)$").unwrap());

/// A delimited span found in the remaining text
struct SpanMatch<'a> {
    before: &'a str,
    inner: &'a str,
    after: &'a str,
}

/// Find the span whose opening delimiter comes first across the given
/// patterns. Patterns must use distinct delimiters so ties cannot happen.
fn earliest<'a>(text: &'a str, patterns: &[&Regex]) -> Option<SpanMatch<'a>> {
    patterns
        .iter()
        .filter_map(|re| re.captures(text))
        .map(|caps| SpanMatch {
            before: caps.get(1).map_or("", |m| m.as_str()),
            inner: caps.get(2).map_or("", |m| m.as_str()),
            after: caps.get(3).map_or("", |m| m.as_str()),
        })
        .min_by_key(|m| m.before.len())
}

fn push_text(content: &mut Vec<Inline>, text: &str) {
    if !text.is_empty() {
        content.push(Inline::text(text));
    }
}

/// Parse inline formatting in a single line of text.
///
/// Returns an empty vector for empty input, and a single `Text` node when no
/// spans are found.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut content = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        // Bold (**text** or __text__). An empty earliest pair disables the rule.
        if let Some(m) = earliest(remaining, &[&BOLD_STARS, &BOLD_UNDERSCORES]) {
            if !m.inner.is_empty() {
                push_text(&mut content, m.before);
                content.push(Inline::bold(parse_inline(m.inner)));
                remaining = m.after;
                continue;
            }
        }

        // Italic (*text* or _text_), never when sitting on an unmatched `**`
        if !remaining.starts_with("**") {
            if let Some(m) = earliest(remaining, &[&ITALIC_STAR, &ITALIC_UNDERSCORE]) {
                if !m.inner.is_empty() {
                    push_text(&mut content, m.before);
                    content.push(Inline::italic(parse_inline(m.inner)));
                    remaining = m.after;
                    continue;
                }
            }
        }

        // Inline code, content taken verbatim
        if let Some(m) = earliest(remaining, &[&CODE_SPAN]) {
            push_text(&mut content, m.before);
            content.push(Inline::code(m.inner));
            remaining = m.after;
            continue;
        }

        // Links [label](url)
        if let Some(caps) = LINK.captures(remaining) {
            let before = caps.get(1).map_or("", |m| m.as_str());
            let label = caps.get(2).map_or("", |m| m.as_str());
            let url = caps.get(3).map_or("", |m| m.as_str());
            let after = caps.get(4).map_or("", |m| m.as_str());
            push_text(&mut content, before);
            content.push(Inline::link(label, url));
            remaining = after;
            continue;
        }

        content.push(Inline::text(remaining));
        break;
    }

    content
}
