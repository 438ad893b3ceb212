//! Text utilities
//!
//! All width calculations use unicode display width, not byte length.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap a single line at word boundaries to fit within max_width
///
/// Words longer than max_width are force-broken by character.
pub fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || line.width() <= max_width {
        return vec![line.to_string()];
    }

    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in line.split_whitespace() {
        let word_width = word.width();
        if current.is_empty() {
            current = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            result.push(std::mem::take(&mut current));
            current = word.to_string();
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        result.push(current);
    }

    result
        .into_iter()
        .flat_map(|s| {
            if s.width() > max_width {
                hard_wrap(&s, max_width)
            } else {
                vec![s]
            }
        })
        .collect()
}

/// Wrap multi-line text, preserving empty lines
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    text.split('\n')
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                wrap_line(line, max_width)
            }
        })
        .collect()
}

/// Break by character at max_width, keeping all whitespace.
/// An empty line stays a single empty line.
pub fn hard_wrap(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || line.width() <= max_width {
        return vec![line.to_string()];
    }
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0usize;
    for c in line.chars() {
        let char_width = c.width().unwrap_or(0);
        if chunk_width + char_width > max_width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(c);
        chunk_width += char_width;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

/// Truncate to max display width, adding an ellipsis if needed
pub fn truncate_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    if s.width() <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= 1 {
        return Cow::Owned("…".chars().take(max_width).collect());
    }

    let target_width = max_width - 1;
    let mut width = 0;
    let mut truncated: String = s
        .chars()
        .take_while(|c| {
            let char_width = c.width().unwrap_or(0);
            if width + char_width <= target_width {
                width += char_width;
                true
            } else {
                false
            }
        })
        .collect();
    truncated.push('…');
    Cow::Owned(truncated)
}
