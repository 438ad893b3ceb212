//! Markdown element types

use serde::Serialize;

/// Block-level markdown elements, one per structural unit of the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Horizontal rule / thematic break
    Divider,
    /// Heading with level (1-6) and content
    Heading { level: u8, content: Vec<Inline> },
    /// Bulleted list; source marker (`-`, `*`, `+`) is not retained
    UnorderedList { items: Vec<ListItem> },
    /// Numbered list; numbers are kept exactly as written
    OrderedList { items: Vec<OrderedItem> },
    /// Fenced code block with optional language label
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    /// Quote run, one inline-parsed entry per source line
    Blockquote { lines: Vec<Vec<Inline>> },
    /// Regular paragraph (one source line)
    Paragraph { content: Vec<Inline> },
    /// Empty source line, rendered as vertical spacing
    Blank,
}

/// A bullet list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Leading whitespace count divided by two
    pub indent: usize,
    pub content: Vec<Inline>,
}

/// A numbered list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedItem {
    /// Literal digits from the source, never renumbered
    pub number: String,
    pub indent: usize,
    pub content: Vec<Inline>,
}

/// Inline markdown content (text formatting)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text
    Text { text: String },
    /// Bold text
    Bold { children: Vec<Inline> },
    /// Italic text
    Italic { children: Vec<Inline> },
    /// Inline code, never parsed further
    Code { code: String },
    /// Hyperlink
    Link { label: String, url: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    pub fn bold(children: Vec<Inline>) -> Self {
        Inline::Bold { children }
    }

    pub fn italic(children: Vec<Inline>) -> Self {
        Inline::Italic { children }
    }

    pub fn code(code: impl Into<String>) -> Self {
        Inline::Code { code: code.into() }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Literal text of this node with all markers removed.
    /// Link URLs are not part of the visible text.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text { text } => out.push_str(text),
            Inline::Bold { children } | Inline::Italic { children } => {
                for child in children {
                    child.push_plain_text(out);
                }
            }
            Inline::Code { code } => out.push_str(code),
            Inline::Link { label, .. } => out.push_str(label),
        }
    }
}

/// Flatten a run of inline nodes to its literal text
pub fn inline_plain_text(content: &[Inline]) -> String {
    let mut out = String::new();
    for item in content {
        item.push_plain_text(&mut out);
    }
    out
}

impl Block {
    /// Literal text of this block, one entry per rendered line
    pub fn plain_lines(&self) -> Vec<String> {
        match self {
            Block::Divider | Block::Blank => vec![String::new()],
            Block::Heading { content, .. } | Block::Paragraph { content } => {
                vec![inline_plain_text(content)]
            }
            Block::UnorderedList { items } => items
                .iter()
                .map(|item| inline_plain_text(&item.content))
                .collect(),
            Block::OrderedList { items } => items
                .iter()
                .map(|item| inline_plain_text(&item.content))
                .collect(),
            Block::CodeBlock { lines, .. } => lines.clone(),
            Block::Blockquote { lines } => lines.iter().map(|l| inline_plain_text(l)).collect(),
        }
    }

    /// Literal text of this block joined with newlines
    pub fn plain_text(&self) -> String {
        self.plain_lines().join("\n")
    }

    /// Body of a code block joined with newlines
    pub fn code(&self) -> Option<String> {
        match self {
            Block::CodeBlock { lines, .. } => Some(lines.join("\n")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_drops_markers() {
        let content = vec![
            Inline::text("a "),
            Inline::bold(vec![Inline::text("b "), Inline::italic(vec![Inline::text("c")])]),
            Inline::code("d"),
            Inline::link("e", "https://example.com"),
        ];
        assert_eq!(inline_plain_text(&content), "a b cde");
    }

    #[test]
    fn test_code_block_body() {
        let block = Block::CodeBlock {
            language: Some("rust".to_string()),
            lines: vec!["fn main() {".to_string(), "}".to_string()],
        };
        assert_eq!(block.code().as_deref(), Some("fn main() {\n}"));
        assert_eq!(Block::Divider.code(), None);
    }

    #[test]
    fn test_json_shape() {
        let block = Block::Paragraph {
            content: vec![Inline::bold(vec![Inline::text("hi")])],
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["content"][0]["type"], "bold");
        assert_eq!(json["content"][0]["children"][0]["text"], "hi");
    }
}
