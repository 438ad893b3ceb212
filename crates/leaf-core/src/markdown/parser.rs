//! Line-oriented block parsing
//!
//! Each position in the line sequence is classified by the first rule that
//! matches: divider, heading, bullet list, numbered list, fenced code,
//! blockquote, blank, paragraph. List and quote rules consume the whole
//! contiguous run of matching lines.

use once_cell::sync::Lazy;
use regex::Regex;

use super::elements::{Block, ListItem, OrderedItem};
use super::inline::parse_inline;

static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static BULLET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)[-*+]\s+").unwrap());
static NUMBERED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)([0-9]+)\.\s+").unwrap());

const FENCE: &str = "```";

/// Parse markdown text into structured blocks
pub fn parse(text: &str) -> Vec<Block> {
    if text.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut blocks = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx];
        let trimmed = line.trim();

        if is_divider(trimmed) {
            blocks.push(Block::Divider);
            idx += 1;
            continue;
        }

        if let Some(caps) = HEADING_REGEX.captures(line) {
            let level = caps[1].len() as u8;
            blocks.push(Block::Heading {
                level,
                content: parse_inline(&caps[2]),
            });
            idx += 1;
            continue;
        }

        if BULLET_REGEX.is_match(line) {
            let (items, next) = collect_bullets(&lines, idx);
            blocks.push(Block::UnorderedList { items });
            idx = next;
            continue;
        }

        if NUMBERED_REGEX.is_match(line) {
            let (items, next) = collect_numbered(&lines, idx);
            blocks.push(Block::OrderedList { items });
            idx = next;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix(FENCE) {
            let (block, next) = collect_code_block(&lines, idx + 1, rest);
            blocks.push(block);
            idx = next;
            continue;
        }

        if trimmed.starts_with('>') {
            let (quote, next) = collect_quote(&lines, idx);
            blocks.push(quote);
            idx = next;
            continue;
        }

        if trimmed.is_empty() {
            blocks.push(Block::Blank);
        } else {
            blocks.push(Block::Paragraph {
                content: parse_inline(line),
            });
        }
        idx += 1;
    }

    tracing::trace!(lines = lines.len(), blocks = blocks.len(), "Parsed markdown");
    blocks
}

/// Three or more of the same rule character and nothing else
fn is_divider(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && trimmed.chars().count() >= 3 && chars.all(|c| c == first)
}

fn indent_level(leading: &str) -> usize {
    leading.chars().count() / 2
}

fn collect_bullets(lines: &[&str], start: usize) -> (Vec<ListItem>, usize) {
    let mut items = Vec::new();
    let mut idx = start;

    while idx < lines.len() {
        let Some(caps) = BULLET_REGEX.captures(lines[idx]) else {
            break;
        };
        let marker_end = caps.get(0).map_or(0, |m| m.end());
        items.push(ListItem {
            indent: indent_level(&caps[1]),
            content: parse_inline(&lines[idx][marker_end..]),
        });
        idx += 1;
    }

    (items, idx)
}

fn collect_numbered(lines: &[&str], start: usize) -> (Vec<OrderedItem>, usize) {
    let mut items = Vec::new();
    let mut idx = start;

    while idx < lines.len() {
        let Some(caps) = NUMBERED_REGEX.captures(lines[idx]) else {
            break;
        };
        let marker_end = caps.get(0).map_or(0, |m| m.end());
        items.push(OrderedItem {
            number: caps[2].to_string(),
            indent: indent_level(&caps[1]),
            content: parse_inline(&lines[idx][marker_end..]),
        });
        idx += 1;
    }

    (items, idx)
}

/// Collect code lines after an opening fence. `start` is the first body line.
/// The closing fence is consumed but not kept; without one the block runs to
/// the end of input.
fn collect_code_block(lines: &[&str], start: usize, info: &str) -> (Block, usize) {
    let language = Some(info.trim())
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);

    let mut body = Vec::new();
    let mut idx = start;

    while idx < lines.len() {
        if lines[idx].trim().starts_with(FENCE) {
            return (
                Block::CodeBlock {
                    language,
                    lines: body,
                },
                idx + 1,
            );
        }
        body.push(lines[idx].to_string());
        idx += 1;
    }

    tracing::debug!(lines = body.len(), "Code fence never closed, ran to end of input");
    (
        Block::CodeBlock {
            language,
            lines: body,
        },
        idx,
    )
}

fn collect_quote(lines: &[&str], start: usize) -> (Block, usize) {
    let mut quoted = Vec::new();
    let mut idx = start;

    while idx < lines.len() {
        let trimmed = lines[idx].trim_start();
        let Some(after_marker) = trimmed.strip_prefix('>') else {
            break;
        };
        quoted.push(parse_inline(strip_one_space(after_marker)));
        idx += 1;
    }

    (Block::Blockquote { lines: quoted }, idx)
}

/// Drop a single leading whitespace character, if any
fn strip_one_space(text: &str) -> &str {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::elements::Inline;

    fn text(s: &str) -> Inline {
        Inline::text(s)
    }

    fn paragraph(s: &str) -> Block {
        Block::Paragraph {
            content: vec![text(s)],
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_plain_paragraphs_and_blank() {
        assert_eq!(
            parse("hello\n\nworld"),
            vec![paragraph("hello"), Block::Blank, paragraph("world")]
        );
    }

    #[test]
    fn test_dividers() {
        for rule in ["---", "***", "____", "  -----  "] {
            assert_eq!(parse(rule), vec![Block::Divider], "rule {rule:?}");
        }
    }

    #[test]
    fn test_mixed_rule_characters_are_not_a_divider() {
        assert_eq!(parse("-*-"), vec![paragraph("-*-")]);
        assert_eq!(parse("--"), vec![paragraph("--")]);
    }

    #[test]
    fn test_heading_levels() {
        let blocks = parse("# One\n### Three\n###### Six");
        let levels: Vec<u8> = blocks
            .iter()
            .map(|b| match b {
                Block::Heading { level, .. } => *level,
                other => panic!("Expected Heading, got {other:?}"),
            })
            .collect();
        assert_eq!(levels, vec![1, 3, 6]);
    }

    #[test]
    fn test_heading_needs_space_and_at_most_six_hashes() {
        assert_eq!(parse("#nospace"), vec![paragraph("#nospace")]);
        assert_eq!(parse("####### seven"), vec![paragraph("####### seven")]);
    }

    #[test]
    fn test_heading_content_is_inline_parsed() {
        assert_eq!(
            parse("## A **big** deal"),
            vec![Block::Heading {
                level: 2,
                content: vec![text("A "), Inline::bold(vec![text("big")]), text(" deal")],
            }]
        );
    }

    #[test]
    fn test_unordered_list_run() {
        assert_eq!(
            parse("* item1\n* item2"),
            vec![Block::UnorderedList {
                items: vec![
                    ListItem {
                        indent: 0,
                        content: vec![text("item1")],
                    },
                    ListItem {
                        indent: 0,
                        content: vec![text("item2")],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_bullet_markers_are_equivalent_and_indent_counts() {
        let blocks = parse("- a\n  + b\n    * c");
        let Block::UnorderedList { items } = &blocks[0] else {
            panic!("Expected UnorderedList, got {:?}", blocks[0]);
        };
        let indents: Vec<usize> = items.iter().map(|i| i.indent).collect();
        assert_eq!(indents, vec![0, 1, 2]);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_list_item_with_bold_is_still_a_list() {
        let blocks = parse("- **bold** item");
        assert_eq!(
            blocks,
            vec![Block::UnorderedList {
                items: vec![ListItem {
                    indent: 0,
                    content: vec![Inline::bold(vec![text("bold")]), text(" item")],
                }],
            }]
        );
    }

    #[test]
    fn test_blank_line_ends_list() {
        let blocks = parse("- a\n\n- b");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], Block::Blank));
    }

    #[test]
    fn test_ordered_list_keeps_literal_numbers() {
        let blocks = parse("1. a\n1. b\n7. c");
        let Block::OrderedList { items } = &blocks[0] else {
            panic!("Expected OrderedList, got {:?}", blocks[0]);
        };
        let numbers: Vec<&str> = items.iter().map(|i| i.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "1", "7"]);
    }

    #[test]
    fn test_ordered_list_first_second() {
        assert_eq!(
            parse("1. first\n2. second"),
            vec![Block::OrderedList {
                items: vec![
                    OrderedItem {
                        number: "1".to_string(),
                        indent: 0,
                        content: vec![text("first")],
                    },
                    OrderedItem {
                        number: "2".to_string(),
                        indent: 0,
                        content: vec![text("second")],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_code_block_with_language() {
        assert_eq!(
            parse("```js\ncode();\n```"),
            vec![Block::CodeBlock {
                language: Some("js".to_string()),
                lines: vec!["code();".to_string()],
            }]
        );
    }

    #[test]
    fn test_code_block_is_verbatim() {
        let blocks = parse("```\nlet x = *p * 2; // **not bold**\n  # not a heading\n```\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::CodeBlock {
                    language: None,
                    lines: vec![
                        "let x = *p * 2; // **not bold**".to_string(),
                        "  # not a heading".to_string(),
                    ],
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_unclosed_code_block_runs_to_end() {
        let blocks = parse("```py\na\nb");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code().as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_blockquote_run() {
        assert_eq!(
            parse("> first *line*\n>second\nplain"),
            vec![
                Block::Blockquote {
                    lines: vec![
                        vec![text("first "), Inline::italic(vec![text("line")])],
                        vec![text("second")],
                    ],
                },
                paragraph("plain"),
            ]
        );
    }

    #[test]
    fn test_blockquote_strips_only_one_space() {
        assert_eq!(
            parse(">   indented"),
            vec![Block::Blockquote {
                lines: vec![vec![text("  indented")]],
            }]
        );
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(
            parse("# Title\r\nbody\r\n"),
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("Title")],
                },
                paragraph("body"),
                Block::Blank,
            ]
        );
    }

    #[test]
    fn test_plain_text_round_trip() {
        let input = "no markup here\njust two lines";
        let flattened: Vec<String> = parse(input).iter().map(Block::plain_text).collect();
        assert_eq!(flattened.join("\n"), input);
    }

    #[test]
    fn test_marker_characters_removed_exactly() {
        let input = "# Head\n- **b** x\n2. `c`\n> [l](u)";
        let flattened: Vec<String> = parse(input).iter().map(Block::plain_text).collect();
        assert_eq!(flattened, vec!["Head", "b x", "c", "l"]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let input = "# T\n- a\n1. b\n```\nc\n```\n> d\n\ne";
        assert_eq!(parse(input), parse(input));
    }
}
