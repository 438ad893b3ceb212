//! Markdown-subset parsing for chat messages
//!
//! Supports ATX headings, thematic breaks, bullet and numbered lists, fenced
//! code, blockquotes, and bold/italic/code/link spans. Parsing never fails:
//! anything that doesn't match a rule is kept as literal text.

mod elements;
mod inline;
mod parser;

pub use elements::{inline_plain_text, Block, Inline, ListItem, OrderedItem};
pub use inline::parse_inline;
pub use parser::parse;
