//! Markdown rendering for assistant messages
//!
//! User messages are shown as plain text and never pass through here.

use super::themes::Theme;

mod cache;
mod inline;
mod links;
mod renderer;

pub use cache::{content_hash, MarkdownCache};
pub use links::{LinkSpan, RenderedMarkdown};
pub use renderer::render_blocks;

/// Render message text to styled lines with link tracking
pub fn render_message(text: &str, width: usize, theme: &Theme) -> RenderedMarkdown {
    let blocks = leaf_core::markdown::parse(text);
    tracing::trace!(blocks = blocks.len(), width, "Rendering message");
    render_blocks(&blocks, width, theme)
}
