//! Markdown Cache
//!
//! Caches rendered messages so the thread is not re-rendered on every frame.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use leaf_core::ThemeId;

use super::links::RenderedMarkdown;
use crate::tui::themes::Theme;

/// Cache key: (content_hash, wrap_width, theme)
type CacheKey = (u64, usize, ThemeId);

#[derive(Default)]
pub struct MarkdownCache {
    cache: HashMap<CacheKey, Arc<RenderedMarkdown>>,
    /// Last render width, everything is dropped when it changes
    last_width: usize,
}

pub fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

impl MarkdownCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if width changed and invalidate if needed.
    /// Returns true if cache was invalidated
    pub fn check_width(&mut self, width: usize) -> bool {
        if self.last_width != width {
            self.cache.clear();
            self.last_width = width;
            true
        } else {
            false
        }
    }

    pub fn get_or_render(
        &mut self,
        content: &str,
        width: usize,
        theme: &Theme,
    ) -> Arc<RenderedMarkdown> {
        let key = (content_hash(content), width, theme.id);
        if let Some(cached) = self.cache.get(&key) {
            return Arc::clone(cached);
        }
        let rendered = Arc::new(super::render_message(content, width, theme));
        self.cache.insert(key, Arc::clone(&rendered));
        rendered
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
