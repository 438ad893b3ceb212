//! Link positions in rendered output

use ratatui::text::Line;

/// Where a link landed in the rendered lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    pub url: String,
    /// Line index in rendered output (0-based)
    pub line: usize,
    /// Start column in display width units (0-based)
    pub start_col: usize,
    /// End column in display width units (exclusive)
    pub end_col: usize,
}

/// Rendered markdown with link tracking
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub lines: Vec<Line<'static>>,
    pub links: Vec<LinkSpan>,
}

impl RenderedMarkdown {
    pub fn with_links(lines: Vec<Line<'static>>, links: Vec<LinkSpan>) -> Self {
        Self { lines, links }
    }

    /// Shift every line index by `offset`, used when appending to other output
    pub fn append(&mut self, other: RenderedMarkdown) {
        let offset = self.lines.len();
        self.lines.extend(other.lines);
        self.links.extend(other.links.into_iter().map(|mut link| {
            link.line += offset;
            link
        }));
    }

    /// Distinct link targets in reading order. A link wrapped over several
    /// lines is listed once.
    pub fn link_targets(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for link in &self.links {
            if !urls.contains(&link.url.as_str()) {
                urls.push(&link.url);
            }
        }
        urls
    }

    /// Rendered text without styling, one string per line
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }
}
