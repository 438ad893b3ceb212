//! Non-interactive `leaf render`

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use leaf_core::ThemeId;

use crate::tui::markdown::render_message;
use crate::tui::themes::theme_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// Rendered lines without styling
    #[default]
    Text,
    /// Parsed block tree
    Json,
}

/// Read FILE, or stdin when no file is given
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Render `input` in the requested format
pub fn render_document(input: &str, format: RenderFormat, width: usize) -> Result<String> {
    match format {
        RenderFormat::Text => {
            let rendered = render_message(input, width.max(1), theme_for(ThemeId::default()));
            let mut out = rendered.plain_lines().join("\n");
            if !out.is_empty() {
                out.push('\n');
            }
            Ok(out)
        }
        RenderFormat::Json => {
            let blocks = leaf_core::markdown::parse(input);
            let mut out =
                serde_json::to_string_pretty(&blocks).context("Failed to serialize blocks")?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_text_output() {
        let out = render_document("# Title\n\n- one\n- two", RenderFormat::Text, 40).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Title");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "• one");
        assert_eq!(lines[3], "• two");
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(render_document("", RenderFormat::Text, 40).unwrap(), "");
        assert_eq!(render_document("", RenderFormat::Json, 40).unwrap(), "[]\n");
    }

    #[test]
    fn test_json_output_is_block_tree() {
        let out = render_document("**hi**", RenderFormat::Json, 80).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["type"], "paragraph");
        assert_eq!(value[0]["content"][0]["type"], "bold");
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello").unwrap();
        assert_eq!(read_input(Some(file.path())).unwrap(), "hello");
        assert!(read_input(Some(Path::new("/nonexistent/leaf.md"))).is_err());
    }
}
