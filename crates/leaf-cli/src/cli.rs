use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leaf_core::ThemeId;

use crate::render::RenderFormat;

#[derive(Debug, Parser)]
#[command(name = "leaf", version)]
#[command(about = "Leaf Notes - a calm little chat client for the terminal")]
#[command(after_help = "\
EXAMPLES:

    # Start the chat UI
    leaf

    # Start with another theme and model
    leaf --theme nord --model \"Claude-3\"

    # Render a markdown file the way replies are shown
    leaf render notes.md --width 60

    # Inspect the parsed blocks
    echo '**hi**' | leaf render --format json

CONFIGURATION:

Settings are read from --config, or ~/.config/leaf-notes/config.toml:

    theme = \"ocean\"
    model = \"GPT-4\"

    [reply]
    min_delay_ms = 1000
    max_delay_ms = 3000

    [sidebar]
    open = true

Set LEAF_LOG to change log verbosity (for example LEAF_LOG=debug).")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Theme to start with (overrides the config file)
    #[arg(long)]
    pub theme: Option<ThemeId>,

    /// Model to start with (overrides the config file)
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a markdown document without starting the UI
    Render {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = RenderFormat::Text)]
        format: RenderFormat,

        /// Wrap width in columns
        #[arg(long, default_value_t = 80)]
        width: usize,
    },
}
