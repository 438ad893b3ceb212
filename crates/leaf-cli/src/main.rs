use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use leaf_cli::cli::{Cli, Commands};
use leaf_cli::render::{read_input, render_document};
use leaf_core::config::APP_DIR;

const LOG_ENV: &str = "LEAF_LOG";
const DEFAULT_LOG_FILTER: &str = "leaf=info,leaf_cli=info,leaf_core=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// `<data_dir>/leaf-notes/leaf.log`
fn log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("leaf.log"))
}

/// The UI owns the terminal, so its logs go to a file
fn init_file_logging() -> Result<()> {
    let Some(path) = log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Render {
            file,
            format,
            width,
        }) => {
            init_stderr_logging();
            let input = read_input(file.as_deref())?;
            let output = render_document(&input, *format, *width)?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("Failed to write output")?;
            Ok(())
        }
        None => {
            init_file_logging()?;
            let config = leaf_cli::load_config(&cli)?;
            leaf_cli::tui::run(&config).await
        }
    }
}
