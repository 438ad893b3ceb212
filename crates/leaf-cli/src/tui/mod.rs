//! Terminal user interface

pub mod app;
pub mod components;
pub mod handlers;
pub mod input;
pub mod markdown;
pub mod popups;
pub mod themes;
pub mod utils;

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use leaf_core::Config;
use ratatui::{backend::CrosstermBackend, Terminal};

pub use app::App;

/// Run the interactive app until the user quits
pub async fn run(config: &Config) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    // Leave the terminal usable if we panic mid-frame
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => {
            let mut app = App::new(config);
            tracing::info!(theme = %app.theme_id, model = %app.model, "Starting UI");
            let result = app.run(&mut terminal).await;
            let _ = terminal.show_cursor();
            result
        }
        Err(e) => Err(e.into()),
    };

    restore_terminal()?;
    result
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
