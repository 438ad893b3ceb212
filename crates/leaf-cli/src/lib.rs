//! Leaf Notes terminal front end

pub mod cli;
pub mod render;
pub mod tui;

use anyhow::{Context, Result};
use leaf_core::Config;

use crate::cli::Cli;

/// Load the config file named on the command line (or the default one) and
/// apply the `--theme`/`--model` overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    config.validate().context("Invalid settings")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use leaf_core::ThemeId;
    use std::io::Write;

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = \"ocean\"\nmodel = \"GPT-3.5\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["leaf", "--config", &path, "--theme", "nord"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.theme, ThemeId::Nord);
        assert_eq!(config.model, "GPT-3.5");
    }

    #[test]
    fn test_unknown_model_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let path = path.to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["leaf", "--config", &path, "--model", "Llama"]).unwrap();
        assert!(load_config(&cli).is_err());
    }
}
