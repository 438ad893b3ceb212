//! User configuration loaded from `config.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::reply::{is_known_model, ReplyTiming, DEFAULT_MODEL, MODELS};
use crate::theme::ThemeId;

pub const APP_DIR: &str = "leaf-notes";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown model '{0}'")]
    UnknownModel(String),
    #[error("reply.min_delay_ms ({min}) is greater than reply.max_delay_ms ({max})")]
    InvalidDelay { min: u64, max: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub open: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self { open: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeId,
    pub model: String,
    pub reply: ReplyConfig,
    pub sidebar: SidebarConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeId::default(),
            model: DEFAULT_MODEL.to_string(),
            reply: ReplyConfig::default(),
            sidebar: SidebarConfig::default(),
        }
    }
}

impl Config {
    /// `<config_dir>/leaf-notes/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the default location, or defaults when there is none
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_known_model(&self.model) {
            return Err(ConfigError::UnknownModel(format!(
                "{} (expected one of: {})",
                self.model,
                MODELS.join(", ")
            )));
        }
        if self.reply.min_delay_ms > self.reply.max_delay_ms {
            return Err(ConfigError::InvalidDelay {
                min: self.reply.min_delay_ms,
                max: self.reply.max_delay_ms,
            });
        }
        Ok(())
    }

    pub fn reply_timing(&self) -> ReplyTiming {
        ReplyTiming {
            min: Duration::from_millis(self.reply.min_delay_ms),
            max: Duration::from_millis(self.reply.max_delay_ms),
        }
    }
}
