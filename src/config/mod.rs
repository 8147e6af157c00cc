//! Configuration loading and management

mod custom_command;
mod io;
mod settings;


pub use custom_command::{CommandStep, CustomCommand};
pub use settings::{CommandModeSettings, ParserSettings, SemanticSettings, WakeWordSettings};

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Wake word detection
    #[serde(default)]
    pub wake_word: WakeWordSettings,

    /// Command mode session timing
    #[serde(default)]
    pub command_mode: CommandModeSettings,

    /// Parser thresholds and optional semantic fallback
    #[serde(default)]
    pub parser: ParserSettings,

    /// Intents switched off by the user, stored by name
    #[serde(default)]
    pub disabled_intents: Vec<String>,

    /// User-defined trigger phrases
    #[serde(default)]
    pub custom_commands: Vec<CustomCommand>,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise the global config.
    /// A missing file yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::global_config_path(),
        };

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    /// Find a custom command by name (case-insensitive)
    pub fn custom_command_mut(&mut self, name: &str) -> Option<&mut CustomCommand> {
        self.custom_commands
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }
}
