//! Enable / disable command implementation

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing::info;

use vaultype::config::Config;
use vaultype::engine::CommandRegistry;
use vaultype::CommandIntent;

/// Flip one intent and persist the disabled set
pub fn toggle_command(config_path: Option<PathBuf>, intent: &str, enabled: bool) -> Result<()> {
    let intent = intent.parse::<CommandIntent>().map_err(|e| anyhow!(e))?;
    let config_path = config_path.unwrap_or_else(Config::global_config_path);
    let config = Config::load_or_default(Some(&config_path))?;

    let mut registry = CommandRegistry::new();
    registry.load_disabled_intents(&config.disabled_intents);

    if registry.is_enabled(intent) == enabled {
        println!(
            "{} is already {}",
            intent,
            if enabled { "enabled" } else { "disabled" }
        );
        return Ok(());
    }

    registry.set_enabled(intent, enabled);
    Config::save_disabled_intents(&config_path, registry.disabled_intent_raw_values())?;
    info!("Updated {}", config_path.display());
    println!("{} {}", if enabled { "Enabled" } else { "Disabled" }, intent);
    Ok(())
}
