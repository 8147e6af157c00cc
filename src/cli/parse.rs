//! Parse command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use vaultype::config::Config;
use vaultype::engine::{CommandParser, InMemoryCustomCommandStore};
use vaultype::CommandIntent;

/// Parse `text` the way a live session would and print the result as JSON
pub async fn parse_command(config_path: Option<&Path>, text: &str) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let chaining = config.command_mode.chaining_enabled
        && !config
            .disabled_intents
            .iter()
            .any(|name| name.parse::<CommandIntent>() == Ok(CommandIntent::ChainedCommand));

    let parser = CommandParser::from_settings(&config.parser).with_custom_commands(Arc::new(
        InMemoryCustomCommandStore::new(config.custom_commands),
    ));

    let commands = if chaining {
        parser.parse_chain(text).await
    } else {
        parser.parse(text).await.into_iter().collect()
    };

    if commands.is_empty() {
        bail!("Unrecognized command: \"{}\"", text.trim());
    }

    let json = serde_json::to_string_pretty(&commands).context("Failed to serialize commands")?;
    println!("{}", json);
    Ok(())
}
