//! Intents command implementation

use std::path::Path;

use anyhow::{anyhow, Result};

use vaultype::config::Config;
use vaultype::engine::CommandRegistry;
use vaultype::CommandCategory;

/// List registry entries, grouped by category
pub fn intents_command(config_path: Option<&Path>, category: Option<String>) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let mut registry = CommandRegistry::new();
    registry.load_disabled_intents(&config.disabled_intents);

    let categories = match category {
        Some(name) => vec![name.parse::<CommandCategory>().map_err(|e| anyhow!(e))?],
        None => CommandCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("{}:", category);
        for entry in registry.entries(category) {
            let mut notes = Vec::new();
            if !entry.enabled {
                notes.push("disabled".to_string());
            }
            if entry.requires_confirmation {
                notes.push("asks first".to_string());
            }
            if !entry.required_entities.is_empty() {
                notes.push(format!("needs {}", entry.required_entities.join(", ")));
            }

            let marker = if entry.enabled { "+" } else { "-" };
            if notes.is_empty() {
                println!("  {} {:<24} {}", marker, entry.name, entry.intent.label());
            } else {
                println!(
                    "  {} {:<24} {} ({})",
                    marker,
                    entry.name,
                    entry.intent.label(),
                    notes.join("; ")
                );
            }
        }
        println!();
    }

    if !config.custom_commands.is_empty() {
        println!("custom commands:");
        for custom in &config.custom_commands {
            let marker = if custom.enabled { "+" } else { "-" };
            println!(
                "  {} {:<24} \"{}\" ({} steps, used {} times)",
                marker,
                custom.name,
                custom.trigger_phrase,
                custom.steps.len(),
                custom.use_count
            );
        }
    }

    Ok(())
}
